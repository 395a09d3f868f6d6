//! Tests for the ask CLI command

use advisor::cli::commands::ask::{execute, AskArgs, ModelArg};
use advisor::cli::OutputFormat;
use advisor::core::types::ModelName;

use crate::cli::test_helpers::create_cli_test_services;
use crate::common::DocumentSet;

#[tokio::test]
async fn test_ask_uses_directory_context() {
    let (services, client, _temp) = create_cli_test_services();
    let docs = DocumentSet::handbook();

    let args = AskArgs {
        question: "What is the add/drop deadline?".to_string(),
        dir: docs.path().to_path_buf(),
        session: Some("cli-session".to_string()),
        model: ModelArg::GeminiFlash,
    };

    let result = execute(args, &services, OutputFormat::Human).await;
    assert!(result.is_ok(), "Ask should succeed: {:?}", result.err());

    let prompts = client.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("add/drop deadline is the end of week two"));

    let history = services.records.chat_history("cli-session").unwrap();
    assert_eq!(history[1].content, "See the registrar.");
}

#[tokio::test]
async fn test_ask_empty_directory_json() {
    let (services, client, _temp) = create_cli_test_services();
    let empty = tempfile::TempDir::new().unwrap();

    let args = AskArgs {
        question: "Anything?".to_string(),
        dir: empty.path().to_path_buf(),
        session: None,
        model: ModelArg::default(),
    };

    assert!(execute(args, &services, OutputFormat::Json).await.is_ok());
    assert!(client.prompts()[0].contains("No specific context available."));
}

#[test]
fn test_model_arg_maps_to_model_name() {
    assert_eq!(ModelName::from(ModelArg::GeminiFlash), ModelName::GeminiFlash);
    assert_eq!(ModelName::from(ModelArg::default()), ModelName::GeminiPro);
}
