//! Tests for the show-config CLI command

use advisor::cli::commands::config::{execute, ConfigArgs};
use advisor::cli::OutputFormat;

use crate::common::test_config;

#[test]
fn test_show_config_human() {
    let result = execute(ConfigArgs { all: false }, &test_config(), OutputFormat::Human);
    assert!(result.is_ok());
}

#[test]
fn test_show_config_all() {
    let result = execute(ConfigArgs { all: true }, &test_config(), OutputFormat::Human);
    assert!(result.is_ok());
}

#[test]
fn test_show_config_json_omits_api_key() {
    let mut config = test_config();
    config.llm.api_key = Some("secret-key".to_string());

    let result = execute(ConfigArgs { all: false }, &config, OutputFormat::Json);
    assert!(result.is_ok());

    let json = serde_json::to_string(&config).unwrap();
    assert!(!json.contains("secret-key"));
    assert!(json.contains("chunk_size"));
}
