//! Ask command - answer a question from a directory of documents

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::ModelName;
use clap::Args;
use std::path::PathBuf;

/// Model label accepted on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ModelArg {
    #[value(name = "gemini-1.5-flash")]
    GeminiFlash,
    #[default]
    #[value(name = "gemini-1.5-pro")]
    GeminiPro,
}

impl From<ModelArg> for ModelName {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::GeminiFlash => ModelName::GeminiFlash,
            ModelArg::GeminiPro => ModelName::GeminiPro,
        }
    }
}

/// Arguments for the ask command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Question to answer
    pub question: String,

    /// Directory of documents to index before answering
    #[arg(long, short = 'd')]
    pub dir: PathBuf,

    /// Session id to continue (a new one is generated otherwise)
    #[arg(long, short = 's')]
    pub session: Option<String>,

    /// Model label recorded with the answer
    #[arg(long, value_enum, default_value_t = ModelArg::GeminiPro)]
    pub model: ModelArg,
}

/// Execute the ask command
pub async fn execute(
    args: AskArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let stats = services.ingest_directory(&args.dir)?;
    if stats.documents_indexed == 0 {
        output::print_warning("No documents indexed; answering without context");
    }

    let response = services
        .answer(&args.question, args.session, args.model.into())
        .await?;

    output::render(&response, format, |response| {
        println!("{}\n", response.answer.trim());
        println!(
            "{} {}  {} {}",
            colors::dim("session:"),
            colors::id(&response.session_id),
            colors::dim("model:"),
            response.model.as_str()
        );
    })?;

    Ok(())
}
