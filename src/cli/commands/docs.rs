//! List-docs command - show document records

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use clap::Args;

/// Arguments for the list-docs command
#[derive(Args, Debug)]
pub struct ListDocsArgs {
    /// Show at most this many records (newest first)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

/// Execute the list-docs command
pub fn execute(
    args: ListDocsArgs,
    services: &Services,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut documents = services.list_documents()?;
    if let Some(limit) = args.limit {
        documents.truncate(limit);
    }

    output::render(&documents, format, |documents| {
        if documents.is_empty() {
            println!("No documents recorded.");
            return;
        }

        output::print_header(&format!("{} document(s):", documents.len()));
        for doc in documents {
            println!(
                "  {:>5}  {}  {}",
                colors::id(&doc.id.to_string()),
                colors::file_name(&doc.filename),
                colors::dim(&output::format_relative_time(&doc.upload_timestamp))
            );
        }
    })?;

    Ok(())
}
