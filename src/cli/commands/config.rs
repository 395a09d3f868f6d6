//! Config command - show current configuration

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::config::Config;
use clap::Args;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Include the system prompt in the output
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Execute the config command
///
/// The API key is never printed; only whether one is set.
pub fn execute(
    args: ConfigArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => output::print_json(config)?,
        OutputFormat::Human => {
            output::print_header("Configuration:");
            println!("  indexing:");
            println!("    chunk_size: {}", config.indexing.chunk_size);
            println!("    chunk_overlap: {}", config.indexing.chunk_overlap);
            println!(
                "    allowed_extensions: {:?}",
                config.indexing.allowed_extensions
            );
            println!(
                "    max_document_size_mb: {}",
                config.indexing.max_document_size_mb
            );
            println!("  search:");
            println!("    default_k: {}", config.search.default_k);
            println!("    max_k: {}", config.search.max_k);
            println!("  storage:");
            println!("    database: {}", config.storage.database_path().display());
            println!("  llm:");
            println!("    models: {}", config.llm.models.join(" -> "));
            println!(
                "    api_key: {}",
                if config.llm.api_key.is_some() {
                    colors::success("set")
                } else {
                    colors::warning("not set (GOOGLE_API_KEY)")
                }
            );
            println!("  server:");
            println!("    listen: {}", config.server.bind_addr());

            if args.all {
                println!("\n{}", colors::label("System prompt:"));
                println!("{}", config.llm.system_prompt);
            }
        }
    }

    Ok(())
}
