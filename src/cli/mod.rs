//! CLI adapter for the advisor
//!
//! Offers the core operations from a terminal: chunk a file, search
//! or question a directory of documents, inspect stored records.
//! This module is parallel to `http/` - both depend on `core/` but
//! not on each other.
//!
//! # Architecture
//!
//! ```text
//!              +------------------+
//!              |     core/        |
//!              |  (domain logic)  |
//!              +--------+---------+
//!                       |
//!          +------------+------------+
//!          |                         |
//!          v                         v
//! +------------------+      +------------------+
//! |      http/       |      |      cli/        |
//! | (axum adapter)   |      | (clap adapter)   |
//! +------------------+      +------------------+
//! ```

pub mod commands;
pub mod output;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::llm::GeminiClient;
use crate::core::services::Services;
use crate::core::storage::MetadataStore;

/// Advisor - keyword-retrieval academic advising assistant
///
/// Split documents into chunks, search them by keyword, and ask
/// questions answered with the retrieved passages as context.
#[derive(Parser, Debug)]
#[command(name = "advisor")]
#[command(version)]
#[command(about = "Academic advisor RAG toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for scripting
    Json,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show how a document is cut into chunks
    Split(commands::SplitArgs),

    /// Keyword search over the documents in a directory
    Search(commands::SearchArgs),

    /// Ask a question answered from the documents in a directory
    Ask(commands::AskArgs),

    /// List document records in the server database
    #[command(name = "list-docs")]
    ListDocs(commands::ListDocsArgs),

    /// Show current configuration
    #[command(name = "show-config")]
    ShowConfig(commands::ConfigArgs),

    /// Generate shell completion scripts
    ///
    /// Output completion script to stdout. To install:
    ///
    ///   bash:  advisor completions bash > ~/.local/share/bash-completion/completions/advisor
    ///   zsh:   advisor completions zsh > ~/.zfunc/_advisor
    ///   fish:  advisor completions fish > ~/.config/fish/completions/advisor.fish
    Completions(commands::CompletionsArgs),
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Completions need neither config nor services
    if let Commands::Completions(args) = cli.command {
        return commands::completions::execute(args);
    }

    let config = Config::load()?;

    match cli.command {
        Commands::Split(args) => commands::split::execute(args, &config, cli.format),
        Commands::Search(args) => {
            let services = ephemeral_services(config)?;
            commands::search::execute(args, &services, cli.format)
        }
        Commands::Ask(args) => {
            let services = ephemeral_services(config)?;
            commands::ask::execute(args, &services, cli.format).await
        }
        Commands::ListDocs(args) => {
            let services = Arc::new(Services::new(config)?);
            commands::docs::execute(args, &services, cli.format)
        }
        Commands::ShowConfig(args) => commands::config::execute(args, &config, cli.format),
        Commands::Completions(_) => unreachable!(), // Handled above
    }
}

/// Services backed by a private in-memory database.
///
/// Directory commands index their documents fresh on every run, so
/// their records must not leak into the server's database.
pub fn ephemeral_services(config: Config) -> Result<Arc<Services>> {
    let llm = GeminiClient::new(&config.llm)?;
    let services = Services::with_components(config, MetadataStore::open_in_memory()?, Arc::new(llm))?;
    Ok(Arc::new(services))
}
