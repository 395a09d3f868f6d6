//! Advisor CLI - command-line interface to the advisor core
//!
//! Works on local directories without a running server. Set
//! `RUST_LOG` to see more than warnings.
//!
//! # Examples
//!
//! ```bash
//! # See how a handbook is chunked
//! advisor split handbook.txt --chunk-size 500 --chunk-overlap 50
//!
//! # Keyword search over a folder of documents
//! advisor search "MS IT tracks" --dir ./docs
//!
//! # Ask a question (needs GOOGLE_API_KEY)
//! advisor ask "When does add/drop end?" --dir ./docs
//! ```

use advisor::cli::{output, run, Cli};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
