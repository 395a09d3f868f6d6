//! Advisor HTTP server entry point
//!
//! Starts the REST API for the academic advisor RAG service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use advisor::core::config::Config;
use advisor::core::services::Services;
use advisor::core::xdg::XdgDirs;
use advisor::http;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "advisor=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting advisor RAG service");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let xdg = XdgDirs::new();
    xdg.log_paths();
    xdg.ensure_dirs_exist()?;

    let config = Config::load_with_xdg(&xdg)?;
    config.log_config();

    let addr = config.server.bind_addr();
    let purge = config.storage.purge_stale_records;
    let services = Arc::new(Services::new(config)?);

    // Chunks are not durable; records from a previous run point at nothing
    if purge {
        services.purge_stale_records()?;
    }

    let app = http::router(services);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    tracing::info!("Service ready - Health check at http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
