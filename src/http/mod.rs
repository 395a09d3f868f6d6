//! HTTP REST adapter
//!
//! Depends only on core/. Exposes upload, chat, document management
//! and debug search via the Axum web framework.

pub mod error;
pub mod handlers;
pub mod middleware;

pub use handlers::*;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::services::Services;

/// Room for multipart framing on top of the document itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the API router with middleware and shared state
pub fn router(services: Arc<Services>) -> Router {
    let body_limit =
        services.config.indexing.max_document_size_mb * 1024 * 1024 + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/chat", post(handlers::chat_handler))
        .route("/upload-doc", post(handlers::upload_handler))
        .route("/all-docs", get(handlers::list_documents_handler))
        .route("/delete-doc", post(handlers::delete_document_handler))
        .route("/debug-search", get(handlers::debug_search_handler))
        .route("/reset", post(handlers::reset_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(services)
}
