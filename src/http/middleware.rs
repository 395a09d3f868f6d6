//! Request logging for the advisor API.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{error, info, warn};

/// Log method, path, status and duration of every request.
///
/// Client errors (4xx) go to WARN, server and upstream errors (5xx)
/// to ERROR, everything else to INFO.
pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        error!(%method, %path, status, elapsed_ms, "Request failed");
    } else if response.status().is_client_error() {
        warn!(%method, %path, status, elapsed_ms, "Request rejected");
    } else {
        info!(%method, %path, status, elapsed_ms, "Request completed");
    }

    response
}
