//! HTTP request handlers for the advisor API
//!
//! One handler per route. Handlers only translate between HTTP and
//! the core; all behaviour lives in [`Services`].

use std::sync::Arc;

use axum::{
    extract::{Multipart, Query, State},
    response::IntoResponse,
    Json,
};

use crate::core::error::AdvisorError;
use crate::core::services::Services;
use crate::core::types::*;

/// Name of the multipart field carrying the uploaded file
pub const UPLOAD_FIELD: &str = "file";

/// Root handler
pub async fn root_handler() -> impl IntoResponse {
    Json(RootResponse {
        message: "RAG Academic Advisor API is running!".to_string(),
        status: "healthy".to_string(),
    })
}

/// Health check handler
///
/// Returns server status and version information.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Chat handler
///
/// Answers a question with retrieved context. Generation failures
/// still produce a 200 with an apology as the answer.
///
/// # Errors
///
/// - `InvalidQuery`: Question is empty or too long
pub async fn chat_handler(
    State(services): State<Arc<Services>>,
    Json(input): Json<QueryInput>,
) -> Result<Json<QueryResponse>, AdvisorError> {
    let response = services
        .answer(&input.question, input.session_id, input.model)
        .await?;
    Ok(Json(response))
}

/// Upload handler
///
/// Reads the `file` field of a multipart form, then loads, splits
/// and indexes it.
///
/// # Errors
///
/// - `InvalidDocument`: Missing file field, unreadable body, no text
/// - `UnsupportedFileType`: Extension not in the allow list
pub async fn upload_handler(
    State(services): State<Arc<Services>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AdvisorError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AdvisorError::InvalidDocument(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AdvisorError::InvalidDocument("Upload has no filename".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AdvisorError::InvalidDocument(format!("Failed to read upload: {e}")))?;

        let report = services.ingest_document(&filename, &bytes)?;
        return Ok(Json(UploadResponse::from(report)));
    }

    Err(AdvisorError::InvalidDocument(format!(
        "Multipart field '{UPLOAD_FIELD}' is required"
    )))
}

/// List documents handler
///
/// Returns every document record, newest first.
pub async fn list_documents_handler(
    State(services): State<Arc<Services>>,
) -> Result<Json<Vec<DocumentInfo>>, AdvisorError> {
    Ok(Json(services.list_documents()?))
}

/// Delete document handler
///
/// # Errors
///
/// - `DocumentNotFound`: No record with that id
pub async fn delete_document_handler(
    State(services): State<Arc<Services>>,
    Json(req): Json<DeleteFileRequest>,
) -> Result<Json<DeleteResponse>, AdvisorError> {
    services.remove_document(req.file_id)?;

    Ok(Json(DeleteResponse {
        message: format!("Document with ID {} deleted successfully", req.file_id),
        file_id: req.file_id,
    }))
}

/// Debug search handler
///
/// Runs a keyword search and returns scores with short previews.
pub async fn debug_search_handler(
    State(services): State<Arc<Services>>,
    Query(params): Query<DebugSearchParams>,
) -> Result<Json<DebugSearchResponse>, AdvisorError> {
    let response = services.debug_search(params.query.as_deref(), params.k)?;
    Ok(Json(response))
}

/// Reset handler
///
/// Clears the index and drops every document record.
pub async fn reset_handler(
    State(services): State<Arc<Services>>,
) -> Result<Json<ResetResponse>, AdvisorError> {
    let documents_removed = services.reset()?;

    Ok(Json(ResetResponse {
        message: "Index cleared".to_string(),
        documents_removed,
    }))
}
