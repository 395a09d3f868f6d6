//! Core data types for the advisor service.
//!
//! This module defines the data structures shared by the core and
//! its adapters: chunks, search hits, chat messages, and the HTTP
//! request/response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned to a document by the metadata store.
///
/// The chunk index only uses it as a key; it never generates or
/// validates one.
pub type DocumentId = i64;

/// A single text window cut from a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// Window content with surrounding whitespace trimmed
    pub text: String,

    /// Byte offset where the (untrimmed) window starts
    pub start_offset: usize,

    /// Byte offset where the (untrimmed) window ends
    pub end_offset: usize,

    /// Sequential chunk number within the document
    pub chunk_index: usize,
}

/// A chunk returned by lexical search, with its score
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LexicalHit {
    /// Sum of keyword occurrence counts (always > 0)
    pub score: usize,

    /// Owning document
    pub document_id: DocumentId,

    /// Position within the owning document's chunk list
    pub chunk_index: usize,

    /// Chunk text
    pub text: String,
}

/// Speaker of a chat history entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Human,
    Ai,
}

/// One message of a session's chat history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Model label a client may request; echoed back and logged
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ModelName {
    #[serde(rename = "gemini-1.5-flash")]
    GeminiFlash,
    #[default]
    #[serde(rename = "gemini-1.5-pro")]
    GeminiPro,
}

impl ModelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::GeminiFlash => "gemini-1.5-flash",
            ModelName::GeminiPro => "gemini-1.5-pro",
        }
    }
}

/// Metadata record for an uploaded document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentInfo {
    pub id: DocumentId,
    pub filename: String,
    pub upload_timestamp: DateTime<Utc>,
}

/// Statistics from ingesting one or more documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestStats {
    /// Documents that produced at least one chunk
    pub documents_indexed: usize,

    /// Total chunks stored
    pub chunks_created: usize,

    /// Files skipped because they could not be loaded
    pub documents_skipped: usize,

    /// Ingestion duration in milliseconds
    pub duration_ms: u64,
}

/// Outcome of a single successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestReport {
    pub file_id: DocumentId,
    pub filename: String,
    pub chunks: usize,
}

/// Chat request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryInput {
    pub question: String,

    /// Conversation to continue; a new one is started when absent
    #[serde(default)]
    pub session_id: Option<String>,

    #[serde(default)]
    pub model: ModelName,
}

/// Chat response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    pub session_id: String,
    pub model: ModelName,
}

/// Response from a successful upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub file_id: DocumentId,
    pub chunks: usize,
}

impl From<IngestReport> for UploadResponse {
    fn from(report: IngestReport) -> Self {
        Self {
            message: format!(
                "File {} uploaded successfully with ID: {}",
                report.filename, report.file_id
            ),
            file_id: report.file_id,
            chunks: report.chunks,
        }
    }
}

/// Request to delete a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteFileRequest {
    pub file_id: DocumentId,
}

/// Response from deleting a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub file_id: DocumentId,
}

/// Response from resetting the index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
    pub documents_removed: usize,
}

/// Query string for the debug search endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DebugSearchParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub k: Option<usize>,
}

/// Preview of one debug search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultPreview {
    pub document_id: DocumentId,
    pub score: usize,
    pub content_preview: String,
}

/// Debug search response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugSearchResponse {
    pub total_documents: usize,
    pub total_chunks: usize,
    pub search_query: String,
    pub results_count: usize,
    pub results: Vec<ResultPreview>,
}

/// Banner returned by the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
