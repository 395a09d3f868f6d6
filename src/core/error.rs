//! Error types and error handling for the advisor service.
//!
//! This module defines the error types used throughout the
//! application. Protocol-specific error handling (HTTP status
//! codes) is handled in the respective adapter modules.

use crate::core::types::DocumentId;
use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Main error type for the advisor service
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Invalid chunking configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Document {0} produced no usable chunks")]
    EmptyDocument(DocumentId),

    #[error("File type not supported: {0}")]
    UnsupportedFileType(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("All candidate models failed: {}", .attempts.join("; "))]
    GenerationExhausted { attempts: Vec<String> },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl AdvisorError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a "not found" type error
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdvisorError::DocumentNotFound(_))
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            AdvisorError::UnsupportedFileType(_)
                | AdvisorError::InvalidDocument(_)
                | AdvisorError::InvalidQuery(_)
                | AdvisorError::ConfigError(_)
        )
    }

    /// Check if the failure came from the hosted generation API
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AdvisorError::GenerationFailed(_)
                | AdvisorError::GenerationExhausted { .. }
                | AdvisorError::HttpClientError(_)
        )
    }
}
