//! Document loading and text normalisation.
//!
//! Turns the raw bytes of an uploaded file into the single line of
//! clean text the chunker works on. Extensions outside the allow list
//! are rejected before any bytes are parsed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::core::error::{AdvisorError, Result};
use crate::core::indexer::extract::extract_text;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Validates and decodes uploaded documents
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    /// Lower-cased extensions including the dot, e.g. ".txt"
    allowed_extensions: Vec<String>,

    /// Maximum accepted document size in bytes
    max_size_bytes: u64,
}

impl DocumentLoader {
    /// Create a loader for the given extensions and size limit.
    ///
    /// Extensions may be given with or without the leading dot.
    pub fn new(allowed_extensions: &[String], max_document_size_mb: usize) -> Self {
        let allowed_extensions = allowed_extensions
            .iter()
            .map(|ext| {
                let ext = ext.trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();

        Self {
            allowed_extensions,
            max_size_bytes: (max_document_size_mb as u64) * 1024 * 1024,
        }
    }

    /// Extensions this loader accepts
    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// Check the filename's extension against the allow list.
    pub fn check_extension(&self, filename: &str) -> Result<()> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();

        if self.allowed_extensions.contains(&extension) {
            Ok(())
        } else {
            Err(AdvisorError::UnsupportedFileType(format!(
                "'{filename}'. Supported: {}",
                self.allowed_extensions.join(", ")
            )))
        }
    }

    /// Decode an uploaded file into normalised text.
    ///
    /// # Errors
    ///
    /// - `UnsupportedFileType`: extension not in the allow list
    /// - `InvalidDocument`: too large, unreadable as its format, or no text
    pub fn load_bytes(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        self.check_extension(filename)?;

        if bytes.len() as u64 > self.max_size_bytes {
            return Err(AdvisorError::InvalidDocument(format!(
                "{filename} is {} bytes, limit is {} bytes",
                bytes.len(),
                self.max_size_bytes
            )));
        }

        let text = normalize_whitespace(&extract_text(filename, bytes)?);
        if text.is_empty() {
            return Err(AdvisorError::InvalidDocument(
                "No text content found in document".to_string(),
            ));
        }

        Ok(text)
    }

    /// Read a file from disk and decode it.
    pub fn load_path(&self, path: &Path) -> Result<String> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        self.check_extension(&filename)?;

        let bytes = std::fs::read(path)?;
        self.load_bytes(&filename, &bytes)
    }
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
