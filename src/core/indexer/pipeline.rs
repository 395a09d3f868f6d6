//! Ingestion pipeline: load, normalise, and split documents.
//!
//! The pipeline only produces chunk text. Assigning document ids and
//! storing chunks is done by the caller, which also owns the
//! compensation logic when indexing fails.

use std::path::{Path, PathBuf};

use crate::core::config::IndexingConfig;
use crate::core::error::Result;
use crate::core::indexer::{Chunker, DocumentLoader, DocumentWalker};

/// A document ready to be indexed
#[derive(Debug, Clone)]
pub struct PreparedDocument {
    /// Display name (file name of the source)
    pub filename: String,

    /// Trimmed, non-empty chunk texts in document order
    pub chunks: Vec<String>,
}

/// Loader + chunker pair configured from `[indexing]`
#[derive(Debug, Clone)]
pub struct IngestPipeline {
    loader: DocumentLoader,
    chunker: Chunker,
    include_patterns: Vec<String>,
    exclude_patterns: Vec<String>,
    max_document_size_mb: usize,
}

impl IngestPipeline {
    /// Build a pipeline from indexing configuration.
    ///
    /// Fails with `InvalidConfiguration` on a bad chunk size/overlap.
    pub fn new(config: &IndexingConfig) -> Result<Self> {
        Ok(Self {
            loader: DocumentLoader::new(&config.allowed_extensions, config.max_document_size_mb),
            chunker: Chunker::new(config.chunk_size, config.chunk_overlap)?,
            include_patterns: config.include_patterns.clone(),
            exclude_patterns: config.exclude_patterns.clone(),
            max_document_size_mb: config.max_document_size_mb,
        })
    }

    pub fn loader(&self) -> &DocumentLoader {
        &self.loader
    }

    pub fn chunker(&self) -> &Chunker {
        &self.chunker
    }

    /// Load an uploaded file and split it into chunk texts.
    ///
    /// The returned list may be empty only if the loader let through
    /// text that trims to nothing, which it does not; callers still
    /// rely on the index to reject empty documents.
    pub fn prepare(&self, filename: &str, bytes: &[u8]) -> Result<PreparedDocument> {
        let text = self.loader.load_bytes(filename, bytes)?;
        Ok(PreparedDocument {
            filename: filename.to_string(),
            chunks: self.split(&text),
        })
    }

    /// Load a file from disk and split it into chunk texts.
    pub fn prepare_path(&self, path: &Path) -> Result<PreparedDocument> {
        let text = self.loader.load_path(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(PreparedDocument {
            filename,
            chunks: self.split(&text),
        })
    }

    /// Files under `root` that match the configured patterns.
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let walker = DocumentWalker::new(
            &self.include_patterns,
            &self.exclude_patterns,
            self.max_document_size_mb,
        )?;
        walker.collect_files(root)
    }

    fn split(&self, text: &str) -> Vec<String> {
        self.chunker
            .chunk_text(text)
            .into_iter()
            .map(|chunk| chunk.text)
            .collect()
    }
}
