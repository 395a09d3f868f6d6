//! Document ingestion module.
//!
//! Turns uploaded files into chunk lists ready for the lexical
//! index. Key features:
//!
//! - UTF-8 safe character-based chunking
//! - Configurable chunk size and overlap
//! - Text extraction from PDF and DOCX uploads
//! - Whitespace normalisation of every upload
//! - Directory walking with pattern matching
//!
//! # Safety
//!
//! The chunker uses character-based slicing via `char_indices()`
//! to ensure UTF-8 safety. This prevents panics when processing
//! files containing emojis, multi-byte characters, or other
//! special Unicode sequences.

pub mod chunker;
pub mod extract;
pub mod loader;
pub mod pipeline;
pub mod walker;

pub use chunker::{split, Chunker, DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};
pub use extract::{extract_text, DocumentFormat};
pub use loader::{normalize_whitespace, DocumentLoader};
pub use pipeline::{IngestPipeline, PreparedDocument};
pub use walker::DocumentWalker;
