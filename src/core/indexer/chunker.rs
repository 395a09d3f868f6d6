//! UTF-8 safe sliding-window chunking.
//!
//! Windows are measured in characters, never bytes, and every
//! boundary is taken from `char_indices()`, so slicing can not
//! split a multi-byte sequence.
//!
//! # Example
//!
//! ```
//! use advisor::core::indexer::Chunker;
//!
//! let chunker = Chunker::new(1000, 200).unwrap();
//! let chunks = chunker.chunk_text("Registration opens Monday.");
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].text, "Registration opens Monday.");
//! ```

use crate::core::error::{AdvisorError, Result};
use crate::core::types::Chunk;

/// Default window size in characters
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive windows in characters
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Split `text` into trimmed, overlapping windows.
///
/// Fails with [`AdvisorError::InvalidConfiguration`] when
/// `chunk_size` is zero or `chunk_overlap >= chunk_size`.
///
/// ```
/// use advisor::core::indexer::split;
///
/// let chunks = split("0123456789ABCDEFGHIJ", 10, 2).unwrap();
/// assert_eq!(chunks, vec!["0123456789", "89ABCDEFGH", "GHIJ"]);
/// ```
pub fn split(text: &str, chunk_size: usize, chunk_overlap: usize) -> Result<Vec<String>> {
    let chunker = Chunker::new(chunk_size, chunk_overlap)?;
    Ok(chunker
        .chunk_text(text)
        .into_iter()
        .map(|chunk| chunk.text)
        .collect())
}

/// Validated chunking configuration.
///
/// Holding a `Chunker` proves `0 < overlap < chunk_size`, so the
/// window always advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunker {
    /// Number of characters per window
    chunk_size: usize,

    /// Number of characters shared by consecutive windows
    overlap: usize,
}

impl Default for Chunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl Chunker {
    /// Create a new chunker.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `chunk_size` is 0 or if
    /// `overlap >= chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(AdvisorError::InvalidConfiguration(
                "chunk_size must be > 0".to_string(),
            ));
        }
        if overlap >= chunk_size {
            return Err(AdvisorError::InvalidConfiguration(format!(
                "chunk_overlap ({overlap}) must be < chunk_size ({chunk_size})"
            )));
        }

        Ok(Self {
            chunk_size,
            overlap,
        })
    }

    /// Get the chunk size in characters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the overlap size in characters.
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between the starts of consecutive windows.
    pub fn stride(&self) -> usize {
        self.chunk_size - self.overlap
    }

    /// Upper bound on the number of chunks for a text of
    /// `char_count` characters.
    pub fn max_chunks(&self, char_count: usize) -> usize {
        char_count.div_ceil(self.stride())
    }

    /// Cut `text` into windows.
    ///
    /// Each window `[start, start + chunk_size)` is trimmed and kept
    /// only if something remains. Offsets describe the untrimmed
    /// window in bytes; `chunk_index` counts kept chunks only.
    pub fn chunk_text(&self, text: &str) -> Vec<Chunk> {
        // (byte offset, char) pairs; all slicing goes through these
        let char_indices: Vec<(usize, char)> = text.char_indices().collect();
        let char_count = char_indices.len();

        let mut chunks = Vec::with_capacity(self.max_chunks(char_count));
        let mut char_start = 0;

        while char_start < char_count {
            let char_end = (char_start + self.chunk_size).min(char_count);

            let byte_start = char_indices[char_start].0;
            let byte_end = if char_end < char_count {
                char_indices[char_end].0
            } else {
                text.len()
            };

            let window = text[byte_start..byte_end].trim();
            if !window.is_empty() {
                chunks.push(Chunk {
                    text: window.to_string(),
                    start_offset: byte_start,
                    end_offset: byte_end,
                    chunk_index: chunks.len(),
                });
            }

            char_start += self.stride();
        }

        chunks
    }
}
