//! Keyword search over indexed chunks.
//!
//! The index lives in memory only; it is rebuilt by re-uploading
//! documents after a restart.

mod lexical;

pub use lexical::{tokenize, LexicalIndex, DEFAULT_K};
