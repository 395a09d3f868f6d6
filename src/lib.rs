//! Advisor - Retrieval-Augmented Academic Advising Service
//!
//! Answers student questions by retrieving relevant passages from
//! uploaded handbooks and policies with a keyword index, then asking
//! a hosted language model to answer with that context.
//!
//! # Architecture
//!
//! The codebase is organized into three main modules:
//!
//! - **core**: Domain logic (protocol-agnostic)
//!   - config, error, types, xdg
//!   - indexer (loading, normalising, chunking)
//!   - search (in-memory keyword index)
//!   - storage (SQLite document records and chat logs)
//!   - llm (prompt assembly, Gemini client)
//!   - services (unified service container)
//!
//! - **http**: REST API adapter (depends on core)
//!   - handlers, middleware, error mapping
//!
//! - **cli**: Command-line adapter (depends on core)
//!
//! # Key Features
//!
//! - UTF-8 safe chunking (character-based, never panics)
//! - Deterministic occurrence-count ranking (no embeddings)
//! - Upload compensation: a record exists only if its chunks do
//! - Ordered model fallback for generation

// Core domain logic (protocol-agnostic)
pub mod core;

// HTTP REST adapter
pub mod http;

// Command-line adapter
pub mod cli;

// Re-export commonly used types for convenience
pub use core::config::Config;
pub use core::error::{AdvisorError, Result};
pub use core::indexer::{split, Chunker};
pub use core::search::LexicalIndex;
pub use core::services::Services;
pub use core::types::*;
