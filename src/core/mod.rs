//! Core domain logic (protocol-agnostic)
//!
//! This module contains all business logic that is independent
//! of transport protocols (HTTP, CLI).
//!
//! # Architecture
//!
//! - **config**: Configuration loading (TOML + environment)
//! - **error**: Error types and Result alias
//! - **types**: Domain data structures
//! - **xdg**: XDG directory handling
//! - **indexer**: Loading, normalising and chunking documents
//! - **search**: In-memory keyword index
//! - **storage**: SQLite document records and chat logs
//! - **llm**: Prompt assembly and the generation client
//! - **services**: Unified service container

pub mod config;
pub mod error;
pub mod indexer;
pub mod llm;
pub mod search;
pub mod services;
pub mod storage;
pub mod types;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{AdvisorError, Result};
pub use services::Services;
