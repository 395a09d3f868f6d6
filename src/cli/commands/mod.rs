//! CLI command implementations
//!
//! Each command module handles argument parsing and execution for a
//! specific CLI command.

pub mod ask;
pub mod completions;
pub mod config;
pub mod docs;
pub mod search;
pub mod split;

// Re-export argument types for use in mod.rs
pub use ask::AskArgs;
pub use completions::CompletionsArgs;
pub use config::ConfigArgs;
pub use docs::ListDocsArgs;
pub use search::SearchArgs;
pub use split::SplitArgs;
