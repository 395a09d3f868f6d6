//! Answer generation.
//!
//! The service only depends on the [`GenerationClient`] trait; the
//! hosted Gemini API is one implementation and tests plug in their
//! own.

mod gemini;
mod prompt;

pub use gemini::GeminiClient;
pub use prompt::{PromptBuilder, NO_CONTEXT};

use async_trait::async_trait;

use crate::core::error::Result;

/// A text generation backend
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Generate a completion for a fully assembled prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
