//! Prompt assembly for the academic adviser.

use crate::core::types::{ChatMessage, ChatRole};

/// Context line used when retrieval returns nothing
pub const NO_CONTEXT: &str = "No specific context available.";

/// Builds the single-turn prompt sent to the model.
///
/// Layout:
///
/// ```text
/// {system prompt}
///
/// Context Information:
/// {chunks joined by a blank line}
///
/// Chat History:
/// Human: ...
/// Assistant: ...
///
/// Student Question: {question}
///
/// Answer:
/// ```
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system_prompt: String,
}

impl PromptBuilder {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    pub fn build(&self, question: &str, context: &[String], history: &[ChatMessage]) -> String {
        let context = if context.is_empty() {
            NO_CONTEXT.to_string()
        } else {
            context.join("\n\n")
        };

        let history: String = history
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    ChatRole::Human => "Human",
                    ChatRole::Ai => "Assistant",
                };
                format!("{role}: {}\n", msg.content)
            })
            .collect();

        format!(
            "{}\n\nContext Information:\n{context}\n\nChat History:\n{history}\n\nStudent Question: {question}\n\nAnswer:",
            self.system_prompt.trim_end()
        )
    }
}
