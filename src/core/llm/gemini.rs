//! Google Gemini `generateContent` client with model fallback.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use super::GenerationClient;
use crate::core::config::LlmConfig;
use crate::core::error::{AdvisorError, Result};

/// Header carrying the API key; the request URL never contains it
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Calls the hosted Gemini API, trying candidate models in order.
pub struct GeminiClient {
    api_key: Option<String>,
    base_url: String,
    models: Vec<String>,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Build a client from `[llm]` configuration.
    ///
    /// A missing API key is not an error here; it is reported on the
    /// first `generate` call so the server can still start and serve
    /// uploads and search.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_sec))
            .build()?;

        Ok(Self {
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            models: config.models.clone(),
            client,
        })
    }

    /// Candidate models in the order they are tried
    pub fn models(&self) -> &[String] {
        &self.models
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    async fn generate_with(&self, api_key: &str, model: &str, prompt: &str) -> Result<String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(redact)?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AdvisorError::GenerationFailed(format!(
                "{model} returned {status}: {}",
                truncate(&detail, 200)
            )));
        }

        let payload: Value = response.json().await.map_err(redact)?;
        extract_text(&payload).ok_or_else(|| {
            AdvisorError::GenerationFailed(format!("{model} returned no candidate text"))
        })
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AdvisorError::ConfigError("GOOGLE_API_KEY environment variable is not set".to_string())
        })?;

        let mut attempts = Vec::with_capacity(self.models.len());

        for (idx, model) in self.models.iter().enumerate() {
            match self.generate_with(api_key, model, prompt).await {
                Ok(text) => {
                    if idx > 0 {
                        tracing::info!("Fell back to model {} after {} failure(s)", model, idx);
                    }
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!("Model {} failed: {}", model, e);
                    attempts.push(format!("{model}: {e}"));
                }
            }
        }

        Err(AdvisorError::GenerationExhausted { attempts })
    }
}

/// `candidates[0].content.parts[*].text`, concatenated
fn extract_text(payload: &Value) -> Option<String> {
    let parts = payload.pointer("/candidates/0/content/parts")?.as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Transport errors echo the request URL; drop it before the error is logged.
fn redact(err: reqwest::Error) -> AdvisorError {
    AdvisorError::HttpClientError(err.without_url())
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
