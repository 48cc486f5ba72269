//! Message and option types for completion requests.

use serde::{Deserialize, Serialize};

/// Chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Role: "system", "user", "assistant"
    pub role: String,

    /// Message content
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Per-call overrides. Any field left `None` falls back to the value in
/// [`ProviderConfig`](crate::ProviderConfig).
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Override the configured model.
    pub model: Option<String>,

    /// Override the configured temperature.
    pub temperature: Option<f32>,

    /// Override the configured max output tokens.
    pub max_tokens: Option<u32>,

    /// Override the configured retry budget.
    pub max_retries: Option<u32>,
}

impl CompletionOptions {
    /// Start from all-defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model for this call.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature for this call.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max output tokens for this call.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the retry budget for this call.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }
}

/// Strip markdown code fences from a model response.
///
/// Local servers in JSON mode occasionally wrap output in ```json fences
/// despite instructions.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}
