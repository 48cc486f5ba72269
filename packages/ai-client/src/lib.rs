//! Provider-agnostic structured completion client.
//!
//! One client, three backends: OpenAI, Anthropic, and any OpenAI-compatible
//! local server. Callers describe the output they want as a Rust type
//! (deriving `JsonSchema` + `Deserialize`), and [`CompletionClient::create`]
//! returns a validated instance of that type or a classified error.
//!
//! # Example
//!
//! ```rust,ignore
//! use ai_client::{CompletionClient, CompletionOptions, Message, Provider, ProviderConfig};
//! use ai_client::StructuredOutput;
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Verdict {
//!     reasoning: String,
//!     score: u8,
//! }
//!
//! impl StructuredOutput for Verdict {
//!     fn validate(&self) -> Result<(), String> {
//!         (self.score <= 5).then_some(()).ok_or("score out of range".into())
//!     }
//! }
//!
//! let provider: Provider = "openai".parse()?;
//! let client = CompletionClient::new(provider, ProviderConfig::from_env(provider)?);
//!
//! let verdict: Verdict = client
//!     .create(
//!         &[Message::system("Rate this lead."), Message::user("...")],
//!         &CompletionOptions::default(),
//!     )
//!     .await?;
//! ```
//!
//! Invalid output never reaches the caller: responses that fail to parse or
//! fail [`StructuredOutput::validate`] consume a retry, and an exhausted
//! budget surfaces as [`Error::CompletionFailed`].

pub mod config;
pub mod error;
pub mod provider;
pub mod schema;
pub mod types;

pub use config::{ProviderConfig, SecretString};
pub use error::{Error, Result};
pub use provider::Provider;
pub use schema::StructuredOutput;
pub use types::{strip_code_blocks, CompletionOptions, Message};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// Structured completion client bound to one backend.
#[derive(Clone)]
pub struct CompletionClient {
    http_client: Client,
    provider: Provider,
    config: ProviderConfig,
}

impl CompletionClient {
    /// Create a client for the given backend with explicit configuration.
    pub fn new(provider: Provider, config: ProviderConfig) -> Self {
        Self {
            http_client: Client::new(),
            provider,
            config,
        }
    }

    /// Create a client with configuration resolved from the environment.
    pub fn from_env(provider: Provider) -> Result<Self> {
        Ok(Self::new(provider, ProviderConfig::from_env(provider)?))
    }

    /// The backend this client talks to.
    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// The resolved configuration.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Request a completion conforming to the schema of `T`.
    ///
    /// Transient failures, malformed JSON, and constraint violations are
    /// retried internally up to the configured budget. The returned value
    /// has passed both deserialization and `T::validate`.
    pub async fn create<T: StructuredOutput>(
        &self,
        messages: &[Message],
        options: &CompletionOptions,
    ) -> Result<T> {
        let model = options.model.as_deref().unwrap_or(&self.config.model);
        let temperature = options.temperature.unwrap_or(self.config.temperature);
        let max_tokens = options.max_tokens.unwrap_or(self.config.max_tokens);
        let max_retries = options.max_retries.unwrap_or(self.config.max_retries).max(1);

        let schema = T::response_schema();
        let schema_name = <T as StructuredOutput>::schema_name();

        let mut last = String::new();
        for attempt in 1..=max_retries {
            let raw = match self
                .request_raw(model, temperature, max_tokens, messages, &schema, &schema_name)
                .await
            {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(
                        provider = %self.provider,
                        attempt,
                        error = %e,
                        "completion request failed"
                    );
                    last = e.to_string();
                    continue;
                }
            };

            match serde_json::from_str::<T>(strip_code_blocks(&raw)) {
                Ok(value) => match value.validate() {
                    Ok(()) => {
                        debug!(provider = %self.provider, model, attempt, "structured completion ok");
                        return Ok(value);
                    }
                    Err(reason) => {
                        warn!(provider = %self.provider, attempt, %reason, "response failed validation");
                        last = format!("constraint violated: {reason}");
                    }
                },
                Err(e) => {
                    warn!(provider = %self.provider, attempt, error = %e, "response did not match schema");
                    last = format!("schema mismatch: {e}");
                }
            }
        }

        Err(Error::CompletionFailed {
            attempts: max_retries,
            last,
        })
    }

    /// Dispatch one request to the backend and return the raw JSON text of
    /// the structured payload.
    async fn request_raw(
        &self,
        model: &str,
        temperature: f32,
        max_tokens: u32,
        messages: &[Message],
        schema: &Value,
        schema_name: &str,
    ) -> Result<String> {
        match self.provider {
            Provider::OpenAi => {
                let format = ResponseFormat {
                    format_type: "json_schema".to_string(),
                    json_schema: Some(JsonSchemaFormat {
                        name: schema_name.to_string(),
                        strict: true,
                        schema: schema.clone(),
                    }),
                };
                self.request_openai_compat(model, temperature, max_tokens, messages.to_vec(), format)
                    .await
            }
            Provider::LocalCompatible => {
                // Most local servers only support json_object mode, so the
                // schema rides along in an extra system message.
                let mut messages = messages.to_vec();
                messages.insert(
                    0,
                    Message::system(format!(
                        "Respond with a single JSON object matching this schema, no prose:\n{}",
                        schema
                    )),
                );
                let format = ResponseFormat {
                    format_type: "json_object".to_string(),
                    json_schema: None,
                };
                self.request_openai_compat(model, temperature, max_tokens, messages, format)
                    .await
            }
            Provider::Anthropic => {
                self.request_anthropic(model, temperature, max_tokens, messages, schema, schema_name)
                    .await
            }
        }
    }

    /// OpenAI chat-completions wire format, shared by OpenAI and local servers.
    async fn request_openai_compat(
        &self,
        model: &str,
        temperature: f32,
        max_tokens: u32,
        messages: Vec<Message>,
        response_format: ResponseFormat,
    ) -> Result<String> {
        let request = OpenAiRequest {
            model: model.to_string(),
            messages,
            temperature,
            max_tokens,
            response_format,
        };

        let mut builder = self
            .http_client
            .post(format!("{}/chat/completions", self.config.base_url))
            .header("Content-Type", "application/json");

        if let Some(key) = &self.config.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key.expose()));
        }

        let response = builder
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("HTTP {status}: {error_text}")));
        }

        let parsed: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Api("empty choices in completion response".into()))
    }

    /// Anthropic messages API. Structured output is obtained by forcing a
    /// single tool call whose input schema is the response schema.
    async fn request_anthropic(
        &self,
        model: &str,
        temperature: f32,
        max_tokens: u32,
        messages: &[Message],
        schema: &Value,
        schema_name: &str,
    ) -> Result<String> {
        // Anthropic takes system text at the top level, not as a message.
        let system: String = messages
            .iter()
            .filter(|m| m.role == "system")
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let mut turns: Vec<Message> = messages
            .iter()
            .filter(|m| m.role != "system")
            .cloned()
            .collect();
        if turns.is_empty() {
            turns.push(Message::user("Respond using the tool."));
        }

        let request = AnthropicRequest {
            model: model.to_string(),
            max_tokens,
            temperature,
            system,
            messages: turns,
            tools: vec![AnthropicTool {
                name: schema_name.to_string(),
                description: "Record the structured result.".to_string(),
                input_schema: schema.clone(),
            }],
            tool_choice: AnthropicToolChoice {
                choice_type: "tool".to_string(),
                name: schema_name.to_string(),
            },
        };

        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| Error::Config("Anthropic API key missing".into()))?;

        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", api_key.expose())
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!("HTTP {status}: {error_text}")));
        }

        let parsed: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        parsed
            .content
            .into_iter()
            .find(|block| block.block_type == "tool_use")
            .and_then(|block| block.input)
            .map(|input| input.to_string())
            .ok_or_else(|| Error::Api("no tool_use block in Anthropic response".into()))
    }
}

// Wire types

#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    json_schema: Option<JsonSchemaFormat>,
}

#[derive(Serialize)]
struct JsonSchemaFormat {
    name: String,
    strict: bool,
    schema: Value,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: String,
}

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    system: String,
    messages: Vec<Message>,
    tools: Vec<AnthropicTool>,
    tool_choice: AnthropicToolChoice,
}

#[derive(Serialize)]
struct AnthropicTool {
    name: String,
    description: String,
    input_schema: Value,
}

#[derive(Serialize)]
struct AnthropicToolChoice {
    #[serde(rename = "type")]
    choice_type: String,
    name: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicBlock>,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    input: Option<Value>,
}
