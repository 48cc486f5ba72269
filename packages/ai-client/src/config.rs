//! Per-provider configuration with secure credential handling.
//!
//! Configuration is resolved once from the environment at construction and
//! is immutable for the process lifetime. Uses the `secrecy` crate so API
//! keys never show up in logs or debug output.

use std::fmt;

use secrecy::{ExposeSecret, SecretBox};

use crate::error::{Error, Result};
use crate::provider::Provider;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret for use in a request header. Only call at the
    /// point of use.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Settings for one provider: credentials, model, and call defaults.
///
/// Every field can be overridden per call through
/// [`CompletionOptions`](crate::CompletionOptions).
#[derive(Clone)]
pub struct ProviderConfig {
    /// API key. Optional for local servers that don't authenticate.
    pub api_key: Option<SecretString>,

    /// Model identifier sent with each request.
    pub model: String,

    /// API base URL.
    pub base_url: String,

    /// Default sampling temperature.
    pub temperature: f32,

    /// Default max output tokens.
    pub max_tokens: u32,

    /// Default retry budget for a structured completion.
    pub max_retries: u32,
}

impl ProviderConfig {
    /// Build a config with explicit credentials and provider defaults.
    pub fn new(provider: Provider, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key)),
            model: provider.default_model().to_string(),
            base_url: provider
                .default_base_url()
                .unwrap_or_default()
                .to_string(),
            temperature: 0.2,
            max_tokens: 1024,
            max_retries: 3,
        }
    }

    /// Resolve configuration from the environment for one provider.
    ///
    /// Reads `<PROVIDER>_API_KEY` (e.g. `OPENAI_API_KEY`) and, for local
    /// servers, `LOCAL_LLM_BASE_URL`. Model can be overridden with
    /// `OPENAI_MODEL`, `ANTHROPIC_MODEL`, or `LOCAL_LLM_MODEL`.
    pub fn from_env(provider: Provider) -> Result<Self> {
        let api_key = std::env::var(provider.api_key_env()).ok();

        let base_url = match provider.default_base_url() {
            Some(default) => default.to_string(),
            None => std::env::var("LOCAL_LLM_BASE_URL").map_err(|_| {
                Error::Config("LOCAL_LLM_BASE_URL not set for local provider".into())
            })?,
        };

        if api_key.is_none() && provider != Provider::LocalCompatible {
            return Err(Error::Config(format!(
                "{} not set",
                provider.api_key_env()
            )));
        }

        let model_env = match provider {
            Provider::OpenAi => "OPENAI_MODEL",
            Provider::Anthropic => "ANTHROPIC_MODEL",
            Provider::LocalCompatible => "LOCAL_LLM_MODEL",
        };
        let model = std::env::var(model_env)
            .unwrap_or_else(|_| provider.default_model().to_string());

        Ok(Self {
            api_key: api_key.map(SecretString::new),
            model,
            base_url,
            temperature: 0.2,
            max_tokens: 1024,
            max_retries: 3,
        })
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies, Azure, local servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the default max output tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the default retry budget.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_not_in_debug_or_display() {
        let secret = SecretString::new("sk-very-secret");
        assert!(!format!("{:?}", secret).contains("sk-very"));
        assert!(!format!("{}", secret).contains("sk-very"));
        assert_eq!(secret.expose(), "sk-very-secret");
    }

    #[test]
    fn config_debug_redacts_key() {
        let config = ProviderConfig::new(Provider::OpenAi, "sk-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("gpt-4o-mini"));
    }

    #[test]
    fn builders_override_defaults() {
        let config = ProviderConfig::new(Provider::Anthropic, "key")
            .with_model("claude-haiku-4-5")
            .with_temperature(0.0)
            .with_max_retries(5);

        assert_eq!(config.model, "claude-haiku-4-5");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.base_url, "https://api.anthropic.com");
    }
}
