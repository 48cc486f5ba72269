//! Supported LLM backends.
//!
//! Providers form a closed set: an unrecognized name fails with
//! [`Error::UnsupportedProvider`](crate::Error::UnsupportedProvider) when
//! parsed, before any client is constructed or any request sent.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A supported LLM backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// OpenAI chat completions with strict `json_schema` response format.
    OpenAi,

    /// Anthropic messages API, structured output via a forced tool call.
    Anthropic,

    /// Any OpenAI-compatible local server (Ollama, llama.cpp, vLLM).
    /// Uses `json_object` mode since most local servers lack strict schemas.
    LocalCompatible,
}

impl Provider {
    /// Canonical lowercase name, used for config lookup and logging.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
            Provider::LocalCompatible => "local",
        }
    }

    /// Default model when none is configured.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::Anthropic => "claude-sonnet-4-5",
            Provider::LocalCompatible => "llama3.1",
        }
    }

    /// Default API base URL. `LocalCompatible` has no sensible default
    /// and must be configured explicitly.
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("https://api.openai.com/v1"),
            Provider::Anthropic => Some("https://api.anthropic.com"),
            Provider::LocalCompatible => None,
        }
    }

    /// Environment variable holding the API key for this provider.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::LocalCompatible => "LOCAL_LLM_API_KEY",
        }
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "anthropic" => Ok(Provider::Anthropic),
            "local" | "local-compatible" => Ok(Provider::LocalCompatible),
            other => Err(Error::UnsupportedProvider(other.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
