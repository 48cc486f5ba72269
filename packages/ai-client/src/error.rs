//! Error types for the completion client.

use thiserror::Error;

/// Result type for completion client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Completion client errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Backend name is not one of the supported providers.
    /// Raised at construction time, never at call time.
    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Configuration error (missing API key, missing base URL)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API error (non-2xx response, rate limit, invalid request)
    #[error("API error: {0}")]
    Api(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("parse error: {0}")]
    Parse(String),

    /// Retry budget exhausted; carries the last error seen.
    #[error("completion failed after {attempts} attempts: {last}")]
    CompletionFailed { attempts: u32, last: String },
}
