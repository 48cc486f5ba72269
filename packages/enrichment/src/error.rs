//! Typed errors for the enrichment library.
//!
//! Only batch-fatal conditions live here. Record-level failures (bad
//! profile URL, unreachable website, exhausted completion retries) never
//! surface as errors; they degrade to a score-0 result inside the
//! enricher so one bad record can't abort a batch.

use thiserror::Error;

/// Errors that abort a batch.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// A required input column is absent after header normalization.
    #[error("missing required column: {field}")]
    MissingColumn { field: String },

    /// CSV read or write failed
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Checkpoint or input file I/O failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (missing credentials, bad settings)
    #[error("config error: {0}")]
    Config(String),
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichmentError>;
