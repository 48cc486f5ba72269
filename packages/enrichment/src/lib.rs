//! Batch contact enrichment pipeline.
//!
//! Takes a tabular contact export, and for each contact combines scraped
//! website text, a public profile lookup, and a structured LLM completion
//! into a 0-5 relevance score with three outreach message variants.
//! Results are checkpointed incrementally so an interrupted batch leaves a
//! complete snapshot of everything processed so far.
//!
//! # Failure policy
//!
//! Only a missing input column aborts a batch. Record-level problems
//! (an unparseable profile URL, an unreachable website, a failed profile
//! lookup, an exhausted completion retry budget) degrade to a score-0
//! sentinel result for that row and the batch keeps going.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ai_client::CompletionClient;
//! use enrichment::{
//!     read_contacts, BatchConfig, BatchRunner, CsvCheckpoint, HttpProfileFetcher,
//!     HttpTextFetcher, RecordEnricher,
//! };
//!
//! let contacts = read_contacts("contacts.csv")?;
//! let enricher = RecordEnricher::new(
//!     HttpTextFetcher::new(),
//!     HttpProfileFetcher::from_env()?,
//!     CompletionClient::from_env("openai".parse()?)?,
//! );
//! let runner = BatchRunner::new(
//!     enricher,
//!     CsvCheckpoint::new("lead_scores.csv"),
//!     BatchConfig::default(),
//! );
//! let results = runner.run(&contacts, sender_context).await?;
//! ```

pub mod batch;
pub mod checkpoint;
pub mod enricher;
pub mod error;
pub mod fetch;
pub mod mapper;
pub mod profile;
pub mod prompts;
pub mod scorer;
pub mod testing;
pub mod types;
pub mod website;

pub use batch::{top_leads, BatchConfig, BatchRunner};
pub use checkpoint::{Checkpoint, CsvCheckpoint, OUTPUT_COLUMNS};
pub use enricher::RecordEnricher;
pub use error::{EnrichmentError, Result};
pub use fetch::{ProfileFetcher, TextFetcher};
pub use mapper::{map_contacts, read_contacts, ColumnMap, REQUIRED_COLUMNS};
pub use profile::{extract_profile_slug, HttpProfileFetcher, ProfileCredentials};
pub use prompts::{build_scoring_prompt, ScoringPrompt};
pub use scorer::LeadScorer;
pub use types::{ContactRecord, EnrichmentResult, LeadScore, Profile, ScoredContact};
pub use website::HttpTextFetcher;
