//! Core data types for the enrichment pipeline.

use ai_client::StructuredOutput;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One input contact, immutable once read. Identity is row position in
/// the input batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub website: String,
    pub title: String,
    pub profile_url: String,
}

impl ContactRecord {
    /// Display name used in results and logs.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Public profile data returned by a [`ProfileFetcher`](crate::ProfileFetcher).
///
/// All fields optional: a failed lookup yields `Profile::default()` and the
/// pipeline continues without it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

impl Profile {
    /// True when the lookup produced nothing usable.
    pub fn is_empty(&self) -> bool {
        self.public_id.is_none()
            && self.headline.is_none()
            && self.title.is_none()
            && self.company.is_none()
            && self.location.is_none()
            && self.summary.is_none()
    }
}

/// The structured contract requested from the LLM for one lead.
///
/// A ranked lead with reasoning and three outreach message variants.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LeadScore {
    /// Short explanation of the score, including any title-mismatch or
    /// missing-data notes.
    pub reasoning: String,

    /// How likely the contact is to buy, 0-5. 0 is reserved for unusable
    /// input and must dominate every other signal.
    #[schemars(range(min = 0, max = 5))]
    pub score: u8,

    /// Outreach message focusing on data-driven benefits.
    pub data_message: String,

    /// Outreach message highlighting success stories with similar companies.
    pub sentiment_message: String,

    /// Outreach message building a personal connection between sender and
    /// recipient.
    pub connection_message: String,
}

impl StructuredOutput for LeadScore {
    fn validate(&self) -> Result<(), String> {
        if self.score > 5 {
            return Err(format!("score {} outside 0-5", self.score));
        }
        Ok(())
    }
}

/// Enrichment output for one contact. Produced exactly once per record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub name: String,
    pub score: u8,
    pub reasoning: String,
    pub data_message: String,
    pub sentiment_message: String,
    pub connection_message: String,
}

impl EnrichmentResult {
    /// The score-0 sentinel: enrichment could not be meaningfully computed.
    /// Message variants are left empty.
    pub fn unusable(name: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            reasoning: reasoning.into(),
            data_message: String::new(),
            sentiment_message: String::new(),
            connection_message: String::new(),
        }
    }

    /// Build a result from a validated [`LeadScore`].
    pub fn from_score(name: impl Into<String>, score: LeadScore) -> Self {
        Self {
            name: name.into(),
            score: score.score,
            reasoning: score.reasoning,
            data_message: score.data_message,
            sentiment_message: score.sentiment_message,
            connection_message: score.connection_message,
        }
    }
}

/// A contact joined with its enrichment result: one checkpoint row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredContact {
    pub contact: ContactRecord,
    pub result: EnrichmentResult,
}
