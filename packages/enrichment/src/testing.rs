//! Mock collaborators for testing the pipeline without network or LLM
//! calls.
//!
//! Mocks are cheaply cloneable (shared interior) so a test can keep a
//! handle for assertions after handing one to the enricher or runner.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::checkpoint::Checkpoint;
use crate::error::Result;
use crate::fetch::{ProfileFetcher, TextFetcher};
use crate::prompts::ScoringPrompt;
use crate::scorer::LeadScorer;
use crate::types::{LeadScore, Profile, ScoredContact};

/// Text fetcher returning canned page text. Unknown URLs yield an empty
/// string, matching the production failure contract.
#[derive(Clone, Default)]
pub struct MockTextFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockTextFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register page text for a URL.
    pub fn with_page(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), text.into());
        self
    }

    /// URLs fetched so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl TextFetcher for MockTextFetcher {
    async fn fetch_text(&self, url: &str) -> String {
        self.calls.write().unwrap().push(url.to_string());
        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_default()
    }
}

/// Profile fetcher returning canned profiles. Unknown slugs yield an
/// empty profile.
#[derive(Clone, Default)]
pub struct MockProfileFetcher {
    profiles: Arc<RwLock<HashMap<String, Profile>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockProfileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a profile for a slug.
    pub fn with_profile(self, slug: impl Into<String>, profile: Profile) -> Self {
        self.profiles
            .write()
            .unwrap()
            .insert(slug.into(), profile);
        self
    }

    /// Slugs looked up so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ProfileFetcher for MockProfileFetcher {
    async fn fetch_profile(&self, slug: &str) -> Profile {
        self.calls.write().unwrap().push(slug.to_string());
        self.profiles
            .read()
            .unwrap()
            .get(slug)
            .cloned()
            .unwrap_or_default()
    }
}

/// Deterministic scorer. Returns a fixed response, per-name overrides,
/// or a `CompletionFailed` error when configured to fail.
#[derive(Clone)]
pub struct MockScorer {
    default_response: Arc<RwLock<LeadScore>>,
    overrides: Arc<RwLock<HashMap<String, LeadScore>>>,
    fail: Arc<RwLock<bool>>,
    prompts: Arc<RwLock<Vec<ScoringPrompt>>>,
}

impl Default for MockScorer {
    fn default() -> Self {
        Self {
            default_response: Arc::new(RwLock::new(LeadScore {
                reasoning: "mock reasoning".to_string(),
                score: 3,
                data_message: "mock data message".to_string(),
                sentiment_message: "mock sentiment message".to_string(),
                connection_message: "mock connection message".to_string(),
            })),
            overrides: Arc::new(RwLock::new(HashMap::new())),
            fail: Arc::new(RwLock::new(false)),
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl MockScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the response returned for every prompt.
    pub fn with_response(self, response: LeadScore) -> Self {
        *self.default_response.write().unwrap() = response;
        self
    }

    /// Return `response` whenever the prompt's system message contains
    /// `needle`. Lets a scenario score specific contacts differently.
    pub fn with_response_for(self, needle: impl Into<String>, response: LeadScore) -> Self {
        self.overrides
            .write()
            .unwrap()
            .insert(needle.into(), response);
        self
    }

    /// Make every call fail with `CompletionFailed`.
    pub fn failing(self) -> Self {
        *self.fail.write().unwrap() = true;
        self
    }

    /// Number of scoring calls made.
    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<ScoringPrompt> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl LeadScorer for MockScorer {
    async fn score_lead(&self, prompt: &ScoringPrompt) -> ai_client::Result<LeadScore> {
        self.prompts.write().unwrap().push(prompt.clone());

        if *self.fail.read().unwrap() {
            return Err(ai_client::Error::CompletionFailed {
                attempts: 3,
                last: "mock provider failure".to_string(),
            });
        }

        let overrides = self.overrides.read().unwrap();
        for (needle, response) in overrides.iter() {
            if prompt.system.contains(needle.as_str()) {
                return Ok(response.clone());
            }
        }

        Ok(self.default_response.read().unwrap().clone())
    }
}

/// Checkpoint that records every snapshot in memory, so tests can assert
/// write cadence and shape.
#[derive(Clone, Default)]
pub struct RecordingCheckpoint {
    snapshots: Arc<RwLock<Vec<Vec<ScoredContact>>>>,
}

impl RecordingCheckpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persist calls.
    pub fn writes(&self) -> usize {
        self.snapshots.read().unwrap().len()
    }

    /// Row count of each snapshot, in write order.
    pub fn snapshot_sizes(&self) -> Vec<usize> {
        self.snapshots.read().unwrap().iter().map(Vec::len).collect()
    }

    /// The most recent snapshot.
    pub fn latest(&self) -> Vec<ScoredContact> {
        self.snapshots
            .read()
            .unwrap()
            .last()
            .cloned()
            .unwrap_or_default()
    }
}

impl Checkpoint for RecordingCheckpoint {
    fn persist(&self, rows: &[ScoredContact]) -> Result<()> {
        self.snapshots.write().unwrap().push(rows.to_vec());
        Ok(())
    }
}
