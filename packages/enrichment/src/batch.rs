//! Batch execution: sequential enrichment with periodic checkpoints.
//!
//! Rows are independent and processed strictly in input order. The only
//! error that aborts a run is a failed checkpoint write (and, upstream,
//! a missing input column); everything record-level has already been
//! degraded to a score-0 result by the enricher.

use std::time::Duration;

use tracing::info;

use crate::checkpoint::Checkpoint;
use crate::enricher::RecordEnricher;
use crate::error::Result;
use crate::fetch::{ProfileFetcher, TextFetcher};
use crate::scorer::LeadScorer;
use crate::types::{ContactRecord, ScoredContact};

/// Batch tuning knobs.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Persist a checkpoint after every N processed records. The final
    /// record always checkpoints regardless.
    pub checkpoint_every: usize,

    /// Flat delay between records to respect downstream rate limits.
    /// Not adaptive by design.
    pub pacing: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            checkpoint_every: 10,
            pacing: Duration::from_secs(1),
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_checkpoint_every(mut self, n: usize) -> Self {
        self.checkpoint_every = n.max(1);
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Runs a full batch through a [`RecordEnricher`], checkpointing as it goes.
pub struct BatchRunner<T, P, S, C> {
    enricher: RecordEnricher<T, P, S>,
    checkpoint: C,
    config: BatchConfig,
}

impl<T, P, S, C> BatchRunner<T, P, S, C>
where
    T: TextFetcher,
    P: ProfileFetcher,
    S: LeadScorer,
    C: Checkpoint,
{
    pub fn new(enricher: RecordEnricher<T, P, S>, checkpoint: C, config: BatchConfig) -> Self {
        Self {
            enricher,
            checkpoint,
            config,
        }
    }

    /// Process every contact in order and return the accumulated results.
    ///
    /// Checkpoints after every `checkpoint_every` records and
    /// unconditionally after the last one, each time overwriting the
    /// previous snapshot with the full result set so far.
    pub async fn run(
        &self,
        contacts: &[ContactRecord],
        sender_context: &str,
    ) -> Result<Vec<ScoredContact>> {
        let total = contacts.len();
        // Guard against a zero written directly to the public field.
        let checkpoint_every = self.config.checkpoint_every.max(1);
        let mut results: Vec<ScoredContact> = Vec::with_capacity(total);

        for (index, contact) in contacts.iter().enumerate() {
            let row = index + 1;
            info!(row, total, contact = %contact.full_name(), "processing contact");

            let result = self.enricher.enrich(contact, sender_context).await;
            results.push(ScoredContact {
                contact: contact.clone(),
                result,
            });

            let is_last = row == total;
            if row % checkpoint_every == 0 || is_last {
                self.checkpoint.persist(&results)?;
                info!(rows = results.len(), "checkpoint persisted");
            }

            if !is_last && !self.config.pacing.is_zero() {
                tokio::time::sleep(self.config.pacing).await;
            }
        }

        for lead in top_leads(&results, 5) {
            info!(
                contact = %lead.result.name,
                score = lead.result.score,
                reasoning = %lead.result.reasoning,
                "top lead"
            );
        }

        Ok(results)
    }
}

/// The `n` best results, descending by score. Ties keep input order.
pub fn top_leads(results: &[ScoredContact], n: usize) -> Vec<&ScoredContact> {
    let mut ranked: Vec<&ScoredContact> = results.iter().collect();
    ranked.sort_by(|a, b| b.result.score.cmp(&a.result.score));
    ranked.truncate(n);
    ranked
}
