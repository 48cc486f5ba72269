//! Lead scoring trait and the completion-client implementation.
//!
//! The pipeline depends on the [`LeadScorer`] trait so tests can
//! substitute a deterministic stub; production wires in
//! [`ai_client::CompletionClient`], which carries the retry/validation
//! contract for structured output.

use ai_client::{CompletionClient, CompletionOptions, Message};
use async_trait::async_trait;

use crate::prompts::ScoringPrompt;
use crate::types::LeadScore;

/// Produces a validated [`LeadScore`] for one prompt, or a classified
/// error once the provider's retry budget is exhausted.
#[async_trait]
pub trait LeadScorer: Send + Sync {
    async fn score_lead(&self, prompt: &ScoringPrompt) -> ai_client::Result<LeadScore>;
}

#[async_trait]
impl LeadScorer for CompletionClient {
    async fn score_lead(&self, prompt: &ScoringPrompt) -> ai_client::Result<LeadScore> {
        let messages = [
            Message::system(&prompt.system),
            Message::user(&prompt.user),
        ];
        self.create(&messages, &CompletionOptions::default()).await
    }
}
