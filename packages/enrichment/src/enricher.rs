//! Single-record enrichment.
//!
//! One attempt per record, no retries at this layer. Every record-level
//! failure degrades to the score-0 sentinel instead of propagating, so
//! the batch always produces exactly one result per contact.
//!
//! Per-record states:
//! `Start -> UrlInvalid (terminal, score 0)` or
//! `Start -> ProfileResolved | ProfileMissing -> Scored (terminal)
//!         | ScoringFailed (terminal, score 0)`.

use tracing::{debug, warn};

use crate::fetch::{ProfileFetcher, TextFetcher};
use crate::profile::extract_profile_slug;
use crate::prompts::build_scoring_prompt;
use crate::scorer::LeadScorer;
use crate::types::{ContactRecord, EnrichmentResult};

/// Orchestrates the fetchers and the scorer for one contact at a time.
pub struct RecordEnricher<T, P, S> {
    text_fetcher: T,
    profile_fetcher: P,
    scorer: S,
}

impl<T, P, S> RecordEnricher<T, P, S>
where
    T: TextFetcher,
    P: ProfileFetcher,
    S: LeadScorer,
{
    pub fn new(text_fetcher: T, profile_fetcher: P, scorer: S) -> Self {
        Self {
            text_fetcher,
            profile_fetcher,
            scorer,
        }
    }

    /// Enrich one contact. Infallible by contract: failures become
    /// score-0 results with the cause in the reasoning field.
    pub async fn enrich(&self, contact: &ContactRecord, sender_context: &str) -> EnrichmentResult {
        let name = contact.full_name();

        // Empty website text is permitted; the prompt instructs the model
        // that empty content forces a score of 0.
        let website_text = self.text_fetcher.fetch_text(&contact.website).await;
        if website_text.is_empty() {
            debug!(contact = %name, website = %contact.website, "no website content");
        }

        // An unparseable profile URL is the only branch that skips the LLM.
        let slug = match extract_profile_slug(&contact.profile_url) {
            Some(slug) => slug,
            None => {
                warn!(contact = %name, url = %contact.profile_url, "invalid profile URL");
                return EnrichmentResult::unusable(name, "Invalid profile URL");
            }
        };

        let profile = self.profile_fetcher.fetch_profile(slug).await;
        let profile_ref = if profile.is_empty() {
            debug!(contact = %name, slug, "profile lookup returned nothing");
            None
        } else {
            Some(&profile)
        };

        let prompt = build_scoring_prompt(contact, &website_text, profile_ref, sender_context);

        match self.scorer.score_lead(&prompt).await {
            Ok(score) => EnrichmentResult::from_score(name, score),
            Err(e) => {
                warn!(contact = %name, error = %e, "scoring failed");
                EnrichmentResult::unusable(name, format!("Error: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockProfileFetcher, MockScorer, MockTextFetcher};
    use crate::types::{LeadScore, Profile};

    fn contact(profile_url: &str) -> ContactRecord {
        ContactRecord {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@fleet.test".into(),
            website: "https://fleet.test".into(),
            title: "Rear Admiral".into(),
            profile_url: profile_url.into(),
        }
    }

    fn scored(score: u8) -> LeadScore {
        LeadScore {
            reasoning: "strong fit".into(),
            score,
            data_message: "d".into(),
            sentiment_message: "s".into(),
            connection_message: "c".into(),
        }
    }

    #[tokio::test]
    async fn invalid_profile_url_short_circuits_without_llm_call() {
        let scorer = MockScorer::new().with_response(scored(4));
        let enricher = RecordEnricher::new(
            MockTextFetcher::new().with_page("https://fleet.test", "content"),
            MockProfileFetcher::new(),
            scorer.clone(),
        );

        let result = enricher
            .enrich(&contact("https://example.com/not-a-profile"), "ctx")
            .await;

        assert_eq!(result.score, 0);
        assert!(result.reasoning.to_lowercase().contains("invalid"));
        assert_eq!(scorer.call_count(), 0);
    }

    #[tokio::test]
    async fn successful_scoring_maps_fields() {
        let scorer = MockScorer::new().with_response(scored(4));
        let enricher = RecordEnricher::new(
            MockTextFetcher::new().with_page("https://fleet.test", "We build compilers."),
            MockProfileFetcher::new().with_profile(
                "gracehopper",
                Profile {
                    title: Some("Rear Admiral".into()),
                    ..Default::default()
                },
            ),
            scorer.clone(),
        );

        let result = enricher
            .enrich(&contact("https://linkedin.com/in/gracehopper"), "ctx")
            .await;

        assert_eq!(result.name, "Grace Hopper");
        assert_eq!(result.score, 4);
        assert_eq!(result.reasoning, "strong fit");
        assert_eq!(result.data_message, "d");
        assert_eq!(scorer.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_profile_is_not_fatal() {
        let scorer = MockScorer::new().with_response(scored(2));
        let enricher = RecordEnricher::new(
            MockTextFetcher::new().with_page("https://fleet.test", "content"),
            MockProfileFetcher::new(), // lookup returns empty profile
            scorer.clone(),
        );

        let result = enricher
            .enrich(&contact("https://linkedin.com/in/gracehopper"), "ctx")
            .await;

        assert_eq!(result.score, 2);
        // The prompt must have flagged the missing profile.
        let prompts = scorer.prompts();
        assert!(prompts[0].system.contains("(profile unavailable)"));
    }

    #[tokio::test]
    async fn scoring_failure_degrades_to_zero() {
        let scorer = MockScorer::new().failing();
        let enricher = RecordEnricher::new(
            MockTextFetcher::new().with_page("https://fleet.test", "content"),
            MockProfileFetcher::new(),
            scorer.clone(),
        );

        let result = enricher
            .enrich(&contact("https://linkedin.com/in/gracehopper"), "ctx")
            .await;

        assert_eq!(result.score, 0);
        assert!(result.reasoning.starts_with("Error:"));
    }

    #[tokio::test]
    async fn empty_content_zero_is_a_prompt_rule_not_a_hard_rule() {
        // The zero-on-empty-content rule is an instruction to the model,
        // not post-processing. A model that ignores it has its score kept
        // as-is; this test pins that known behavior.
        let scorer = MockScorer::new().with_response(scored(4));
        let enricher = RecordEnricher::new(
            MockTextFetcher::new(),
            MockProfileFetcher::new(),
            scorer.clone(),
        );

        let result = enricher
            .enrich(&contact("https://linkedin.com/in/gracehopper"), "ctx")
            .await;

        assert_eq!(result.score, 4);
    }

    #[tokio::test]
    async fn empty_website_content_still_reaches_scorer() {
        // Empty content is a prompt-level signal, not a short circuit.
        let scorer = MockScorer::new().with_response(scored(0));
        let enricher = RecordEnricher::new(
            MockTextFetcher::new(), // unknown URL -> empty string
            MockProfileFetcher::new(),
            scorer.clone(),
        );

        let result = enricher
            .enrich(&contact("https://linkedin.com/in/gracehopper"), "ctx")
            .await;

        assert_eq!(scorer.call_count(), 1);
        assert_eq!(result.score, 0);
    }
}
