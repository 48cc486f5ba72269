//! Fetch collaborator traits.
//!
//! Both fetchers are best-effort by contract: they never error past this
//! boundary. A failed website fetch is an empty string, a failed profile
//! lookup is an empty [`Profile`]. The enricher decides what degraded
//! inputs mean for the score.

use async_trait::async_trait;

use crate::types::Profile;

/// Fetches best-effort plain text for a URL. No retries.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    /// Returns visible page text, or an empty string on any failure.
    async fn fetch_text(&self, url: &str) -> String;
}

/// Looks up a public profile by slug.
#[async_trait]
pub trait ProfileFetcher: Send + Sync {
    /// Returns the profile, or `Profile::default()` on any failure.
    async fn fetch_profile(&self, slug: &str) -> Profile;
}
