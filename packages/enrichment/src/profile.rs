//! Profile lookup over HTTP with injected credentials.
//!
//! Credentials are supplied at construction (never embedded in logic) and
//! the password is held in a [`SecretString`] so it can't leak through
//! logs. The fetch boundary never raises: any failure is logged and
//! degrades to an empty [`Profile`].

use std::sync::LazyLock;
use std::time::Duration;

use ai_client::SecretString;
use async_trait::async_trait;
use regex::Regex;
use tracing::warn;

use crate::error::{EnrichmentError, Result};
use crate::fetch::ProfileFetcher;
use crate::types::Profile;

static PROFILE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"linkedin\.com/in/([^/?#]+)").expect("valid regex"));

/// Extract the profile slug from a `.../in/<slug>` URL.
///
/// Returns `None` when the URL doesn't match; that is the one condition
/// that short-circuits enrichment without an LLM call.
pub fn extract_profile_slug(url: &str) -> Option<&str> {
    PROFILE_URL_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Account credentials for the profile lookup service.
#[derive(Clone)]
pub struct ProfileCredentials {
    pub username: String,
    pub password: SecretString,
}

impl ProfileCredentials {
    /// Build credentials from explicit values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password),
        }
    }

    /// Resolve from `PROFILE_API_USERNAME` / `PROFILE_API_PASSWORD`.
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("PROFILE_API_USERNAME")
            .map_err(|_| EnrichmentError::Config("PROFILE_API_USERNAME not set".into()))?;
        let password = std::env::var("PROFILE_API_PASSWORD")
            .map_err(|_| EnrichmentError::Config("PROFILE_API_PASSWORD not set".into()))?;
        Ok(Self::new(username, password))
    }
}

impl std::fmt::Debug for ProfileCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Profile fetcher against an HTTP lookup API.
pub struct HttpProfileFetcher {
    client: reqwest::Client,
    base_url: String,
    credentials: ProfileCredentials,
}

impl HttpProfileFetcher {
    /// Create a fetcher for the given API endpoint.
    pub fn new(base_url: impl Into<String>, credentials: ProfileCredentials) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(15))
                .build()
                .expect("failed to build HTTP client"),
            base_url: base_url.into(),
            credentials,
        }
    }

    /// Resolve the endpoint from `PROFILE_API_BASE_URL` plus credentials
    /// from the environment.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("PROFILE_API_BASE_URL")
            .map_err(|_| EnrichmentError::Config("PROFILE_API_BASE_URL not set".into()))?;
        Ok(Self::new(base_url, ProfileCredentials::from_env()?))
    }

    async fn try_fetch(&self, slug: &str) -> std::result::Result<Profile, reqwest::Error> {
        let url = format!("{}/profiles/{}", self.base_url.trim_end_matches('/'), slug);
        let profile = self
            .client
            .get(&url)
            .basic_auth(
                &self.credentials.username,
                Some(self.credentials.password.expose()),
            )
            .send()
            .await?
            .error_for_status()?
            .json::<Profile>()
            .await?;
        Ok(profile)
    }
}

#[async_trait]
impl ProfileFetcher for HttpProfileFetcher {
    async fn fetch_profile(&self, slug: &str) -> Profile {
        match self.try_fetch(slug).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(slug = %slug, error = %e, "profile lookup failed, continuing without profile");
                Profile::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_slug_from_profile_url() {
        assert_eq!(
            extract_profile_slug("https://www.linkedin.com/in/gracehopper"),
            Some("gracehopper")
        );
        assert_eq!(
            extract_profile_slug("https://linkedin.com/in/ada-lovelace/?utm=x"),
            Some("ada-lovelace")
        );
        assert_eq!(
            extract_profile_slug("http://linkedin.com/in/turing#about"),
            Some("turing")
        );
    }

    #[test]
    fn rejects_non_profile_urls() {
        assert_eq!(extract_profile_slug(""), None);
        assert_eq!(extract_profile_slug("https://example.com/in/nope"), None);
        assert_eq!(extract_profile_slug("https://linkedin.com/company/acme"), None);
        assert_eq!(extract_profile_slug("not a url"), None);
    }

    #[test]
    fn credentials_debug_redacts_password() {
        let creds = ProfileCredentials::new("ops@example.test", "hunter2");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("ops@example.test"));
        assert!(!debug.contains("hunter2"));
    }

    #[tokio::test]
    async fn failed_lookup_degrades_to_empty_profile() {
        let fetcher = HttpProfileFetcher::new(
            "http://127.0.0.1:9",
            ProfileCredentials::new("user", "pass"),
        );
        let profile = fetcher.fetch_profile("someone").await;
        assert!(profile.is_empty());
    }
}
