//! HTTP website text fetcher.
//!
//! Fetches a page and reduces it to visible text: scripts and styles
//! removed, tags stripped, entities decoded, whitespace collapsed,
//! truncated to a fixed character budget. Any failure yields an empty
//! string; the caller treats empty content as a scoring signal, not an
//! error.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tracing::warn;

use crate::fetch::TextFetcher;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Default cap on returned text, in characters.
pub const DEFAULT_MAX_CHARS: usize = 2000;

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid regex"));
static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Website text fetcher over plain HTTP.
pub struct HttpTextFetcher {
    client: reqwest::Client,
    max_chars: usize,
}

impl Default for HttpTextFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTextFetcher {
    /// Create a fetcher with a 10 second timeout and browser-like UA.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .user_agent(USER_AGENT)
                .build()
                .expect("failed to build HTTP client"),
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Override the character budget.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    async fn try_fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(visible_text(&html, self.max_chars))
    }
}

#[async_trait]
impl TextFetcher for HttpTextFetcher {
    async fn fetch_text(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %url, error = %e, "website fetch failed, using empty content");
                String::new()
            }
        }
    }
}

/// Reduce HTML to visible text, capped at `max_chars` characters.
pub fn visible_text(html: &str, max_chars: usize) -> String {
    let without_scripts = SCRIPT_RE.replace_all(html, " ");
    let without_styles = STYLE_RE.replace_all(&without_scripts, " ");
    let without_tags = TAG_RE.replace_all(&without_styles, " ");

    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'");

    let collapsed: String = decoded.split_whitespace().collect::<Vec<_>>().join(" ");

    collapsed.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts_and_styles() {
        let html = r#"
            <html><head>
            <style>body { color: red; }</style>
            <script>console.log("tracking");</script>
            </head>
            <body><h1>Acme Robotics</h1><p>We build robots.</p></body></html>
        "#;

        let text = visible_text(html, 2000);
        assert_eq!(text, "Acme Robotics We build robots.");
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn decodes_entities() {
        let text = visible_text("<p>R&amp;D &mdash; &quot;fast&quot;</p>", 2000);
        assert!(text.contains("R&D"));
        assert!(text.contains("\"fast\""));
    }

    #[test]
    fn truncates_at_char_budget() {
        let html = format!("<p>{}</p>", "word ".repeat(1000));
        let text = visible_text(&html, 50);
        assert_eq!(text.chars().count(), 50);
    }

    #[tokio::test]
    async fn unreachable_host_yields_empty_string() {
        let fetcher = HttpTextFetcher::new();
        let text = fetcher.fetch_text("http://127.0.0.1:9/nothing").await;
        assert_eq!(text, "");
    }
}
