//! HTTP client for the NewsAPI article-search endpoint.
//!
//! Wraps `reqwest` with NewsAPI-specific error handling, header-based API key
//! delivery, and normalization of provider records. The `"status"` field of
//! the JSON envelope is checked on every call; a non-`ok` status triggers one
//! retry without the Korean language restriction before surfacing
//! [`NewsError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use newsbrief_core::Article;

use crate::error::NewsError;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/";

/// Provider placeholder title for redacted articles.
const REMOVED_TITLE: &str = "[Removed]";

/// Client for the NewsAPI REST API.
///
/// Manages the HTTP client, API key, and base URL. Use [`NewsApiClient::new`]
/// for production or [`NewsApiClient::with_base_url`] to point at a mock
/// server in tests.
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    articles: Vec<ProviderArticle>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<ProviderSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderSource {
    name: Option<String>,
}

impl NewsApiClient {
    /// Creates a new client pointed at the production NewsAPI endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`NewsError::Api`] for an invalid base URL.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, NewsError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NewsError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`NewsError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newsbrief/0.1 (keyword-briefing)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining the endpoint path keeps any prefix segments intact.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| NewsError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Fetches recent articles matching `keyword`, newest first.
    ///
    /// Prefers Korean-language coverage; if the provider reports a non-`ok`
    /// status, retries exactly once with the language restriction removed
    /// (some keywords have no Korean coverage). No further retries.
    ///
    /// Returned articles are normalized: entries with a missing, empty, or
    /// `[Removed]` title are dropped, and `publishedAt` is truncated to a
    /// plain `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// - [`NewsError::Api`] if the provider still reports an error after the
    ///   fallback retry.
    /// - [`NewsError::Http`] on network failure or timeout.
    /// - [`NewsError::Deserialize`] if the response body is not the expected
    ///   JSON shape, whatever the HTTP status.
    pub async fn search_articles(
        &self,
        keyword: &str,
        page_size: u32,
    ) -> Result<Vec<Article>, NewsError> {
        let envelope = self.request_envelope(keyword, page_size, true).await?;

        let envelope = if envelope.status == "ok" {
            envelope
        } else {
            tracing::debug!(
                keyword = %keyword,
                status = %envelope.status,
                "no Korean-language coverage, retrying without language restriction"
            );
            self.request_envelope(keyword, page_size, false).await?
        };

        if envelope.status != "ok" {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("provider status '{}'", envelope.status));
            return Err(NewsError::Api(message));
        }

        Ok(envelope
            .articles
            .into_iter()
            .filter_map(normalize_article)
            .collect())
    }

    /// Builds the article-search URL with percent-encoded query parameters.
    ///
    /// The API key is deliberately NOT part of the URL; it travels in the
    /// `X-Api-Key` header so it never shows up in access logs.
    fn build_url(&self, keyword: &str, page_size: u32, korean_only: bool) -> Url {
        let mut url = self
            .base_url
            .join("v2/everything")
            .unwrap_or_else(|_| self.base_url.clone());
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", keyword);
            pairs.append_pair("sortBy", "publishedAt");
            pairs.append_pair("pageSize", &page_size.to_string());
            if korean_only {
                pairs.append_pair("language", "ko");
            }
        }
        url
    }

    /// Sends one GET request and parses the envelope.
    ///
    /// NewsAPI delivers its error envelopes with 4xx statuses, so the body is
    /// parsed regardless of the HTTP status — the `"status"` field drives the
    /// fallback decision. [`NewsError::Http`] is reserved for transport
    /// failures (connect, timeout).
    async fn request_envelope(
        &self,
        keyword: &str,
        page_size: u32,
        korean_only: bool,
    ) -> Result<NewsApiResponse, NewsError> {
        let url = self.build_url(keyword, page_size, korean_only);
        let response = self
            .client
            .get(url.clone())
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| NewsError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

/// Normalizes one provider record into an [`Article`].
///
/// Returns `None` for entries with a missing, empty, or `[Removed]` title.
fn normalize_article(raw: ProviderArticle) -> Option<Article> {
    let title = raw.title.unwrap_or_default();
    if title.is_empty() || title == REMOVED_TITLE {
        return None;
    }

    Some(Article {
        title,
        description: raw.description.unwrap_or_default(),
        url: raw.url.unwrap_or_default(),
        source: raw.source.and_then(|s| s.name).unwrap_or_default(),
        published_at: truncate_published_at(&raw.published_at.unwrap_or_default()),
    })
}

/// Truncates an ISO-8601 timestamp to its first 10 characters (`YYYY-MM-DD`).
///
/// Idempotent: strings of 10 characters or fewer pass through unchanged.
fn truncate_published_at(timestamp: &str) -> String {
    timestamp.chars().take(10).collect()
}
