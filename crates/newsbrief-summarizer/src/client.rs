//! HTTP client for the Anthropic Messages API.
//!
//! Submits the rendered prompt as a single user turn and returns the first
//! text block of the response. The API key travels in the `x-api-key` header;
//! responses with no text content surface as [`SummarizeError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use newsbrief_core::Article;

use crate::error::SummarizeError;
use crate::prompt::render_prompt;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Generation cap per summary.
const MAX_TOKENS: u32 = 300;

/// Returned without any network call when there are no articles to summarize.
pub const NO_RESULTS_MESSAGE: &str = "관련 뉴스를 찾을 수 없습니다.";

/// Client for the Anthropic Messages API.
///
/// Use [`ClaudeClient::new`] for production or
/// [`ClaudeClient::with_base_url`] to point at a mock server in tests.
pub struct ClaudeClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<UserMessage<'a>>,
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

impl ClaudeClient {
    /// Creates a new client pointed at the production Anthropic API.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SummarizeError::Api`] for an invalid base
    /// URL.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, SummarizeError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SummarizeError::Api`] if `base_url` is not
    /// a valid URL.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SummarizeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newsbrief/0.1 (keyword-briefing)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| SummarizeError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            base_url,
        })
    }

    /// Produces a short Korean summary of recent developments for `keyword`.
    ///
    /// An empty `articles` slice returns [`NO_RESULTS_MESSAGE`] immediately —
    /// a short-circuit, not an error, and no request is sent.
    ///
    /// # Errors
    ///
    /// - [`SummarizeError::Api`] on a non-2xx API status or a response with
    ///   no text content.
    /// - [`SummarizeError::Http`] on network failure or timeout.
    /// - [`SummarizeError::Deserialize`] if the response body is not the
    ///   expected JSON shape.
    pub async fn summarize(
        &self,
        keyword: &str,
        articles: &[Article],
    ) -> Result<String, SummarizeError> {
        if articles.is_empty() {
            tracing::debug!(
                keyword = %keyword,
                "no articles to summarize, returning fixed no-results message"
            );
            return Ok(NO_RESULTS_MESSAGE.to_string());
        }

        let prompt = render_prompt(keyword, articles);
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![UserMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let url = self
            .base_url
            .join("v1/messages")
            .unwrap_or_else(|_| self.base_url.clone());
        let response = self
            .client
            .post(url.clone())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api(format!(
                "Anthropic API returned status {status}: {body}"
            )));
        }

        let body = response.text().await?;
        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| SummarizeError::Deserialize {
                context: url.to_string(),
                source: e,
            })?;

        parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| SummarizeError::Api("response contained no text content".to_string()))
    }
}
