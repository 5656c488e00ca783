use serde::{Deserialize, Serialize};

/// A single news item normalized from the provider response.
///
/// Invariant: `title` is non-empty and never the provider's `[Removed]`
/// placeholder — entries violating this are dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// May be empty when the provider supplies no snippet.
    pub description: String,
    pub url: String,
    /// Provider source name; empty when the nested field is absent.
    pub source: String,
    /// Publication date truncated to `YYYY-MM-DD`, or empty.
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

/// Fetch-then-summarize outcome for one input keyword.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordResult {
    pub keyword: String,
    pub summary: String,
    /// Provider order preserved.
    pub articles: Vec<Article>,
}

/// Response body for `POST /search`: one entry per input keyword, in input
/// order, duplicates preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<KeywordResult>,
}
