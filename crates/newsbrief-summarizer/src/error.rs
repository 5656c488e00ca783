use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Anthropic API error: {0}")]
    Api(String),

    #[error("failed to deserialize response from {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
