use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// NewsAPI credential. Absence is surfaced per-request, not at startup.
    pub newsapi_key: Option<String>,
    /// Anthropic credential. Same policy as `newsapi_key`.
    pub anthropic_api_key: Option<String>,
    pub news_timeout_secs: u64,
    pub summary_timeout_secs: u64,
    pub page_size: u32,
    pub claude_model: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field(
                "newsapi_key",
                &self.newsapi_key.as_ref().map(|_| "[redacted]"),
            )
            .field(
                "anthropic_api_key",
                &self.anthropic_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("news_timeout_secs", &self.news_timeout_secs)
            .field("summary_timeout_secs", &self.summary_timeout_secs)
            .field("page_size", &self.page_size)
            .field("claude_model", &self.claude_model)
            .finish()
    }
}
