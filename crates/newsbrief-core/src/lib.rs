//! Shared domain types and configuration for newsbrief.
//!
//! Holds the article/result types exchanged between the news fetcher, the
//! summarizer, and the HTTP surface, plus env-driven application config.

mod app_config;
mod config;
mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{Article, KeywordResult, SearchResponse};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
