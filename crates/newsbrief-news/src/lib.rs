//! NewsAPI article-search client for newsbrief.
//!
//! Fetches recent articles per keyword from the NewsAPI `/v2/everything`
//! endpoint, preferring Korean-language coverage with a single no-language
//! fallback retry, and normalizes provider records into [`newsbrief_core::Article`].

mod client;
mod error;

pub use client::NewsApiClient;
pub use error::NewsError;
