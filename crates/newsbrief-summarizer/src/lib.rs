//! Korean news summarization via the Anthropic Messages API.
//!
//! Renders fetched articles into a fixed Korean instruction prompt and asks
//! the model for a 2–3 sentence digest per keyword. An empty article list
//! short-circuits to a fixed no-results message without any network call.

mod client;
mod error;
mod prompt;

pub use client::{ClaudeClient, NO_RESULTS_MESSAGE};
pub use error::SummarizeError;
