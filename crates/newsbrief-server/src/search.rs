//! Search orchestration: fetch-then-summarize per keyword.
//!
//! Keywords are processed strictly sequentially, in input order. Both
//! upstream clients return explicit errors; the degrade decision is made
//! here, uniformly for both: a failed fetch becomes an empty article list
//! (which in turn yields the summarizer's fixed no-results message), and a
//! failed summarization becomes a fixed fallback string. A validated batch
//! therefore always completes.

use newsbrief_core::{Article, KeywordResult, SearchResponse};
use newsbrief_news::{NewsApiClient, NewsError};
use newsbrief_summarizer::{ClaudeClient, SummarizeError};

/// Summary used when the summarization call fails for a keyword.
pub(crate) const FALLBACK_SUMMARY: &str = "요약을 생성하지 못했습니다.";

/// Seam over the news fetcher so the orchestrator can be tested with stubs.
pub(crate) trait FetchNews {
    async fn fetch_news(&self, keyword: &str, page_size: u32) -> Result<Vec<Article>, NewsError>;
}

/// Seam over the summarizer, same purpose as [`FetchNews`].
pub(crate) trait Summarize {
    async fn summarize(
        &self,
        keyword: &str,
        articles: &[Article],
    ) -> Result<String, SummarizeError>;
}

impl FetchNews for NewsApiClient {
    async fn fetch_news(&self, keyword: &str, page_size: u32) -> Result<Vec<Article>, NewsError> {
        self.search_articles(keyword, page_size).await
    }
}

impl Summarize for ClaudeClient {
    async fn summarize(
        &self,
        keyword: &str,
        articles: &[Article],
    ) -> Result<String, SummarizeError> {
        ClaudeClient::summarize(self, keyword, articles).await
    }
}

/// Runs fetch-then-summarize for each keyword and assembles the response.
///
/// `keywords` must already be trimmed and non-empty (the HTTP surface
/// validates). The output has exactly one entry per input keyword, in input
/// order, duplicates preserved.
pub(crate) async fn run_search<F, S>(
    fetcher: &F,
    summarizer: &S,
    keywords: &[String],
    page_size: u32,
) -> SearchResponse
where
    F: FetchNews,
    S: Summarize,
{
    let mut results = Vec::with_capacity(keywords.len());

    for keyword in keywords {
        let articles = match fetcher.fetch_news(keyword, page_size).await {
            Ok(articles) => {
                tracing::debug!(
                    keyword = %keyword,
                    count = articles.len(),
                    "fetched articles"
                );
                articles
            }
            Err(e) => {
                tracing::warn!(
                    keyword = %keyword,
                    error = %e,
                    "news fetch failed, degrading to empty article list"
                );
                Vec::new()
            }
        };

        let summary = match summarizer.summarize(keyword, &articles).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(
                    keyword = %keyword,
                    error = %e,
                    "summarization failed, using fallback message"
                );
                FALLBACK_SUMMARY.to_string()
            }
        };

        results.push(KeywordResult {
            keyword: keyword.clone(),
            summary,
            articles,
        });
    }

    SearchResponse { results }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use newsbrief_summarizer::NO_RESULTS_MESSAGE;

    use super::*;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            description: "내용".to_string(),
            url: "https://example.com".to_string(),
            source: "테스트".to_string(),
            published_at: "2025-06-01".to_string(),
        }
    }

    /// Stub fetcher returning a fixed article list, or failing on demand.
    struct StubFetcher {
        articles: Vec<Article>,
        fail: bool,
        calls: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn returning(articles: Vec<Article>) -> Self {
            Self {
                articles,
                fail: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                articles: Vec::new(),
                fail: true,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl FetchNews for StubFetcher {
        async fn fetch_news(
            &self,
            keyword: &str,
            _page_size: u32,
        ) -> Result<Vec<Article>, NewsError> {
            self.calls.lock().unwrap().push(keyword.to_string());
            if self.fail {
                return Err(NewsError::Api("stubbed outage".to_string()));
            }
            Ok(self.articles.clone())
        }
    }

    /// Stub summarizer mirroring the real client's empty-list short-circuit.
    struct StubSummarizer {
        fail: bool,
        seen: Mutex<Vec<(String, usize)>>,
    }

    impl StubSummarizer {
        fn new() -> Self {
            Self {
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Summarize for StubSummarizer {
        async fn summarize(
            &self,
            keyword: &str,
            articles: &[Article],
        ) -> Result<String, SummarizeError> {
            self.seen
                .lock()
                .unwrap()
                .push((keyword.to_string(), articles.len()));
            if self.fail {
                return Err(SummarizeError::Api("stubbed outage".to_string()));
            }
            if articles.is_empty() {
                return Ok(NO_RESULTS_MESSAGE.to_string());
            }
            Ok(format!("{keyword} 요약"))
        }
    }

    #[tokio::test]
    async fn preserves_input_order_and_duplicates() {
        let fetcher = StubFetcher::returning(vec![article("기사")]);
        let summarizer = StubSummarizer::new();
        let keywords = vec![
            "경제".to_string(),
            "반도체".to_string(),
            "경제".to_string(),
        ];

        let response = run_search(&fetcher, &summarizer, &keywords, 5).await;

        assert_eq!(response.results.len(), 3);
        for (result, keyword) in response.results.iter().zip(&keywords) {
            assert_eq!(&result.keyword, keyword);
        }
        assert_eq!(*fetcher.calls.lock().unwrap(), keywords);
    }

    #[tokio::test]
    async fn summarizer_receives_exactly_the_fetched_articles() {
        let fetcher = StubFetcher::returning(vec![article("첫 기사"), article("둘째 기사")]);
        let summarizer = StubSummarizer::new();
        let keywords = vec!["반도체".to_string()];

        let response = run_search(&fetcher, &summarizer, &keywords, 5).await;

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].articles.len(), 2);
        let seen = summarizer.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[("반도체".to_string(), 2)]);
    }

    #[tokio::test]
    async fn fetch_failure_degrades_to_empty_articles_and_no_results_summary() {
        let fetcher = StubFetcher::failing();
        let summarizer = StubSummarizer::new();
        let keywords = vec!["경제".to_string()];

        let response = run_search(&fetcher, &summarizer, &keywords, 5).await;

        assert_eq!(response.results.len(), 1);
        assert!(response.results[0].articles.is_empty());
        assert_eq!(response.results[0].summary, NO_RESULTS_MESSAGE);
    }

    #[tokio::test]
    async fn summarize_failure_degrades_to_fallback_summary() {
        let fetcher = StubFetcher::returning(vec![article("기사")]);
        let summarizer = StubSummarizer::failing();
        let keywords = vec!["경제".to_string()];

        let response = run_search(&fetcher, &summarizer, &keywords, 5).await;

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].summary, FALLBACK_SUMMARY);
        // The failed summary does not discard the fetched articles.
        assert_eq!(response.results[0].articles.len(), 1);
    }

    #[tokio::test]
    async fn later_keywords_still_processed_after_a_degraded_one() {
        let fetcher = StubFetcher::failing();
        let summarizer = StubSummarizer::new();
        let keywords = vec!["경제".to_string(), "반도체".to_string()];

        let response = run_search(&fetcher, &summarizer, &keywords, 5).await;

        assert_eq!(response.results.len(), 2);
        assert_eq!(response.results[1].keyword, "반도체");
    }
}
