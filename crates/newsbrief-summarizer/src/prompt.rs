//! Fixed Korean instruction prompt for the summarization call.

use newsbrief_core::Article;

/// Placeholder used when an article carries no description.
pub(crate) const NO_CONTENT_PLACEHOLDER: &str = "(내용 없음)";

/// Renders the articles plus keyword into the summarization prompt.
///
/// Each article becomes a two-line block (title, then description or the
/// no-content placeholder); blocks are joined with newlines and embedded into
/// the instruction asking for a 2–3 sentence Korean digest.
pub(crate) fn render_prompt(keyword: &str, articles: &[Article]) -> String {
    let articles_text = articles
        .iter()
        .map(|article| {
            let body = if article.description.is_empty() {
                NO_CONTENT_PLACEHOLDER
            } else {
                article.description.as_str()
            };
            format!("- 제목: {}\n  내용: {}", article.title, body)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "다음은 '{keyword}'에 관한 최신 뉴스 기사들입니다:\n\n{articles_text}\n\n\
         위 기사들을 바탕으로 '{keyword}' 관련 최신 동향을 한국어로 2~3문장으로 간결하게 요약해 주세요.\n\
         핵심 내용만 담아 독자가 빠르게 파악할 수 있도록 작성해 주세요."
    )
}
