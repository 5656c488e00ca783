//! HTTP surface: two static pages and the keyword search endpoint.
//!
//! Stateless per request; the only process-wide state is the immutable config
//! and the two upstream clients, constructed once at startup.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use newsbrief_core::{AppConfig, SearchResponse};
use newsbrief_news::NewsApiClient;
use newsbrief_summarizer::ClaudeClient;

use crate::search::run_search;

const LANDING_PAGE: &str = include_str!("../../assets/index.html");
const DEMO_PAGE: &str = include_str!("../../assets/editorial_demo.html");

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Present only when `NEWSAPI_KEY` was configured at startup.
    pub news: Option<Arc<NewsApiClient>>,
    /// Present only when `ANTHROPIC_API_KEY` was configured at startup.
    pub claude: Option<Arc<ClaudeClient>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchRequest {
    #[serde(default)]
    keywords: Vec<String>,
}

/// Error payload on the wire is exactly `{"error": string}`.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/editorial-demo", get(editorial_demo))
        .route("/search", post(search))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn landing() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

async fn editorial_demo() -> Html<&'static str> {
    Html(DEMO_PAGE)
}

/// POST /search: validate keywords and credentials, then run the pipeline.
///
/// Validation order matters: an empty keyword list is reported before any
/// credential check, and the news credential before the summarizer one, so a
/// misconfigured deployment never attempts a summarization call.
async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let keywords: Vec<String> = request
        .keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    if keywords.is_empty() {
        return Err(ApiError::bad_request("키워드를 입력해 주세요."));
    }

    let Some(news) = state.news.as_deref() else {
        return Err(ApiError::internal("NEWSAPI_KEY가 설정되지 않았습니다."));
    };
    let Some(claude) = state.claude.as_deref() else {
        return Err(ApiError::internal(
            "ANTHROPIC_API_KEY가 설정되지 않았습니다.",
        ));
    };

    tracing::info!(count = keywords.len(), "running keyword search");
    let response = run_search(news, claude, &keywords, state.config.page_size).await;
    Ok(Json(response))
}
