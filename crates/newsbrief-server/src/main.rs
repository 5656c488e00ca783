mod api;
mod search;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use newsbrief_news::NewsApiClient;
use newsbrief_summarizer::ClaudeClient;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Arc::new(newsbrief_core::load_app_config()?);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let news = match config.newsapi_key.as_deref() {
        Some(key) => Some(Arc::new(NewsApiClient::new(key, config.news_timeout_secs)?)),
        None => {
            tracing::warn!("NEWSAPI_KEY not set; /search will report the missing credential");
            None
        }
    };
    let claude = match config.anthropic_api_key.as_deref() {
        Some(key) => Some(Arc::new(ClaudeClient::new(
            key,
            &config.claude_model,
            config.summary_timeout_secs,
        )?)),
        None => {
            tracing::warn!("ANTHROPIC_API_KEY not set; /search will report the missing credential");
            None
        }
    };

    let app = build_app(AppState {
        config: Arc::clone(&config),
        news,
        claude,
    });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "newsbrief listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
