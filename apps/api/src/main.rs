mod assistant;
mod config;
mod errors;
mod llm_client;
mod routes;
mod state;
mod uploads;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::retry::RetryingBackend;
use crate::llm_client::{CompletionBackend, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AriAI Assistant API v{}", env!("CARGO_PKG_VERSION"));

    if config.api_key_missing {
        warn!("GROQ_API_KEY is not set; completion calls will fail until it is configured");
    }

    let llm = build_completion_backend(&config);
    info!(
        "LLM client initialized (model: {}, max attempts: {})",
        llm_client::MODEL,
        config.completion_max_attempts
    );

    let state = AppState { llm };

    // Development-grade CORS: every origin, method and header.
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The bare single-attempt client, wrapped in the retry layer only when configured.
fn build_completion_backend(config: &Config) -> Arc<dyn CompletionBackend> {
    let client = LlmClient::new(
        config.groq_api_key.clone(),
        config.completion_api_url.clone(),
        Duration::from_secs(config.completion_timeout_secs),
    );

    if config.completion_max_attempts > 1 {
        Arc::new(RetryingBackend::new(client, config.completion_max_attempts))
    } else {
        Arc::new(client)
    }
}
