mod analysis;
mod config;
mod errors;
mod llm_client;
mod normalizer;
mod roleplay;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; only a malformed PORT is fatal
    let config = Config::from_env()?;

    // Initialize structured logging; APP_DEBUG wins over RUST_LOG for this crate
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(config.log_filter()).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Conversation Trainer API v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Mode: {}",
        if config.debug { "debug" } else { "production" }
    );

    for issue in config.warnings() {
        warn!("{issue}");
    }

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        &config.anthropic_base_url,
    )?;
    info!(
        "LLM client initialized (model: {}, configured: {})",
        llm_client::MODEL,
        llm.is_configured()
    );

    // Build app state
    let state = AppState {
        llm: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
