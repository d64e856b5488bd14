mod analysis;
mod assets;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod testing;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::invoker::{InvokerConfig, ModelInvoker};
use crate::assets::AnimationAssets;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

/// Upper bound on a single generateContent call.
const LLM_TIMEOUT: Duration = Duration::from_secs(120);

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruiter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client and tiered invoker
    let gemini = GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
        LLM_TIMEOUT,
    )?;
    let invoker = ModelInvoker::new(Arc::new(gemini), InvokerConfig::from(&config));
    info!(
        "LLM client initialized (primary: {}, fallback: {})",
        invoker.config().primary_model,
        invoker.config().fallback_model
    );

    // Animations are optional; failures are logged and surfaced as warnings
    let animations = Arc::new(AnimationAssets::fetch().await);

    let state = AppState {
        invoker,
        animations,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front end has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
