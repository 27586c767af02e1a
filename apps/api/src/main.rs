mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod planner;
mod routes;
mod state;
mod stores;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::{CompletionProvider, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::stores::MapsClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Fusion Chef API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_model.clone(),
        config.llm_temperature,
    )
    .with_base_url(config.openai_base_url.clone());
    info!("LLM client initialized (model: {})", llm.model());

    // Initialize maps client (optional)
    let maps = config
        .google_maps_api_key
        .clone()
        .map(|key| MapsClient::new(key).with_base_url(config.maps_base_url.clone()));
    if maps.is_none() {
        warn!("GOOGLE_MAPS_API_KEY not set; store finder disabled");
    }

    let state = AppState {
        db,
        llm: Arc::new(llm),
        maps,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
