use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::llm_client::CompletionProvider;
use crate::stores::MapsClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Pluggable completion backend. Default: `LlmClient`.
    pub llm: Arc<dyn CompletionProvider>,
    /// `None` when no maps API key is configured; the store finder answers 503.
    pub maps: Option<MapsClient>,
    pub config: Config,
}
