use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::ChatModel;
use crate::research::WebResearch;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Model backend for every agent. `LlmClient` in production.
    pub llm: Arc<dyn ChatModel>,
    /// Search client, page fetcher and enricher used for RAG.
    pub research: WebResearch,
    pub config: Config,
}
