mod agent;
mod auth;
mod config;
mod db;
mod documents;
mod errors;
mod interviews;
mod llm_client;
mod models;
mod questions;
mod research;
mod routes;
mod state;
mod study_plans;
mod summaries;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::Request, ServiceExt};
use tower::Layer;
use tower_http::{cors::CorsLayer, normalize_path::NormalizePathLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::research::{build_http_client, WebResearch};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LevelUp API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize web research (search → fetch → enrich)
    let http = build_http_client().context("Failed to build HTTP client")?;
    let research = WebResearch::new(
        http,
        config.search_engine_url.clone(),
        config.page_max_chars,
        config.max_web_sources,
    );
    info!(
        "Web research via {} ({} sources, {} chars per page)",
        config.search_engine_url, config.max_web_sources, config.page_max_chars
    );

    let state = AppState {
        db,
        llm: Arc::new(llm),
        research,
        config: config.clone(),
    };

    let router = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());
    // Runs before routing so `/users/` matches `/users`.
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
