pub mod archive;
pub mod config;
pub mod error;
pub mod mcp;
pub mod paste;
pub mod routes;
pub mod search;
pub mod snippet;
pub mod stdio_service;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::ScanConfig;
pub use types::*;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: ScanConfig,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: ScanConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { config, http_client })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::health_check))
        .route("/health", get(routes::health_check))
        .route("/search", get(routes::search_handler))
        .route("/links", get(routes::links_handler))
        .route("/mcp/tools", get(mcp::list_tools))
        .route("/mcp/call", post(mcp::call_tool))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
