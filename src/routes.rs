use crate::error::ApiError;
use crate::search;
use crate::types::*;
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use std::sync::Arc;
use tracing::warn;

pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let phrase = SearchPhrase::parse(params.q.as_deref()).map_err(|e| {
        warn!("Rejected search query {:?}: {}", params.q, e);
        e
    })?;

    // A panic inside the scan comes back as a JoinError (500)
    let results = tokio::spawn(async move { search::search_pastes(&state, &phrase).await }).await??;
    Ok(Json(results))
}

pub async fn links_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LinksResponse>, ApiError> {
    let links = tokio::spawn(async move { search::list_links(&state).await }).await??;
    Ok(Json(LinksResponse {
        total_links: links.len(),
        links,
    }))
}
