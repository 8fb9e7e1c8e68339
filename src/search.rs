use crate::archive;
use crate::error::{ArchiveError, PasteFetchError};
use crate::paste::{self, PasteBody};
use crate::snippet;
use crate::types::*;
use crate::AppState;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Every paste currently listed in the archive, uncapped.
pub async fn list_links(state: &Arc<AppState>) -> Result<Vec<PasteRef>, ArchiveError> {
    archive::list_recent_pastes(&state.http_client, &state.config).await
}

/// Scan recent pastes for `phrase` and collect a snippet for each match.
///
/// Pastes are fetched one at a time. Only successfully checked pastes count
/// toward `max_pastes`; 404s and failed fetches are skipped without counting.
pub async fn search_pastes(
    state: &Arc<AppState>,
    phrase: &SearchPhrase,
) -> Result<Vec<SearchResult>, ArchiveError> {
    let config = &state.config;
    let query = phrase.as_str();
    info!("Received search request for query: '{}'", query);

    let candidates = archive::list_recent_pastes(&state.http_client, config).await?;
    info!(
        "Found {} potential pastes in archive. Checking up to {}.",
        candidates.len(),
        config.max_pastes
    );

    let mut results = Vec::new();
    let mut processed = 0usize;
    for paste in &candidates {
        if processed >= config.max_pastes {
            info!("Reached paste limit ({})", config.max_pastes);
            break;
        }

        debug!("Processing paste ID: {} (URL: {})", paste.id, paste.raw_url);
        let body = match paste::fetch_paste_body(&state.http_client, config, &paste.id).await {
            Ok(PasteBody::Found(body)) => body,
            Ok(PasteBody::NotFound) => {
                warn!("Paste {} not found (404). Skipping.", paste.id);
                continue;
            }
            Err(PasteFetchError::Timeout) => {
                warn!("Timeout while fetching paste {} from {}. Skipping.", paste.id, paste.raw_url);
                continue;
            }
            Err(e) => {
                error!("Error fetching paste {} from {}: {}", paste.id, paste.raw_url, e);
                continue;
            }
        };

        match snippet::try_match(&body, query, config.snippet_context) {
            Some(snippet) if !snippet.is_empty() => {
                info!("Query '{}' found in paste {}.", query, paste.id);
                results.push(SearchResult {
                    link: paste.view_url.clone(),
                    snippet,
                });
            }
            _ => debug!("Query '{}' not found in paste {}.", query, paste.id),
        }
        processed += 1;
    }

    info!(
        "Search for '{}' completed. Found {} results after checking {} pastes.",
        query,
        results.len(),
        processed
    );
    Ok(results)
}
