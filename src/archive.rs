use crate::config::ScanConfig;
use crate::error::ArchiveError;
use crate::types::PasteRef;
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{debug, info, warn};

/// First-column links of the archive listing table
const PASTE_LINK_SELECTOR: &str = "table.maintable tr td:first-child a";

/// Fetch the archive page and return the pastes it lists, in page order.
pub async fn list_recent_pastes(
    client: &Client,
    config: &ScanConfig,
) -> Result<Vec<PasteRef>, ArchiveError> {
    info!("Fetching archive page: {}", config.archive_url);

    let response = client
        .get(&config.archive_url)
        .header("User-Agent", &config.user_agent)
        .timeout(config.request_timeout)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        warn!("Archive page returned HTTP {}", status);
        return Err(ArchiveError::Status(status.as_u16()));
    }

    let html = response.text().await?;
    let pastes = extract_paste_refs(&html, config);
    if pastes.is_empty() {
        warn!("Could not find paste links on archive page. Structure might have changed.");
        return Err(ArchiveError::NoPasteLinks);
    }

    info!("Found {} paste links in archive", pastes.len());
    Ok(pastes)
}

/// Pull paste references out of an archive document.
///
/// Document order is preserved and duplicates are kept.
pub fn extract_paste_refs(html: &str, config: &ScanConfig) -> Vec<PasteRef> {
    let document = Html::parse_document(html);
    let mut pastes = Vec::new();

    if let Ok(selector) = Selector::parse(PASTE_LINK_SELECTOR) {
        for element in document.select(&selector) {
            let href = element.value().attr("href").unwrap_or("");
            match paste_id_from_href(href) {
                Some(id) => pastes.push(PasteRef::new(id, config)),
                None => debug!("Skipping non-paste link '{}'", href),
            }
        }
    }

    pastes
}

/// Accepts only single-segment site-relative links, e.g. `/abc123`.
pub fn paste_id_from_href(href: &str) -> Option<&str> {
    if href.is_empty() || !href.starts_with('/') || href.contains("/archive/") {
        return None;
    }
    let id = &href[1..];
    if id.contains('/') {
        return None;
    }
    Some(id)
}
