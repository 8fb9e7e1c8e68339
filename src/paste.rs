use crate::config::ScanConfig;
use crate::error::PasteFetchError;
use reqwest::{Client, StatusCode};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteBody {
    Found(String),
    /// The paste was removed or expired (HTTP 404)
    NotFound,
}

/// Fetch the raw text of one paste.
///
/// Sleeps for `paste_delay` before every request, so a sequential caller
/// never exceeds one request per delay interval.
pub async fn fetch_paste_body(
    client: &Client,
    config: &ScanConfig,
    id: &str,
) -> Result<PasteBody, PasteFetchError> {
    let raw_url = config.raw_url(id);
    debug!("Fetching raw paste {} from {}", id, raw_url);

    tokio::time::sleep(config.paste_delay).await;

    let response = client
        .get(&raw_url)
        .header("User-Agent", &config.user_agent)
        .timeout(config.request_timeout)
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(PasteBody::NotFound);
    }
    if !status.is_success() {
        return Err(PasteFetchError::Status(status.as_u16()));
    }

    let text = response.text().await?;
    Ok(PasteBody::Found(text))
}
