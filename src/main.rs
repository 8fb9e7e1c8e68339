use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use paste_search::config::{ScanConfig, ServerConfig};
use paste_search::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ScanConfig::from_env()?;
    let server = ServerConfig::from_env();

    info!("Starting paste search service");
    info!("Archive URL: {}", config.archive_url);
    info!(
        "Checking up to {} pastes per search, {:?} between fetches",
        config.max_pastes, config.paste_delay
    );

    let state = Arc::new(AppState::new(config)?);
    let app = router(state);

    let addr = server.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Paste search listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
