use anyhow::{anyhow, Result};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://pastebin.com";

/// Browser-like User-Agent sent on every outbound request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

pub const DEFAULT_PORT: u16 = 5000;

/// Immutable settings for one archive scan.
///
/// Every request handler reads from the same `ScanConfig`; nothing in it is
/// mutated after startup.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub base_url: String,
    pub archive_url: String,
    pub raw_url_base: String,
    pub user_agent: String,
    pub request_timeout: Duration,
    /// Pause before every paste fetch
    pub paste_delay: Duration,
    /// Maximum number of pastes checked per search
    pub max_pastes: usize,
    /// Characters of context kept on each side of a match
    pub snippet_context: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl ScanConfig {
    /// Derive archive, view and raw URLs from a single site root.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        Self {
            archive_url: format!("{}/archive", base),
            raw_url_base: format!("{}/raw/", base),
            base_url: base,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(10),
            paste_delay: Duration::from_millis(200),
            max_pastes: 100,
            snippet_context: 80,
        }
    }

    pub fn from_env() -> Result<Self> {
        let base_url = env::var("PASTEBIN_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        validate_base_url(&base_url)?;

        let mut config = Self::with_base_url(&base_url);
        if let Some(secs) = parse_env::<u64>("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = parse_env::<u64>("PASTE_DELAY_MS") {
            config.paste_delay = Duration::from_millis(ms);
        }
        if let Some(max) = parse_env::<usize>("MAX_PASTES_TO_CHECK") {
            config.max_pastes = max;
        }
        Ok(config)
    }

    pub fn view_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    pub fn raw_url(&self, id: &str) -> String {
        format!("{}{}", self.raw_url_base, id)
    }
}

/// Listener settings for the HTTP binary
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            port: parse_env("PORT").unwrap_or(DEFAULT_PORT),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let parsed = Url::parse(base_url)
        .map_err(|e| anyhow!("Invalid PASTEBIN_BASE_URL '{}': {}", base_url, e))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(anyhow!("PASTEBIN_BASE_URL must use HTTP or HTTPS protocol"));
    }
    Ok(())
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: '{}'", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_pastebin() {
        let config = ScanConfig::default();
        assert_eq!(config.archive_url, "https://pastebin.com/archive");
        assert_eq!(config.view_url("abc123"), "https://pastebin.com/abc123");
        assert_eq!(config.raw_url("abc123"), "https://pastebin.com/raw/abc123");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.paste_delay, Duration::from_millis(200));
        assert_eq!(config.max_pastes, 100);
        assert_eq!(config.snippet_context, 80);
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let config = ScanConfig::with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.archive_url, "http://127.0.0.1:8080/archive");
        assert_eq!(config.raw_url("x1"), "http://127.0.0.1:8080/raw/x1");
    }

    #[test]
    fn test_base_url_validation() {
        assert!(validate_base_url("https://pastebin.com").is_ok());
        assert!(validate_base_url("ftp://pastebin.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn test_bind_addr_uses_all_interfaces() {
        let server = ServerConfig { port: 5001 };
        assert_eq!(server.bind_addr().to_string(), "0.0.0.0:5001");
    }
}
