//! Crawler configuration
//!
//! The configuration is an explicit value built by the caller (the CLI in
//! `main.rs`) and threaded into the engine at construction. There is no
//! global state.

use crate::ConfigError;
use std::time::Duration;
use url::Url;

/// The agent name records in robots.txt are matched against.
///
/// This is the bare crawler name, not the full `User-Agent` header value:
/// a `User-agent: navcrawl` record applies to us regardless of what string
/// goes on the wire.
pub const AGENT_NAME: &str = "navcrawl";

/// Composes the default `User-Agent` header value.
///
/// Format: `navcrawl/<version> (<os>; <arch>)`.
pub fn default_user_agent() -> String {
    format!(
        "{}/{} ({}; {})",
        AGENT_NAME,
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Configuration for a single crawl run
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// The URL the crawl starts from; its host confines the whole run
    pub seed: Url,

    /// Full `User-Agent` header value sent on every request
    pub user_agent: String,

    /// Maximum number of pages to visit
    pub max_pages: usize,

    /// Minimum delay between page requests
    pub interval: Duration,
}

impl CrawlConfig {
    /// Builds and validates a configuration.
    ///
    /// The seed must parse as an absolute http(s) URL with a host; anything
    /// else is a startup error.
    pub fn new(
        seed: &str,
        user_agent: Option<String>,
        max_pages: Option<usize>,
        interval_ms: u64,
    ) -> Result<Self, ConfigError> {
        let seed = Url::parse(seed).map_err(|source| ConfigError::InvalidSeed {
            url: seed.to_string(),
            source,
        })?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(ConfigError::InvalidScheme(seed.scheme().to_string()));
        }

        if seed.host_str().is_none() {
            return Err(ConfigError::MissingHost(seed.to_string()));
        }

        Ok(Self {
            seed,
            user_agent: user_agent.unwrap_or_else(default_user_agent),
            max_pages: max_pages.unwrap_or(usize::MAX),
            interval: Duration::from_millis(interval_ms),
        })
    }

    /// The host the crawl is confined to
    pub fn seed_host(&self) -> &str {
        // validated non-empty in new()
        self.seed.host_str().unwrap_or_default()
    }
}
