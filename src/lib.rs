//! Navcrawl: a polite single-site web crawler
//!
//! This crate crawls one website starting from a seed URL, respecting the
//! site's robots.txt, staying within the seed host, and following the links
//! found in each page's navigation-box table. The crawl is strictly
//! sequential with a fixed delay between requests and stops when the site
//! opts out, the page quota is reached, or the frontier runs dry.

pub mod config;
pub mod crawler;
pub mod output;
pub mod robots;
pub mod url;

use thiserror::Error;

/// Main error type for navcrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("robots.txt fetch failed for {url}: {source}")]
    RobotsFetch {
        url: String,
        source: reqwest::Error,
    },

    #[error("robots.txt body from {url} could not be decoded as text")]
    RobotsDecode { url: String },

    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid seed URL {url}: {source}")]
    InvalidSeed {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Unsupported URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Seed URL has no host: {0}")]
    MissingHost(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors from reading or writing the persisted run statistics
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Failed to read stats file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse stats file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize stats: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type alias for navcrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{CrawlOutcome, CrawlReport};
pub use robots::{DisallowSpec, RuleState};
