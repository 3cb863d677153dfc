//! The crawl engine and its collaborators
//!
//! This module contains the core crawling logic:
//! - Sequential fetch-and-continue control loop with its termination
//!   conditions
//! - Frontier and visited-set bookkeeping
//! - HTTP fetching with per-run identification headers
//! - Navbox link extraction behind a swappable parser trait

mod engine;
mod extract;
mod fetcher;
mod frontier;

pub use engine::{CrawlEngine, CrawlOutcome, CrawlReport};
pub use extract::{NavboxExtractor, PageParser, ParsedPage};
pub use fetcher::{FetchedPage, Fetcher};
pub use frontier::Frontier;

use crate::config::CrawlConfig;
use crate::Result;

/// Runs a complete crawl for the given configuration.
///
/// Convenience wrapper over [`CrawlEngine`]: builds the engine with the
/// default page parser and awaits it to completion.
pub async fn crawl(config: CrawlConfig) -> Result<CrawlReport> {
    let engine = CrawlEngine::new(config)?;
    engine.run().await
}
