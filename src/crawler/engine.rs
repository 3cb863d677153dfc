//! The crawl engine
//!
//! A single async loop drives the whole run: pop a candidate, bootstrap
//! robots.txt the first time the seed comes up, otherwise wait out the
//! inter-request delay and visit the page. The loop checks its termination
//! conditions at the top of every iteration, so each iteration performs at
//! most one network fetch and always ends in either "next iteration" or a
//! terminal report.
//!
//! All mutable state (frontier, rules) lives on the engine and is touched
//! only from this loop; no locks, no shared mutation.

use crate::config::{self, CrawlConfig};
use crate::crawler::extract::{NavboxExtractor, PageParser};
use crate::crawler::fetcher::Fetcher;
use crate::crawler::frontier::Frontier;
use crate::robots::{parse_rules, RuleState};
use crate::url::resolve;
use crate::CrawlError;
use url::Url;

/// How a finished crawl ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// robots.txt disallowed the whole site
    SiteOptedOut,

    /// The configured page quota was reached
    QuotaReached,

    /// No URLs were left to visit
    FrontierExhausted,
}

/// Final report of a completed crawl
#[derive(Debug, Clone, Copy)]
pub struct CrawlReport {
    /// Number of pages fetched (robots.txt not included)
    pub pages_visited: usize,

    /// Why the crawl stopped
    pub outcome: CrawlOutcome,
}

/// Sequential crawl engine for one seed URL.
///
/// [`CrawlEngine::run`] consumes the engine, so a run cannot be re-entered;
/// the future resolving is the run's one-shot completion signal.
pub struct CrawlEngine {
    config: CrawlConfig,
    frontier: Frontier,
    fetcher: Fetcher,
    parser: Box<dyn PageParser>,
    rules: RuleState,
}

impl CrawlEngine {
    /// Creates an engine with the default scraper-backed page parser.
    pub fn new(config: CrawlConfig) -> Result<Self, CrawlError> {
        Self::with_parser(config, Box::new(NavboxExtractor))
    }

    /// Creates an engine with a caller-supplied page parser.
    pub fn with_parser(
        config: CrawlConfig,
        parser: Box<dyn PageParser>,
    ) -> Result<Self, CrawlError> {
        let fetcher = Fetcher::new(&config.user_agent)?;
        let frontier = Frontier::new(&config.seed);

        Ok(Self {
            config,
            frontier,
            fetcher,
            parser,
            rules: RuleState::Unknown,
        })
    }

    /// Runs the crawl to completion.
    ///
    /// Only robots.txt failures abort the run; a page that fails to fetch
    /// or parse is logged and skipped.
    pub async fn run(mut self) -> Result<CrawlReport, CrawlError> {
        tracing::debug!("Starting crawl run {}", self.fetcher.run_id());

        loop {
            if self.rules == RuleState::DisallowedAll {
                tracing::info!(
                    "Looks like {} does not want us snooping",
                    self.config.seed_host()
                );
                return Ok(self.report(CrawlOutcome::SiteOptedOut));
            }

            if self.frontier.visited_count() >= self.config.max_pages {
                tracing::info!("Max pages reached");
                return Ok(self.report(CrawlOutcome::QuotaReached));
            }

            let Some(next) = self.frontier.pop_next() else {
                tracing::info!("No more pages left to visit");
                return Ok(self.report(CrawlOutcome::FrontierExhausted));
            };

            if next == self.config.seed && !self.rules.is_checked() {
                self.bootstrap_robots().await?;
                continue;
            }

            if self.frontier.is_visited(&next) {
                continue;
            }

            tokio::time::sleep(self.config.interval).await;
            self.visit(next).await;
        }
    }

    fn report(&self, outcome: CrawlOutcome) -> CrawlReport {
        CrawlReport {
            pages_visited: self.frontier.visited_count(),
            outcome,
        }
    }

    /// One-time robots.txt fetch before the seed page.
    ///
    /// A transport failure or a body that is not valid text is fatal: no
    /// crawling happens without a robots verdict. After deriving the rules
    /// the seed is re-validated under them and, if it survives, goes back
    /// into the frontier.
    async fn bootstrap_robots(&mut self) -> Result<(), CrawlError> {
        let mut robots_url = self.config.seed.clone();
        robots_url.set_path("/robots.txt");

        tracing::info!("First things first, checking robots.txt");
        tracing::debug!("Visiting robots.txt for {}", self.config.seed_host());

        let page = self
            .fetcher
            .fetch(&robots_url)
            .await
            .map_err(|source| CrawlError::RobotsFetch {
                url: robots_url.to_string(),
                source,
            })?;

        let body = String::from_utf8(page.body).map_err(|_| CrawlError::RobotsDecode {
            url: robots_url.to_string(),
        })?;

        tracing::debug!("Decoded robots.txt, working out where we stand with the site");
        let lines: Vec<&str> = body.lines().filter(|line| !line.is_empty()).collect();
        self.rules = parse_rules(&lines, config::AGENT_NAME);

        if matches!(
            self.rules,
            RuleState::AllowedAll | RuleState::DisallowedSome(_)
        ) {
            tracing::info!("We have been granted access");
        }

        // The seed itself must pass the filter under the new rules before
        // the crawl proper starts.
        let seed = self.config.seed.clone();
        let href = match seed.query() {
            Some(query) => format!("{}?{}", seed.path(), query),
            None => seed.path().to_string(),
        };
        if let Some(url) = resolve(&seed, &href, &self.rules) {
            self.frontier.insert_candidate(url);
        }

        Ok(())
    }

    /// Fetches one page and feeds its surviving links to the frontier.
    async fn visit(&mut self, url: Url) {
        tracing::info!("Going to visit {url}");

        // Marked visited before the fetch goes out, so the URL can never be
        // queued again while its own fetch is outstanding.
        self.frontier.mark_visited(url.clone());

        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!("Fetch of {url} failed: {error}");
                return;
            }
        };

        if !page.status.is_success() {
            tracing::debug!("{url} answered {}", page.status);
        }

        let body = match String::from_utf8(page.body) {
            Ok(body) => body,
            Err(_) => {
                tracing::warn!("Body of {url} is not valid UTF-8, skipping");
                return;
            }
        };

        let parsed = match self.parser.parse(&body) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::warn!("Failed to parse {url}: {error}");
                return;
            }
        };

        let mut queued = 0usize;
        for href in &parsed.navbox_links {
            let Some(candidate) = resolve(&self.config.seed, href, &self.rules) else {
                continue;
            };
            if !self.frontier.is_visited(&candidate) {
                self.frontier.insert_candidate(candidate);
                queued += 1;
            }
        }

        match &parsed.title {
            Some(title) => tracing::debug!(
                "Visited {url} ({title}), queued {queued} links, {} pending",
                self.frontier.pending_count()
            ),
            None => tracing::debug!(
                "Visited {url}, queued {queued} links, {} pending",
                self.frontier.pending_count()
            ),
        }
    }
}
