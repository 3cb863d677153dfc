//! Navcrawl main entry point
//!
//! Command-line interface for the single-site crawler: parses flags into a
//! [`CrawlConfig`], runs the crawl, and records run statistics for
//! comparison with the next invocation.

use clap::Parser;
use navcrawl::config::CrawlConfig;
use navcrawl::crawler::crawl;
use navcrawl::output::{load_previous, log_comparison, record_run, RunStats};
use std::path::Path;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Where run statistics are kept between invocations
const STATS_FILE: &str = ".navcrawl-stats.toml";

/// A polite single-site web crawler
///
/// Starts at the given URL, respects the site's robots.txt, stays on the
/// seed host, and follows navigation-box links with a fixed delay between
/// requests.
#[derive(Parser, Debug)]
#[command(name = "navcrawl")]
#[command(version)]
#[command(about = "A polite single-site web crawler", long_about = None)]
struct Cli {
    /// The URL for the crawler to start on
    #[arg(short, long, value_name = "URL")]
    url: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// The max number of pages to be visited (default: unlimited)
    #[arg(long)]
    max: Option<usize>,

    /// The user agent to be used (default: composed name/version string)
    #[arg(long)]
    user: Option<String>,

    /// The time (ms) between requests
    #[arg(short, long, default_value_t = 1000)]
    interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = CrawlConfig::new(&cli.url, cli.user, cli.max, cli.interval)?;

    if cli.verbose {
        tracing::info!("Starting to crawl as {}", config.user_agent);
    } else {
        tracing::info!("Starting to crawl");
    }

    let started = Instant::now();
    let report = crawl(config).await?;
    let elapsed = started.elapsed();

    tracing::debug!("Crawl outcome: {:?}", report.outcome);

    let stats_path = Path::new(STATS_FILE);
    let previous = load_previous(stats_path)?;
    let current = RunStats {
        elapsed_seconds: elapsed.as_secs_f64(),
        pages_visited: report.pages_visited as u64,
        recorded_at: Some(chrono::Utc::now()),
    };

    log_comparison(&previous, &current);
    record_run(stats_path, &current)?;

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("navcrawl=debug,info")
    } else {
        EnvFilter::new("navcrawl=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
