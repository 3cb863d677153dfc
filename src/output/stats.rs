//! Persisted per-run statistics
//!
//! One small TOML record per invocation: elapsed time, pages visited, and
//! when the run finished. A missing file reads as all zeros, so the first
//! run compares against nothing.

use crate::StatsError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Statistics of one completed crawl run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Wall-clock duration of the run in seconds
    pub elapsed_seconds: f64,

    /// Number of pages visited
    pub pages_visited: u64,

    /// When the run finished. Omitted from the file when absent, since
    /// TOML has no way to write a missing value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

/// Loads the previous run's statistics.
///
/// A missing file is not an error; it reads as a default record with zero
/// values and no timestamp.
pub fn load_previous(path: &Path) -> Result<RunStats, StatsError> {
    if !path.exists() {
        return Ok(RunStats::default());
    }

    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Persists this run's statistics for the next invocation to compare
/// against. Overwrites whatever was there.
pub fn record_run(path: &Path, stats: &RunStats) -> Result<(), StatsError> {
    let content = toml::to_string_pretty(stats)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Logs this run's numbers next to the previous run's.
pub fn log_comparison(previous: &RunStats, current: &RunStats) {
    tracing::info!(
        "Took {:.2}s to complete, and processed {} pages",
        current.elapsed_seconds,
        current.pages_visited
    );

    if previous.recorded_at.is_some() {
        tracing::info!(
            "Previous run: {:.2}s for {} pages",
            previous.elapsed_seconds,
            previous.pages_visited
        );
    }
}
