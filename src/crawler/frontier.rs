//! Frontier bookkeeping
//!
//! The frontier owns the set of URLs discovered but not yet visited and the
//! set already visited. Both are plain fields mutated only by the engine's
//! single control flow, so no locking is involved.

use std::collections::HashSet;
use url::Url;

/// Discovered-but-unvisited and visited URL sets for one crawl run.
///
/// Invariants: every URL in `to_visit` shares the seed host (checked at
/// insertion); `visited` only ever grows.
#[derive(Debug)]
pub struct Frontier {
    seed_host: String,
    to_visit: HashSet<Url>,
    visited: HashSet<Url>,
}

impl Frontier {
    /// Creates a frontier seeded with the start URL.
    pub fn new(seed: &Url) -> Self {
        let seed_host = seed.host_str().unwrap_or_default().to_string();
        let mut to_visit = HashSet::new();
        to_visit.insert(seed.clone());

        Self {
            seed_host,
            to_visit,
            visited: HashSet::new(),
        }
    }

    /// Removes and returns one URL to visit, in no particular order.
    ///
    /// A popped URL whose host differs from the seed host is discarded
    /// (not re-inserted) and `None` is returned, ending the crawl rather
    /// than leaving the host.
    pub fn pop_next(&mut self) -> Option<Url> {
        let candidate = self.to_visit.iter().next().cloned()?;
        self.to_visit.remove(&candidate);

        if candidate.host_str() != Some(self.seed_host.as_str()) {
            tracing::debug!("Dropping off-host candidate {candidate}");
            return None;
        }

        Some(candidate)
    }

    /// Queues a discovered URL. Already-visited or off-host URLs are
    /// silently absorbed; so are duplicates.
    pub fn insert_candidate(&mut self, url: Url) {
        if self.visited.contains(&url) {
            return;
        }
        if url.host_str() != Some(self.seed_host.as_str()) {
            return;
        }
        self.to_visit.insert(url);
    }

    /// Records a URL as visited.
    pub fn mark_visited(&mut self, url: Url) {
        self.visited.insert(url);
    }

    /// Whether a URL has already been visited.
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    /// Number of pages visited so far.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs waiting to be visited.
    pub fn pending_count(&self) -> usize {
        self.to_visit.len()
    }

    #[cfg(test)]
    fn insert_unchecked(&mut self, url: Url) {
        self.to_visit.insert(url);
    }
}
