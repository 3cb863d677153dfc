//! Robots.txt handling
//!
//! This module derives the crawler's standing with a site from the raw
//! robots.txt text. Only `User-agent:` and `Disallow:` lines are recognized;
//! `Allow:`, `Crawl-delay:` and sitemap directives are out of scope.

mod parser;

pub use parser::parse_rules;

/// The crawler's derived understanding of a site's robots.txt.
///
/// Set exactly once, when the bootstrap fetch of `/robots.txt` completes,
/// and read for the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleState {
    /// robots.txt has not been consulted yet (initial state)
    Unknown,

    /// No record matched our agent or `*`. The link filter accepts nothing
    /// under this state, so the crawl winds down after the bootstrap.
    NotFound,

    /// A matching record with an empty `Disallow:` entry
    AllowedAll,

    /// A matching record disallowing `/`: the site opted out entirely
    DisallowedAll,

    /// A matching record with specific disallow entries
    DisallowedSome(Vec<DisallowSpec>),
}

impl RuleState {
    /// Whether the bootstrap fetch has completed
    pub fn is_checked(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// One parsed robots.txt `Disallow:` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisallowSpec {
    /// Literal path, or wildcard-suffixed path (`/foo*`)
    Path(String),

    /// `key=*` query pattern: any value of `key` is flagged.
    /// The key may retain a leading `?` or `&`; the filter strips it.
    AnyQuery(String),

    /// `key=value` query pattern: this exact pair is flagged
    ValuedQuery(String, String),
}
