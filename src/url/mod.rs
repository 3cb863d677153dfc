//! URL handling for the crawler
//!
//! Candidate links come off the page as raw href strings. This module
//! decides which of them the crawler may enqueue (robots rules, the fixed
//! denylist, host confinement via construction from the seed's components)
//! and extracts the query component hrefs carry in their final path segment.

mod filter;
pub mod query;

pub use filter::{resolve, LINK_DENYLIST};
