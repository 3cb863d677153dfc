//! Run statistics output
//!
//! After a crawl finishes, its wall-clock duration and visited-page count
//! are persisted so the next invocation can show how it compares.

pub mod stats;

pub use stats::{load_previous, log_comparison, record_run, RunStats};
