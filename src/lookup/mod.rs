//! Lookup Module
//!
//! Cache-aside product reads and the counters they update.

mod orchestrator;
mod stats;

pub use orchestrator::ProductLookup;
pub use stats::{LookupStats, LookupStatsSnapshot};
