//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired entries out of the in-memory cache
//! - Metrics Upkeep: Drains histogram samples held by the recorder

mod cleanup;
mod upkeep;

pub use cleanup::spawn_cleanup_task;
pub use upkeep::spawn_metrics_upkeep;
