//! Product Lookup - a cache-aside product read service
//!
//! Serves product records by numeric id, checking a key-value cache before
//! falling back to the relational store and warming the cache on the way out.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod product;
pub mod store;
pub mod tasks;
pub mod telemetry;

pub use api::AppState;
pub use config::Config;
pub use lookup::ProductLookup;
pub use tasks::{spawn_cleanup_task, spawn_metrics_upkeep};
