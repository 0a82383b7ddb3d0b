//! Cache Module
//!
//! The key-value cache boundary used by the product lookup, the best-effort
//! wrapper around it, and the in-memory and Redis backends.

mod best_effort;
mod engine;
mod entry;
mod lru;
mod memory;
mod redis_cache;
mod stats;


use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheFailure;
use crate::product::Product;

// Re-export public types
pub use best_effort::best_effort;
pub use engine::CacheEngine;
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use memory::MemoryCache;
pub use redis_cache::RedisCache;
pub use stats::CacheStats;

// == Public Constants ==
/// Lifetime of a cached product (one hour)
pub const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

// == Product Cache ==
/// Key-value cache holding serialized products.
///
/// Implementations are shared across requests and must be internally safe
/// for concurrent use. Expiry is the backend's job.
#[async_trait]
pub trait ProductCache: Send + Sync {
    /// Returns the product stored under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Product>, CacheFailure>;

    /// Stores `product` under `key` for `ttl`.
    async fn set(&self, key: &str, product: &Product, ttl: Duration) -> Result<(), CacheFailure>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), CacheFailure>;

    /// Short backend name for logs and stats.
    fn backend_name(&self) -> &'static str;

    /// Engine counters, for backends that keep their own.
    async fn engine_stats(&self) -> Option<CacheStats> {
        None
    }
}
