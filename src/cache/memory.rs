//! In-memory product cache.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{CacheEngine, CacheStats, ProductCache};
use crate::error::CacheFailure;
use crate::product::Product;

/// [`ProductCache`] backed by a [`CacheEngine`] shared behind a tokio `RwLock`.
///
/// Cloning shares the same engine.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    engine: Arc<RwLock<CacheEngine>>,
}

impl MemoryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            engine: Arc::new(RwLock::new(CacheEngine::new(max_entries))),
        }
    }

    /// Shared handle to the engine, for the background cleanup task.
    pub fn engine(&self) -> Arc<RwLock<CacheEngine>> {
        Arc::clone(&self.engine)
    }

    pub async fn stats(&self) -> CacheStats {
        self.engine.read().await.stats()
    }

    pub async fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.engine.read().await.ttl_remaining(key)
    }
}

#[async_trait]
impl ProductCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Product>, CacheFailure> {
        // Write lock: a read updates LRU order and counters
        let raw = self.engine.write().await.get(key);

        raw.map(|value| serde_json::from_str(&value).map_err(CacheFailure::Decode))
            .transpose()
    }

    async fn set(&self, key: &str, product: &Product, ttl: Duration) -> Result<(), CacheFailure> {
        let value = serde_json::to_string(product).map_err(CacheFailure::Encode)?;
        self.engine.write().await.set(key.to_string(), value, ttl)
    }

    async fn ping(&self) -> Result<(), CacheFailure> {
        Ok(())
    }

    async fn engine_stats(&self) -> Option<CacheStats> {
        Some(self.stats().await)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
