//! Cache-aside product lookup.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::cache::{best_effort, CacheStats, ProductCache, PRODUCT_CACHE_TTL};
use crate::error::LookupError;
use crate::lookup::{LookupStats, LookupStatsSnapshot};
use crate::product::{cache_key, Product, ProductId};
use crate::store::ProductStore;

// == Product Lookup ==
/// Reads products through the cache, falling back to the store.
///
/// Both dependencies are injected and shared across requests. Cache failures
/// are logged and absorbed; only invalid ids and store failures reach the
/// caller.
pub struct ProductLookup {
    cache: Arc<dyn ProductCache>,
    store: Arc<dyn ProductStore>,
    ttl: Duration,
    stats: LookupStats,
}

impl ProductLookup {
    // == Constructor ==
    /// Creates a lookup that caches products for [`PRODUCT_CACHE_TTL`].
    pub fn new(cache: Arc<dyn ProductCache>, store: Arc<dyn ProductStore>) -> Self {
        Self {
            cache,
            store,
            ttl: PRODUCT_CACHE_TTL,
            stats: LookupStats::default(),
        }
    }

    /// Overrides the lifetime of cache entries written by this lookup.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    // == Fetch ==
    /// Fetches the product identified by `raw_id`.
    ///
    /// Steps run strictly in order, each dependency called at most once:
    /// 1. Validate the id; nothing is read for an invalid one
    /// 2. Read `product_<id>` from the cache; a failure counts as a miss
    /// 3. On a hit, return it without touching the store
    /// 4. On a miss, read the store; its failure is a `System` error and its
    ///    absence is `Ok(None)`
    /// 5. Write the found product back to the cache, ignoring failure
    ///
    /// # Errors
    /// - `LookupError::Validation` when `raw_id` is not all ASCII digits
    /// - `LookupError::System` when the store query fails
    pub async fn fetch(&self, raw_id: &str) -> Result<Option<Product>, LookupError> {
        let id = ProductId::parse(raw_id).inspect_err(|_| self.stats.record_validation_error())?;
        let key = cache_key(&id);

        match best_effort("get", &key, self.cache.get(&key)).await {
            Some(Some(product)) => {
                self.stats.record_cache_hit();
                info!("Cache hit for product {}", id);
                return Ok(Some(product));
            }
            Some(None) => {
                self.stats.record_cache_miss();
                debug!("Cache miss for product {}", id);
            }
            None => self.stats.record_cache_error(),
        }

        let product = match self.store.get_by_id(&id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                self.stats.record_store_miss();
                debug!("Product {} not found in store", id);
                return Ok(None);
            }
            Err(err) => {
                self.stats.record_store_error();
                error!("Store query failed for product {}: {}", id, err);
                return Err(LookupError::System(err));
            }
        };
        self.stats.record_store_hit();

        if best_effort("set", &key, self.cache.set(&key, &product, self.ttl))
            .await
            .is_none()
        {
            self.stats.record_cache_error();
        }

        Ok(Some(product))
    }

    pub fn stats(&self) -> LookupStatsSnapshot {
        self.stats.snapshot()
    }

    /// Counters from the cache backend itself, when it keeps any.
    pub async fn cache_engine_stats(&self) -> Option<CacheStats> {
        self.cache.engine_stats().await
    }

    pub fn cache_backend(&self) -> &'static str {
        self.cache.backend_name()
    }

    pub fn store_backend(&self) -> &'static str {
        self.store.backend_name()
    }
}
