//! Response DTOs for the product API

use serde::Serialize;

use crate::cache::CacheStats;
use crate::lookup::LookupStatsSnapshot;

/// `{"message": ...}` body used by every error response.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Name of the cache backend in use
    pub cache_backend: &'static str,
    /// Name of the store backend in use
    pub store_backend: &'static str,
    #[serde(flatten)]
    pub lookups: LookupStatsSnapshot,
    /// Counters of the in-memory engine; absent for other backends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_engine: Option<EngineStatsResponse>,
    /// Snapshot time in RFC 3339
    pub timestamp: String,
}

impl StatsResponse {
    pub fn new(
        cache_backend: &'static str,
        store_backend: &'static str,
        lookups: LookupStatsSnapshot,
    ) -> Self {
        Self {
            cache_backend,
            store_backend,
            lookups,
            cache_engine: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_engine_stats(mut self, stats: Option<CacheStats>) -> Self {
        self.cache_engine = stats.map(EngineStatsResponse::from);
        self
    }
}

/// Cache engine counters as reported under `cache_engine` in GET /stats
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub expired: u64,
    pub evictions: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for EngineStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            expired: stats.expired,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}
