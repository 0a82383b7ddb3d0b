//! Lookup outcome counters.

use std::sync::atomic::{AtomicU64, Ordering};

use metrics::counter;
use serde::Serialize;

use crate::telemetry::LOOKUP_OUTCOMES_TOTAL;

/// Per-outcome counters updated by every lookup.
///
/// Each bump is mirrored to the Prometheus `product_lookup_outcomes_total`
/// series, labelled by outcome.
#[derive(Debug, Default)]
pub struct LookupStats {
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    cache_errors: AtomicU64,
    store_hits: AtomicU64,
    store_misses: AtomicU64,
    store_errors: AtomicU64,
    validation_errors: AtomicU64,
}

/// Point-in-time copy of [`LookupStats`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LookupStatsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Absorbed cache read and write failures
    pub cache_errors: u64,
    pub store_hits: u64,
    pub store_misses: u64,
    pub store_errors: u64,
    pub validation_errors: u64,
    pub hit_rate: f64,
}

fn bump(local: &AtomicU64, outcome: &'static str) {
    local.fetch_add(1, Ordering::Relaxed);
    counter!(LOOKUP_OUTCOMES_TOTAL, "outcome" => outcome).increment(1);
}

impl LookupStats {
    pub fn record_cache_hit(&self) {
        bump(&self.cache_hits, "cache_hit");
    }

    pub fn record_cache_miss(&self) {
        bump(&self.cache_misses, "cache_miss");
    }

    pub fn record_cache_error(&self) {
        bump(&self.cache_errors, "cache_error");
    }

    pub fn record_store_hit(&self) {
        bump(&self.store_hits, "store_hit");
    }

    pub fn record_store_miss(&self) {
        bump(&self.store_misses, "store_miss");
    }

    pub fn record_store_error(&self) {
        bump(&self.store_errors, "store_error");
    }

    pub fn record_validation_error(&self) {
        bump(&self.validation_errors, "validation_error");
    }

    pub fn snapshot(&self) -> LookupStatsSnapshot {
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let cache_misses = self.cache_misses.load(Ordering::Relaxed);
        let total = cache_hits + cache_misses;

        LookupStatsSnapshot {
            cache_hits,
            cache_misses,
            cache_errors: self.cache_errors.load(Ordering::Relaxed),
            store_hits: self.store_hits.load(Ordering::Relaxed),
            store_misses: self.store_misses.load(Ordering::Relaxed),
            store_errors: self.store_errors.load(Ordering::Relaxed),
            validation_errors: self.validation_errors.load(Ordering::Relaxed),
            hit_rate: if total == 0 {
                0.0
            } else {
                cache_hits as f64 / total as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = LookupStats::default().snapshot();
        assert_eq!(snapshot, LookupStatsSnapshot::default());
        assert_eq!(snapshot.hit_rate, 0.0);
    }

    #[test]
    fn test_hit_rate() {
        let stats = LookupStats::default();
        stats.record_cache_hit();
        stats.record_cache_hit();
        stats.record_cache_hit();
        stats.record_cache_miss();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.cache_hits, 3);
        assert!((snapshot.hit_rate - 0.75).abs() < f64::EPSILON);
    }
}
