//! Cache Statistics Module
//!
//! Counters kept by the in-memory engine.

// == Cache Stats ==
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Reads that returned a live entry
    pub hits: u64,
    /// Reads that found nothing, including expired entries
    pub misses: u64,
    /// Reads that found an entry past its deadline
    pub expired: u64,
    /// Entries dropped to make room for new ones
    pub evictions: u64,
    /// Entries currently held, live or not yet swept
    pub total_entries: usize,
}

impl CacheStats {
    /// hits / (hits + misses), or 0.0 before the first read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
