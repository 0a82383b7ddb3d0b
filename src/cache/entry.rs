//! Cache Entry Module
//!
//! A stored value with its expiry deadline.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cached value and the instant it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized product
    pub value: String,
    /// Deadline after which the entry is treated as absent
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now.
    pub fn new(value: String, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    // == Is Expired ==
    /// An entry is expired once the current time reaches its deadline, so a
    /// zero TTL is never served.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Remaining lifetime, zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_entry_not_expired_before_deadline() {
        let entry = CacheEntry::new("v".to_string(), Duration::from_secs(60));
        assert!(!entry.is_expired());
        assert!(entry.ttl_remaining() > Duration::from_secs(59));
    }

    #[test]
    fn test_entry_expires() {
        let entry = CacheEntry::new("v".to_string(), Duration::from_millis(20));
        sleep(Duration::from_millis(40));

        assert!(entry.is_expired());
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("v".to_string(), Duration::from_secs(10));
        assert!(entry.is_expired_at(entry.expires_at));
        assert!(!entry.is_expired_at(entry.expires_at - Duration::from_millis(1)));
    }

    #[test]
    fn test_zero_ttl_is_expired_immediately() {
        let entry = CacheEntry::new("v".to_string(), Duration::ZERO);
        assert!(entry.is_expired());
    }
}
