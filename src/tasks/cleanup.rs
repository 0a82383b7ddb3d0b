//! TTL Cleanup Task
//!
//! Expired entries are already hidden from reads; this task reclaims their
//! memory when nobody asks for them again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheEngine;

/// Spawns a task that sweeps expired entries from `engine` every `interval`.
///
/// The write lock is held only for the sweep itself. The returned handle is
/// aborted on shutdown.
///
/// # Example
/// ```ignore
/// let cache = MemoryCache::new(10_000);
/// let cleanup_handle = spawn_cleanup_task(cache.engine(), Duration::from_secs(60));
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(engine: Arc<RwLock<CacheEngine>>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut guard = engine.write().await;
                let removed = guard.cleanup_expired();
                (removed, guard.len())
            };

            if removed > 0 {
                info!(
                    "TTL cleanup: removed {} expired entries, {} remaining",
                    removed, remaining
                );
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
