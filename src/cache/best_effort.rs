//! Best-effort cache calls.

use std::future::Future;

use tracing::warn;

use crate::error::CacheFailure;

/// Awaits a cache operation and absorbs its failure.
///
/// Returns `Some(value)` on success. A failure is logged at `warn` with the
/// operation name and key, and yields `None`; it is never propagated.
pub async fn best_effort<T, F>(operation: &'static str, key: &str, op: F) -> Option<T>
where
    F: Future<Output = Result<T, CacheFailure>>,
{
    match op.await {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(operation, key, error = %err, "Cache operation failed, continuing without cache");
            None
        }
    }
}
