//! Metrics Upkeep Task
//!
//! Histogram samples sit in the recorder until a scrape drains them; this
//! task drains them on a timer so an unscraped process does not grow.

use std::time::Duration;

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::task::JoinHandle;
use tracing::info;

/// Spawns a task that runs recorder upkeep every `interval`.
pub fn spawn_metrics_upkeep(handle: PrometheusHandle, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting metrics upkeep task with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            handle.run_upkeep();
        }
    })
}
