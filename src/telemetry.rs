//! Prometheus Metrics
//!
//! Installs the process-wide `metrics` recorder and names the series the
//! service emits. `GET /metrics` renders them in the Prometheus text format.

use std::sync::OnceLock;

use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::warn;

/// Requests served, labelled by method, route and status
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

/// Request latency, labelled by method and route
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Lookups by outcome (`cache_hit`, `store_miss`, ...)
pub const LOOKUP_OUTCOMES_TOTAL: &str = "product_lookup_outcomes_total";

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the Prometheus recorder on first call and returns its handle.
///
/// Later calls return the same handle. If another recorder already owns the
/// global slot, the handle still renders but stays empty.
pub fn install_recorder() -> PrometheusHandle {
    HANDLE.get_or_init(build_and_install).clone()
}

fn build_and_install() -> PrometheusHandle {
    let builder = PrometheusBuilder::new();
    let builder = match builder.set_buckets_for_metric(
        Matcher::Full(HTTP_REQUEST_DURATION_SECONDS.to_string()),
        LATENCY_BUCKETS,
    ) {
        Ok(builder) => builder,
        Err(err) => {
            warn!("Latency buckets rejected, falling back to summaries: {}", err);
            PrometheusBuilder::new()
        }
    };

    let recorder = builder.build_recorder();
    let handle = recorder.handle();
    if let Err(err) = metrics::set_global_recorder(recorder) {
        warn!("Metrics recorder not installed: {}", err);
    }

    describe_metrics();
    handle
}

fn describe_metrics() {
    describe_counter!(
        HTTP_REQUESTS_TOTAL,
        Unit::Count,
        "Total number of HTTP requests by method, route and status."
    );
    describe_histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        Unit::Seconds,
        "HTTP request latency by method and route."
    );
    describe_counter!(
        LOOKUP_OUTCOMES_TOTAL,
        Unit::Count,
        "Product lookups by outcome."
    );
}
