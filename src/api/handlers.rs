//! API Handlers
//!
//! HTTP request handlers for the product service endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{error, warn};

use crate::error::{ApiError, LookupError};
use crate::lookup::ProductLookup;
use crate::models::StatsResponse;
use crate::product::Product;
use crate::telemetry;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<ProductLookup>,
    /// Renders the process-wide Prometheus recorder
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Wraps `lookup`, installing the metrics recorder if this is the first state.
    pub fn new(lookup: ProductLookup) -> Self {
        Self {
            lookup: Arc::new(lookup),
            metrics: telemetry::install_recorder(),
        }
    }
}

/// Handler for GET /products/:id
///
/// 200 with the product, 404 when neither cache nor store has it, 400 for a
/// non-numeric id, 500 when the store fails.
pub async fn product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    match state.lookup.fetch(&id).await {
        Ok(Some(product)) => Ok(Json(product)),
        Ok(None) => Err(ApiError::NotFound(id)),
        Err(err) => {
            match &err {
                LookupError::Validation(_) => warn!("Rejected product id {:?}: {}", id, err),
                LookupError::System(_) => error!("Error fetching product {}: {}", id, err),
            }
            Err(err.into())
        }
    }
}

/// Handler for GET /health
pub async fn health_handler() -> &'static str {
    "OK"
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let lookup = &state.lookup;
    let response = StatsResponse::new(lookup.cache_backend(), lookup.store_backend(), lookup.stats())
        .with_engine_stats(lookup.cache_engine_stats().await);
    Json(response)
}

/// Handler for GET /metrics
pub async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.render()
}
