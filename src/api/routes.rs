//! API Routes
//!
//! Configures the Axum router with the product service endpoints.

use axum::{middleware, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, metrics_handler, product_handler, stats_handler, AppState};
use super::middleware::track_metrics;

/// Creates the main router.
///
/// # Endpoints
/// - `GET /products/:id` - Product by numeric id
/// - `GET /health` - Liveness check, always `OK`
/// - `GET /stats` - Lookup counters
/// - `GET /metrics` - Prometheus text exposition
///
/// # Middleware
/// - Metrics: Request count and latency per matched route
/// - CORS: Allows any origin
/// - Tracing: One span per request
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/products/:id", get(product_handler))
        .route("/health", get(health_handler))
        .route("/stats", get(stats_handler))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::lookup::ProductLookup;
    use crate::product::Product;
    use crate::store::MemoryStore;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let store = MemoryStore::new([Product::new(1)]);
        let lookup = ProductLookup::new(Arc::new(MemoryCache::new(100)), Arc::new(store));
        create_router(AppState::new(lookup))
    }

    async fn status_of(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_route_statuses() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
        assert_eq!(status_of("/stats").await, StatusCode::OK);
        assert_eq!(status_of("/products/1").await, StatusCode::OK);
        assert_eq!(status_of("/products/2").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of("/products/abc").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_metrics_route_exposes_request_series() {
        let app = create_test_app();
        app.clone()
            .oneshot(Request::builder().uri("/products/1").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let response = app
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();

        assert!(body.contains("# TYPE http_requests_total counter"));
        assert!(body.contains(r#"route="/products/:id""#));
        assert!(body.contains(r#"status="200""#));
        assert!(body.contains("# TYPE http_request_duration_seconds histogram"));
        assert!(body.contains("http_request_duration_seconds_bucket{"));
    }

    #[tokio::test]
    async fn test_empty_id_is_unrouted() {
        assert_eq!(status_of("/products/").await, StatusCode::NOT_FOUND);
    }
}
