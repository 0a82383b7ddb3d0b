//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use product_lookup::{
    api::create_router,
    cache::{MemoryCache, ProductCache, RedisCache},
    error::StoreFailure,
    product::{Product, ProductId},
    store::{MemoryStore, ProductStore},
    AppState, ProductLookup,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Helper Functions ==

/// Store that fails every query, counting the attempts
#[derive(Default)]
struct BrokenStore {
    calls: AtomicUsize,
}

#[async_trait]
impl ProductStore for BrokenStore {
    async fn get_by_id(&self, _id: &ProductId) -> Result<Option<Product>, StoreFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreFailure::Backend("Database connection failed".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "broken"
    }
}

fn catalogue() -> MemoryStore {
    MemoryStore::new([
        Product::new(1)
            .with_field("name", "Test Product")
            .with_field("price", 99.99)
            .with_field("description", "Test Description"),
        Product::new(123).with_field("name", "Valid Product"),
    ])
}

fn create_app(cache: Arc<dyn ProductCache>, store: Arc<dyn ProductStore>) -> Router {
    create_router(AppState::new(ProductLookup::new(cache, store)))
}

fn create_test_app() -> Router {
    create_app(Arc::new(MemoryCache::new(100)), Arc::new(catalogue()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = get(app, uri).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

// == GET /products/:id ==

#[tokio::test]
async fn test_product_found() {
    let (status, body) = get_json(create_test_app(), "/products/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "name": "Test Product",
            "price": 99.99,
            "description": "Test Description"
        })
    );
}

#[tokio::test]
async fn test_product_not_found() {
    let (status, body) = get_json(create_test_app(), "/products/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "product id=999 not found in system"}));
}

#[tokio::test]
async fn test_invalid_ids_are_bad_requests() {
    for uri in ["/products/abc", "/products/-1", "/products/1.5", "/products/%40%23%24"] {
        let (status, body) = get_json(create_test_app(), uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({"message": "Product ID must be a number."}));
    }
}

#[tokio::test]
async fn test_invalid_id_never_reaches_store() {
    let store = Arc::new(BrokenStore::default());
    let app = create_app(Arc::new(MemoryCache::new(100)), store.clone());

    let (status, _) = get_json(app, "/products/12a").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_store_failure_is_system_error() {
    let app = create_app(Arc::new(MemoryCache::new(100)), Arc::new(BrokenStore::default()));

    let (status, body) = get_json(app, "/products/1").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "System error"}));
}

#[tokio::test]
async fn test_empty_id_is_not_routed() {
    let (status, _) = get(create_test_app(), "/products/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_hit_warms_cache() {
    let cache = MemoryCache::new(100);
    let app = create_app(Arc::new(cache.clone()), Arc::new(catalogue()));

    let (status, _) = get_json(app, "/products/123").await;
    assert_eq!(status, StatusCode::OK);

    let cached = cache.get("product_123").await.unwrap().unwrap();
    assert_eq!(cached.fields["name"], "Valid Product");

    let ttl = cache.ttl_remaining("product_123").await.unwrap();
    assert!(ttl > Duration::from_secs(3590) && ttl <= Duration::from_secs(3600));
}

#[tokio::test]
async fn test_cached_product_served_when_store_down() {
    let cache = MemoryCache::new(100);
    cache
        .set(
            "product_5",
            &Product::new(5).with_field("name", "Cached"),
            Duration::from_secs(60),
        )
        .await
        .unwrap();
    let app = create_app(Arc::new(cache), Arc::new(BrokenStore::default()));

    let (status, body) = get_json(app, "/products/5").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 5, "name": "Cached"}));
}

#[tokio::test]
async fn test_cache_outage_does_not_fail_requests() {
    // Nothing listens on port 1, so every cache call fails
    let cache = RedisCache::open("redis://127.0.0.1:1").unwrap();
    let app = create_app(Arc::new(cache), Arc::new(catalogue()));

    let (status, body) = get_json(app.clone(), "/products/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    let (status, _) = get_json(app, "/products/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == GET /health ==

#[tokio::test]
async fn test_health_endpoint() {
    let (status, body) = get(create_test_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

// == GET /stats ==

#[tokio::test]
async fn test_stats_endpoint_reflects_lookups() {
    let app = create_test_app();

    get(app.clone(), "/products/1").await;
    get(app.clone(), "/products/1").await;
    get(app.clone(), "/products/abc").await;

    let (status, body) = get_json(app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cache_backend"], "memory");
    assert_eq!(body["store_backend"], "memory");
    assert_eq!(body["cache_hits"], 1);
    assert_eq!(body["cache_misses"], 1);
    assert_eq!(body["store_hits"], 1);
    assert_eq!(body["validation_errors"], 1);
    assert_eq!(body["hit_rate"], 0.5);

    assert_eq!(body["cache_engine"]["hits"], 1);
    assert_eq!(body["cache_engine"]["misses"], 1);
    assert_eq!(body["cache_engine"]["total_entries"], 1);
    assert_eq!(body["cache_engine"]["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_stats_omits_engine_for_redis() {
    let cache = RedisCache::open("redis://127.0.0.1:1").unwrap();
    let app = create_app(Arc::new(cache), Arc::new(catalogue()));

    let (status, body) = get_json(app, "/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cache_backend"], "redis");
    assert!(body.get("cache_engine").is_none());
}

// == GET /metrics ==

#[tokio::test]
async fn test_metrics_endpoint_is_prometheus_text() {
    let app = create_test_app();

    get(app.clone(), "/products/999").await;
    get(app.clone(), "/products/abc").await;

    let (status, bytes) = get(app, "/metrics").await;
    let body = String::from_utf8(bytes).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"product_lookup_outcomes_total{outcome="store_miss"}"#));
    assert!(body.contains(r#"product_lookup_outcomes_total{outcome="validation_error"}"#));
    assert!(body.contains(r#"status="404""#));
    assert!(body.contains(r#"status="400""#));
}

// == Live Server ==

#[tokio::test]
async fn test_served_over_tcp() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, create_test_app()).await.unwrap();
    });

    let client = reqwest::Client::new();
    let response = client
        .get(format!("http://{}/products/123", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let product: Product = response.json().await.unwrap();
    assert_eq!(product.id, 123);

    let health = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(health.text().await.unwrap(), "OK");

    server.abort();
}
