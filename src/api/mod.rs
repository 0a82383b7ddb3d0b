//! API Module
//!
//! HTTP handlers and routing for the product service.
//!
//! # Endpoints
//! - `GET /products/:id` - Product by id, read through the cache
//! - `GET /health` - Health check endpoint
//! - `GET /stats` - Lookup statistics
//! - `GET /metrics` - Prometheus scrape endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
