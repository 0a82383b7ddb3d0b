//! Error types for the product lookup service
//!
//! Separates the failures the lookup absorbs (cache) from the ones it
//! surfaces (validation, store), and maps the surfaced ones onto HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::MessageResponse;

/// Message returned for identifiers that are not all ASCII digits.
pub const INVALID_PRODUCT_ID: &str = "Product ID must be a number.";

// == Cache Failure ==
/// Any failure raised by a cache backend, on read or write.
///
/// Never crosses the lookup boundary: the orchestrator logs it and carries on.
#[derive(Error, Debug)]
pub enum CacheFailure {
    /// Connection or command failure in the backend
    #[error("cache backend unavailable: {0}")]
    Backend(String),

    /// Stored value is not a valid product document
    #[error("cached value could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// Product could not be serialized for storage
    #[error("product could not be encoded for caching: {0}")]
    Encode(#[source] serde_json::Error),

    /// Backend refused the entry (size limits, capacity)
    #[error("cache rejected entry: {0}")]
    Rejected(String),
}

// == Store Failure ==
/// Failure raised by the product store.
#[derive(Error, Debug)]
pub enum StoreFailure {
    #[error("database query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store backend failure: {0}")]
    Backend(String),
}

// == Lookup Error ==
/// Failures that a product lookup reports to its caller.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Identifier rejected before any I/O
    #[error("{0}")]
    Validation(String),

    /// Store could not answer the query
    #[error("System error while fetching product: {0}")]
    System(#[source] StoreFailure),
}

impl LookupError {
    pub fn invalid_id() -> Self {
        LookupError::Validation(INVALID_PRODUCT_ID.to_string())
    }
}

// == API Error ==
/// HTTP-facing error for the product endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidId(String),

    #[error("product id={0} not found in system")]
    NotFound(String),

    /// Store failure; the cause is logged, never sent to the client
    #[error("System error")]
    System,
}

impl From<LookupError> for ApiError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::Validation(msg) => ApiError::InvalidId(msg),
            LookupError::System(_) => ApiError::System,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::System => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
