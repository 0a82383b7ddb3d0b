//! Response models for the product API
//!
//! DTOs serialized into HTTP response bodies.

pub mod responses;

pub use responses::{EngineStatsResponse, MessageResponse, StatsResponse};
