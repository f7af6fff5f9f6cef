//! API route handlers
//!
//! - `health`: Health checks, readiness, and metrics
//! - `matching`: Query parsing, provider matching and the catalog listing
//! - `recommend`: Coverage-based provider recommendations

pub mod health;
pub mod matching;
pub mod recommend;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info (GET /)
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "climatch server",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1",
        "endpoints": [
            "/api/v1/match",
            "/api/v1/parse",
            "/api/v1/recommend",
            "/api/v1/catalog",
            "/health",
            "/ready",
            "/metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
