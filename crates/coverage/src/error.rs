use std::time::Duration;

use thiserror::Error;

/// Failures of the external aggregated-observations store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("observation store unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read observations: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse observations JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from the coverage path. Every variant is fatal for the request;
/// there is no partial ranking.
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("invalid coverage filter: {0}")]
    InvalidFilter(String),
    #[error("invalid coverage config: {0}")]
    InvalidConfig(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("coverage aggregation timed out after {0:?}")]
    Timeout(Duration),
}
