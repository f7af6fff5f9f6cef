use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use coverage::CoverageError;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Match error: {0}")]
    Match(#[from] matcher::MatchError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] matcher::CatalogError),

    #[error("Coverage error: {0}")]
    Coverage(#[from] CoverageError),

    #[error("Observation store error: {0}")]
    Store(#[from] coverage::StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Coverage(CoverageError::InvalidFilter(_)) => StatusCode::BAD_REQUEST,
            ServerError::Coverage(CoverageError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ServerError::Coverage(CoverageError::Store(_)) | ServerError::Store(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::Coverage(CoverageError::InvalidConfig(_))
            | ServerError::Match(_)
            | ServerError::Catalog(_)
            | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Match(_) => "MATCH_ERROR",
            ServerError::Catalog(_) => "CATALOG_ERROR",
            ServerError::Coverage(CoverageError::InvalidFilter(_)) => "INVALID_FILTER",
            ServerError::Coverage(CoverageError::Timeout(_)) => "STORE_TIMEOUT",
            ServerError::Coverage(CoverageError::Store(_)) | ServerError::Store(_) => {
                "STORE_UNAVAILABLE"
            }
            ServerError::Coverage(CoverageError::InvalidConfig(_)) => "COVERAGE_CONFIG_ERROR",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(code = self.error_code(), error = %self, "request failed");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("worker task failed: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
