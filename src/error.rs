//! Error types for the pipeline analytics service.
//!
//! Per-record problems (bad origin, unknown stage) are not errors; the
//! analytics fall back to defaults. Only a failed deal fetch reaches a client,
//! and then only as a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// Failure to load the deal list from its source.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("deal query failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("deal source unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("failed to retrieve deals: {0}")]
    Retrieval(#[from] RetrievalError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Internal server error" })),
        )
            .into_response()
    }
}

/// Invalid configuration read from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be at least {min}, got {value}")]
    OutOfRange { key: &'static str, min: i64, value: i64 },
}
