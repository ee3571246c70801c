use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Everything a handler can fail with, mapped onto one JSON error shape.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input: bad query string, missing body field,
    /// non-numeric measurement, unparseable date. Surfaced as 422.
    #[error("{0}")]
    Validation(String),

    /// A query that requires at least one row found none.
    #[error("{0}")]
    NotFound(&'static str),

    /// The database rejected an operation or is unreachable.
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_owned()),
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "Database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
