use axum::http::StatusCode;
use tracing::error;

/// Rejection type shared by every handler.
pub type ApiError = (StatusCode, String);

pub fn internal(e: anyhow::Error) -> ApiError {
    error!(error = %format!("{e:#}"), "request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
}

pub fn bad_request(msg: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, msg.into())
}

pub fn not_found(what: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}
