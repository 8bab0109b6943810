use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use capvote_backend::BackendError;
use capvote_core::error::CoreError;
use serde_json::json;

/// Application-level error type for JSON handlers.
///
/// Wraps [`CoreError`] for domain errors and [`BackendError`] for failures of
/// the managed backend. Implements [`IntoResponse`] to produce consistent JSON
/// error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `capvote_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by (or while reaching) the backend.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),
            AppError::Backend(err) => classify_backend_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
    }
}

/// Classify a backend error into an HTTP status, error code, and message.
///
/// Backend messages are passed through unchanged so the user sees exactly
/// what the backend reported.
fn classify_backend_error(err: &BackendError) -> (StatusCode, &'static str, String) {
    match err {
        BackendError::Core(core) => classify_core_error(core),
        BackendError::Request(inner) => {
            tracing::warn!(error = %inner, "Backend unreachable");
            (
                StatusCode::BAD_GATEWAY,
                "BACKEND_UNAVAILABLE",
                err.to_string(),
            )
        }
        other => {
            tracing::warn!(error = %other, status = ?other.status(), "Backend error");
            (StatusCode::BAD_GATEWAY, "BACKEND_ERROR", other.to_string())
        }
    }
}
