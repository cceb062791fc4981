//! API error mapping and helpers shared by the entity handlers.

use crate::AppState;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;
use xavier_roster::RosterError;

/// Payload returned by `GET /`.
pub const WELCOME_MESSAGE: &str = "Welcome to The Xavier Institute API";

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    BadRequest(String),
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
    #[error("unprocessable entity: {0}")]
    UnprocessableEntity(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("rejected: {1}")]
    Rejected(StatusCode, String),
    #[error("internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::UnsupportedMediaType(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Rejected(status, msg) => (status, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::UnprocessableEntity(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => ApiError::BadRequest(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => {
                ApiError::UnsupportedMediaType(e.body_text())
            }
            other => ApiError::Rejected(other.status(), other.body_text()),
        }
    }
}

impl From<RosterError> for ApiError {
    fn from(e: RosterError) -> Self {
        if e.is_integrity_violation() {
            ApiError::Conflict(e.to_string())
        } else {
            tracing::error!(error = %e, "roster operation failed");
            ApiError::InternalServerError(e.to_string())
        }
    }
}

/// Runs `f` on a blocking thread with a connection borrowed from the pool.
///
/// The connection goes back to the pool when `f` returns, whatever the
/// outcome.
pub(crate) async fn with_connection<T, F>(state: Arc<AppState>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&rusqlite::Connection) -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let conn = state.pool.get().map_err(|e| {
            tracing::error!(error = %e, "failed to acquire database connection");
            ApiError::InternalServerError(format!("db connection failed: {}", e))
        })?;
        f(&conn)
    })
    .await
    .map_err(|e| ApiError::InternalServerError(format!("task join error: {}", e)))?
}

/// Handler for `GET /`.
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}
