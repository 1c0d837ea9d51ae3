//! HTTP error envelope
//!
//! Every failure renders as `{"error": "<message>"}` with a non-2xx status.

use crate::error::Error;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::warn;

/// Error returned by every handler
#[derive(Debug)]
pub struct AppError {
    /// Response status
    pub status: StatusCode,
    /// Human-readable message
    pub message: String,
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::InvalidLocator(_) | Error::MalformedInput(_) => StatusCode::BAD_REQUEST,
            Error::RemoteNotFound { .. } => StatusCode::NOT_FOUND,
            Error::RemoteConflict { .. } => StatusCode::CONFLICT,
            Error::RemoteRejected { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            Error::Http(_) | Error::GitHubApi(_) => StatusCode::BAD_GATEWAY,
            Error::Auth(_) | Error::Json(_) | Error::Io(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            StatusCode::PAYLOAD_TOO_LARGE
        } else {
            StatusCode::BAD_REQUEST
        };

        Self {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, error = %self.message, "request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
