//! API error types and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use taskgate_protocols::BackendError;

/// Message returned to callers for every backend failure.
pub const BACKEND_FAILURE_MESSAGE: &str = "backend request failed";

/// Input rejected at the adapter, before any backend call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Task name is required")]
    EmptyName,

    #[error("Invalid task difficulty {value}: must be between 0 and {max}")]
    DifficultyOutOfRange { value: i64, max: i64 },

    #[error("Invalid task id '{0}': must be a 64-bit integer")]
    InvalidId(String),
}

/// Errors produced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    NotFound,
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// The message shown to callers. Backend details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Backend(_) => BACKEND_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Backend(e) => error!(
                backend = %e.backend(),
                status = e.backend_status().unwrap_or("-"),
                error = %e,
                "Backend call failed"
            ),
            Self::Validation(e) => warn!(error = %e, "Rejected request"),
            _ => {}
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
