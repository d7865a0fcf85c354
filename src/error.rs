//! Error types for the leaderboard proxy

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::sheets::FetchError;

/// Request-level errors, converted to a single JSON error response
#[derive(Error, Debug)]
pub enum AppError {
    /// The event sheet exists but holds no rows, or does not exist at all
    #[error("No data found for event sheet: {event}")]
    NotFound { event: String },

    /// Any other upstream or transport failure
    #[error("Failed to fetch sheet data")]
    Fetch(String),
}

impl AppError {
    /// Map a fetch failure for `event` to its client-visible error
    pub fn from_fetch(event: &str, err: FetchError) -> Self {
        match err {
            FetchError::NoData => AppError::NotFound {
                event: event.to_string(),
            },
            other => AppError::Fetch(other.to_string()),
        }
    }
}

/// Error response structure for API
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, details) = match &self {
            AppError::NotFound { .. } => (StatusCode::NOT_FOUND, None),
            AppError::Fetch(msg) => (StatusCode::INTERNAL_SERVER_ERROR, Some(msg.clone())),
        };

        match &details {
            Some(details) => tracing::error!(
                error_type = %self,
                details = %details,
                status_code = %status_code,
                "Request error"
            ),
            None => tracing::warn!(
                error_type = %self,
                status_code = %status_code,
                "Request error"
            ),
        }

        let body = ErrorResponse {
            error: self.to_string(),
            details,
        };

        (status_code, Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
