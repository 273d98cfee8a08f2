//! API error handling.
//!
//! Provides consistent error responses for the API. All failures are terminal
//! for the request; the underlying diagnostic text is embedded in the body so
//! the caller sees a best-effort human-readable reason.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::Error;
use crate::extractor::ExtractorError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

/// API error type that can be converted to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a 400 Bad Request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BAD_REQUEST", message)
    }

    /// Create a 404 Not Found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", message)
    }

    /// Create a 500 Internal Server Error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            code: self.code,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(msg) => ApiError::bad_request(msg),
            Error::Extractor(ExtractorError::NotFound(msg)) => {
                ApiError::not_found(format!("Unable to resolve video: {msg}"))
            }
            Error::Extractor(e) => {
                tracing::error!(error = %e, "extraction failed");
                ApiError::internal(format!("Extraction failed: {e}"))
            }
            Error::Transfer(msg) => {
                tracing::error!(error = %msg, "transfer failed");
                ApiError::internal(format!("Transfer failed: {msg}"))
            }
            Error::Upstream(e) => {
                tracing::error!(error = %e, "upstream request failed");
                ApiError::internal(format!("Upstream request failed: {e}"))
            }
            Error::Io(e) => {
                tracing::error!(error = %e, "io error");
                ApiError::internal(format!("IO error: {e}"))
            }
            Error::Configuration(msg) => ApiError::internal(msg),
        }
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
