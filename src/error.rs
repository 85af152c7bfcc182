//! Error types for Chatgate
//!
//! HTTP-facing errors. Each variant maps to a status code and renders as
//! `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::gateway::{GatewayResult, Outcome};

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Provider(String),

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    NotConfigured(String),

    #[error("{0}")]
    UpstreamError(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Shown when a failed result carries no detail of its own
const GENERIC_FAILURE: &str = "The assistant could not answer right now";

impl AppError {
    /// Convert a failed gateway result into an HTTP error
    ///
    /// Returns `None` for successful results.
    pub fn from_gateway(result: &GatewayResult) -> Option<Self> {
        let detail = result
            .error_detail
            .clone()
            .unwrap_or_else(|| GENERIC_FAILURE.to_string());

        match result.outcome {
            Outcome::Ok => None,
            Outcome::ValidationError => Some(AppError::BadRequest(detail)),
            Outcome::ProviderError => Some(AppError::Provider(detail)),
            Outcome::TransportError => Some(AppError::Transport(detail)),
            Outcome::Misconfigured => Some(AppError::ServiceUnavailable(detail)),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Provider(_)
            | AppError::Transport(_)
            | AppError::NotConfigured(_)
            | AppError::UpstreamError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
