//! REST API endpoints.
//!
//! Axum-based HTTP API for SoF upload and extraction, laytime calculation,
//! the assistant chat, and record export.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::agents::AgentError;
use crate::document::DocumentError;

pub mod routes;
pub mod state;

pub use routes::build_router;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable document: {0}")]
    UnprocessableDocument(String),

    #[error("{0}")]
    QuotaExceeded(String),

    #[error("AI backend unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::UnprocessableDocument(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNPROCESSABLE_DOCUMENT")
            }
            ApiError::QuotaExceeded(_) => (StatusCode::TOO_MANY_REQUESTS, "QUOTA_EXCEEDED"),
            ApiError::GatewayUnavailable(_) => (StatusCode::BAD_GATEWAY, "GATEWAY_UNAVAILABLE"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::MissingFields(field) => ApiError::UnprocessableDocument(format!(
                "The document could not be processed: missing {}",
                field
            )),
            AgentError::RateLimited(_) => ApiError::QuotaExceeded(
                "AI service quota exceeded. Please wait a moment and try again.".to_string(),
            ),
            AgentError::BackendUnavailable(msg) => ApiError::GatewayUnavailable(msg),
            AgentError::ResponseParseError(msg) => {
                ApiError::GatewayUnavailable(format!("AI response was not usable: {}", msg))
            }
        }
    }
}

impl From<DocumentError> for ApiError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::UnsupportedType(t) => {
                ApiError::BadRequest(format!("Unsupported document type: {}", t))
            }
            DocumentError::InvalidDataUri(msg) => {
                ApiError::BadRequest(format!("Invalid data URI: {}", msg))
            }
            DocumentError::Parse(msg) => ApiError::UnprocessableDocument(msg),
        }
    }
}
