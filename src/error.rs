//! Error types for the health hook endpoints and their HTTP mapping.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::metrics;

/// Message used when a fault carries no text of its own.
pub const GENERIC_FAULT_MESSAGE: &str = "Unknown error";

/// Unexpected runtime fault while reading or processing a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Fault with an underlying message.
    #[error("{0}")]
    Message(String),

    /// Fault without any usable message.
    #[error("{}", GENERIC_FAULT_MESSAGE)]
    Generic,
}

impl Fault {
    /// Build a fault from message text, treating blank text as generic.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            Fault::Generic
        } else {
            Fault::Message(message)
        }
    }
}

/// Terminal per-request error.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request used a method other than POST or OPTIONS.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// One or more form fields failed validation.
    #[error("validation failed: {}", .errors.join("; "))]
    ValidationFailed {
        /// Human-readable reasons, in field order.
        errors: Vec<String>,
        /// When validation ran.
        validated_at: String,
    },

    /// Any other fault while handling the request.
    #[error("unexpected error: {0}")]
    Unexpected(#[from] Fault),
}

impl ApiError {
    /// Short label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::MethodNotAllowed => "method_not_allowed",
            ApiError::ValidationFailed { .. } => "validation_failed",
            ApiError::Unexpected(_) => "unexpected",
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Unexpected(Fault::from_message(err.to_string()))
    }
}

impl From<BytesRejection> for ApiError {
    fn from(err: BytesRejection) -> Self {
        ApiError::Unexpected(Fault::from_message(err.body_text()))
    }
}

impl From<time::error::Format> for ApiError {
    fn from(err: time::error::Format) -> Self {
        ApiError::Unexpected(Fault::from_message(err.to_string()))
    }
}

#[derive(Serialize)]
struct MethodNotAllowedBody {
    error: &'static str,
}

#[derive(Serialize)]
struct ValidationFailedBody {
    status: &'static str,
    errors: Vec<String>,
    validated_at: String,
}

#[derive(Serialize)]
struct FaultBody {
    status: &'static str,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        metrics::inc_handler_errors(self.kind());

        match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(MethodNotAllowedBody {
                    error: "Method not allowed",
                }),
            )
                .into_response(),
            ApiError::ValidationFailed {
                errors,
                validated_at,
            } => (
                StatusCode::BAD_REQUEST,
                Json(ValidationFailedBody {
                    status: "validation_failed",
                    errors,
                    validated_at,
                }),
            )
                .into_response(),
            ApiError::Unexpected(fault) => {
                tracing::error!(error = %fault, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(FaultBody {
                        status: "error",
                        error: fault.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ApiError>;
