//! Error types and HTTP translation for the weathergate service

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// A single field-level validation failure, reported in the error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field ("latitude" or "longitude")
    pub field: String,
    /// Human-readable description of the failure
    pub message: String,
}

impl FieldError {
    pub fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Closed error taxonomy for the weathergate service.
///
/// Every failure a request can produce is one of these variants; the
/// [`IntoResponse`] impl below is the single place an error becomes an
/// HTTP status and JSON body.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input validation errors, raised before any I/O
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    /// Upstream reported the location does not exist (never retried)
    #[error("{message}")]
    NotFound { message: String },

    /// Upstream failure: non-success status, malformed response, retries exhausted
    #[error("{message}")]
    ServiceUnavailable { message: String },

    /// Catch-all for anything outside the closed set
    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    /// Create a new validation error with no field details
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Create a validation error from field-level failures.
    ///
    /// The first field's message doubles as the top-level message.
    #[must_use]
    pub fn validation_fields(details: Vec<FieldError>) -> Self {
        let message = details
            .first()
            .map_or_else(|| "Validation failed".to_string(), |d| d.message.clone());
        Self::Validation { message, details }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new service-unavailable error
    pub fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to at the boundary
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wire name of the error kind, as exposed in the JSON body
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "ValidationError",
            AppError::NotFound { .. } => "NotFoundError",
            AppError::ServiceUnavailable { .. } => "ServiceUnavailableError",
            AppError::Internal { .. } => "InternalServerError",
        }
    }
}

/// JSON body sent for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let details = match &self {
            AppError::Validation { details, .. } => details.clone(),
            _ => Vec::new(),
        };

        tracing::warn!(
            status = status.as_u16(),
            error = self.kind_name(),
            message = %self,
            "Request failed"
        );

        let body = ErrorBody {
            success: false,
            error: self.kind_name(),
            message: self.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
