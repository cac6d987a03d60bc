//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::services::ServiceError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Schedule violation messages, in rule order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            violations: Vec::new(),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_violations(mut self, violations: Vec<String>) -> Self {
        self.violations = violations;
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// No route matches the request
    NotFound(String),
    /// Malformed path parameter or request body
    BadRequest(String),
    /// Repository error
    Repository(RepositoryError),
    /// Service error (schedule violations, closed phases)
    Service(ServiceError),
}

fn repository_response(e: RepositoryError) -> (StatusCode, ApiError) {
    let msg = e.to_string();
    let retryable = e.is_retryable();
    match e {
        RepositoryError::NotFound { .. } => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
        RepositoryError::ValidationError { .. } => {
            (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
        }
        RepositoryError::ConnectionError { .. } => {
            let error = ApiError::new("REPOSITORY_UNAVAILABLE", msg);
            let error = if retryable { error.with_details("retryable") } else { error };
            (StatusCode::SERVICE_UNAVAILABLE, error)
        }
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("REPOSITORY_ERROR", msg),
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Repository(e) => repository_response(e),
            AppError::Service(e) => match e {
                ServiceError::Repository(inner) => repository_response(inner),
                ServiceError::InvalidSchedule(_) => {
                    let violations = e.violation_messages();
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        ApiError::new("INVALID_SCHEDULE", e.to_string())
                            .with_violations(violations),
                    )
                }
                ServiceError::PhaseClosed { actual, .. } => (
                    StatusCode::CONFLICT,
                    ApiError::new("EVENT_PHASE_CLOSED", e.to_string())
                        .with_details(format!("phase={}", actual)),
                ),
                ServiceError::InvalidInput(ref msg) => (
                    StatusCode::BAD_REQUEST,
                    ApiError::new("BAD_REQUEST", msg.clone()),
                ),
            },
        };

        if status.is_server_error() {
            tracing::error!(code = %error.code, "{}", error.message);
        } else {
            tracing::warn!(status = status.as_u16(), code = %error.code, "request rejected");
        }

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError::Service(err)
    }
}
