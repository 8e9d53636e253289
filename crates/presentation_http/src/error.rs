//! API error handling
//!
//! Maps application failures onto HTTP status codes with a uniform JSON
//! body. Internal details are only exposed when switched on for development.

use std::sync::atomic::{AtomicBool, Ordering};

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Global flag to control error detail exposure
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Configure whether internal error details are included in responses
///
/// Off until switched on for development.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Inventory check failed: {0}")]
    InventoryUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Chaos error injected")]
    ChaosInjected,

    #[error("Service interrupted")]
    Interrupted,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::InventoryUnavailable(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ChaosInjected | Self::Interrupted | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let hidden = |msg: &String| should_expose_details().then(|| msg.clone());

        let (code, message, details) = match &self {
            Self::BadRequest(msg) => ("bad_request", msg.clone(), None),
            Self::InventoryUnavailable(reason) => (
                "inventory_unavailable",
                "Inventory check failed".to_string(),
                hidden(reason),
            ),
            Self::NotFound(msg) => ("not_found", msg.clone(), None),
            Self::ChaosInjected => ("chaos_injected", "Chaos error injected".to_string(), None),
            Self::Interrupted => ("interrupted", "Service interrupted".to_string(), None),
            Self::Internal(msg) => (
                "internal_error",
                "Internal server error".to_string(),
                hidden(msg),
            ),
        };

        if status.is_server_error() {
            tracing::error!(code, error = %self, "Request failed");
        } else {
            tracing::debug!(code, error = %self, "Request rejected");
        }

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::InvalidRequest(msg) | ApplicationError::InvalidConfig(msg) => {
                Self::BadRequest(msg)
            },
            ApplicationError::InventoryUnavailable(reason) => Self::InventoryUnavailable(reason),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::ChaosInjected => Self::ChaosInjected,
            ApplicationError::Interrupted => Self::Interrupted,
            ApplicationError::Downstream(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApplicationError::from(err).into()
    }
}
