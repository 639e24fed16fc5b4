//! Application error type mapping to HTTP status codes and envelope format.

use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use builderschool_types::error::WizardError;

use super::response::{ApiErrorDetail, ApiMeta, ApiResponse};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// A wizard action failed.
    Wizard(WizardError),
    /// The request body could not be read.
    Validation(String),
    /// The resource does not exist at the current stage.
    NotAvailable(String),
    /// Generic internal error.
    Internal(String),
}

impl From<WizardError> for AppError {
    fn from(e: WizardError) -> Self {
        AppError::Wizard(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Validation(e.body_text())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Wizard(e) => match e {
                WizardError::CredentialMissing { .. } | WizardError::Auth(_) => {
                    StatusCode::UNAUTHORIZED
                }
                WizardError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
                WizardError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                WizardError::Unknown(_) | WizardError::MalformedOutput { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                WizardError::InvalidTransition { .. } => StatusCode::CONFLICT,
                WizardError::Validation(_) => StatusCode::BAD_REQUEST,
            },
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotAvailable(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Wizard(e) => e.code(),
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotAvailable(_) => "NOT_AVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match &self {
            AppError::Wizard(e) => {
                if status.is_server_error() {
                    tracing::warn!(code, error = %e, "wizard action failed");
                }
                (e.user_message(), e.raw_output().map(|raw| json!({ "raw": raw })))
            }
            AppError::Validation(msg) | AppError::NotAvailable(msg) => (msg.clone(), None),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (msg.clone(), None)
            }
        };

        ApiResponse::error(
            ApiErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
            ApiMeta::since(Instant::now()),
        )
        .into_response_with(status)
    }
}
