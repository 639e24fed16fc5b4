//! Error taxonomy for wizard operations.

use thiserror::Error;

use crate::wizard::{Stage, WizardAction};

/// Errors surfaced to the student when a wizard action fails.
///
/// Every variant is terminal for the action that raised it: nothing is
/// written to the session and the student may retry or navigate away.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("no API key available: pass one explicitly or set {env_var}")]
    CredentialMissing { env_var: String },

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("completion failed: {0}")]
    Unknown(String),

    #[error("malformed {operation} output: {reason}")]
    MalformedOutput {
        operation: &'static str,
        reason: String,
        raw: String,
    },

    #[error("'{action}' is not available at stage {stage}")]
    InvalidTransition { action: WizardAction, stage: Stage },

    #[error("validation error: {0}")]
    Validation(String),
}

impl WizardError {
    /// Machine-readable code used by the HTTP envelope.
    pub fn code(&self) -> &'static str {
        match self {
            WizardError::CredentialMissing { .. } => "CREDENTIAL_MISSING",
            WizardError::Auth(_) => "AUTH_ERROR",
            WizardError::RateLimited(_) => "RATE_LIMITED",
            WizardError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            WizardError::Unknown(_) => "LLM_ERROR",
            WizardError::MalformedOutput { .. } => "MALFORMED_OUTPUT",
            WizardError::InvalidTransition { .. } => "INVALID_TRANSITION",
            WizardError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Short message shown to the student.
    pub fn user_message(&self) -> String {
        match self {
            WizardError::CredentialMissing { env_var } => {
                format!("No API key found. Enter one or set {env_var} and restart.")
            }
            WizardError::Auth(_) => "Invalid API key. Check the key you entered.".to_string(),
            WizardError::RateLimited(_) => {
                "Rate limit hit. Wait a few seconds and try again.".to_string()
            }
            WizardError::ServiceUnavailable(_) => {
                "The model service is temporarily unavailable. Try again in a moment.".to_string()
            }
            WizardError::Unknown(msg) => format!("Error: {msg}"),
            WizardError::MalformedOutput { operation, reason, .. } => {
                format!("Could not read the {operation} response ({reason}). Try again.")
            }
            WizardError::InvalidTransition { .. } | WizardError::Validation(_) => self.to_string(),
        }
    }

    /// Raw model output for diagnosis, when the error carries one.
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            WizardError::MalformedOutput { raw, .. } => Some(raw),
            _ => None,
        }
    }
}
