//! Domain-specific error types for symptom-triage

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Main error type for the triage engine and its HTTP surface
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("No data provided")]
    NoData,

    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },

    #[error("Invalid search query: {message}")]
    InvalidQuery { message: String },

    #[error("No symptoms provided")]
    MissingSymptoms,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl TriageError {
    /// Single-message validation failure
    pub fn invalid(message: impl Into<String>) -> Self {
        TriageError::Validation {
            errors: vec![message.into()],
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            TriageError::NoData
            | TriageError::MissingFields { .. }
            | TriageError::Validation { .. }
            | TriageError::InvalidQuery { .. }
            | TriageError::MissingSymptoms => StatusCode::BAD_REQUEST,
            TriageError::Config { .. }
            | TriageError::Serialization { .. }
            | TriageError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for TriageError {
    fn from(err: anyhow::Error) -> Self {
        TriageError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(err: serde_json::Error) -> Self {
        TriageError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for TriageError {
    fn from(err: toml::de::Error) -> Self {
        TriageError::Config {
            message: err.to_string(),
        }
    }
}

/// Convert TriageError to a JSON HTTP response. Internal details stay in the logs.
impl IntoResponse for TriageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            TriageError::NoData => json!({
                "error": "No data provided",
                "message": "Please provide symptom data in JSON format"
            }),
            TriageError::MissingFields { fields } => {
                let message = format!("Please provide: {}", fields.join(", "));
                json!({
                    "error": "Missing required fields",
                    "missing_fields": fields,
                    "message": message
                })
            }
            TriageError::Validation { errors } => {
                tracing::warn!(?errors, "request validation failed");
                json!({
                    "error": "Validation failed",
                    "validation_errors": errors
                })
            }
            TriageError::InvalidQuery { message } => json!({
                "error": "Invalid search query",
                "message": message
            }),
            TriageError::MissingSymptoms => json!({ "error": "No symptoms provided" }),
            TriageError::Config { message }
            | TriageError::Serialization { message }
            | TriageError::Internal { message } => {
                tracing::error!(detail = %message, "internal error while serving request");
                json!({
                    "error": "Internal server error",
                    "message": "An error occurred while analyzing symptoms. Please try again.",
                    "timestamp": chrono::Utc::now().to_rfc3339()
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;
