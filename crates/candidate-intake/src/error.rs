use crate::config::ConfigError;
use crate::intake::IntakeError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use tracing::error;

/// Process-level failures surfaced by the service binary.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Payload(serde_json::Error),
    InvalidCandidateId(String),
    Intake(IntakeError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Payload(err) => write!(f, "malformed candidate payload: {}", err),
            AppError::InvalidCandidateId(raw) => write!(f, "'{}' is not a candidate id", raw),
            AppError::Intake(err) => write!(f, "candidate rejected: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Payload(err) => Some(err),
            AppError::InvalidCandidateId(_) => None,
            AppError::Intake(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Payload(_)
            | AppError::InvalidCandidateId(_)
            | AppError::Intake(IntakeError::Validation(_)) => StatusCode::BAD_REQUEST,
            AppError::Intake(IntakeError::DuplicateEmail) => StatusCode::CONFLICT,
            AppError::Intake(IntakeError::CandidateNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Intake(IntakeError::Storage(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Intake failures are reported to clients with their domain message only.
        let body = match &self {
            AppError::Intake(IntakeError::Validation(err)) => {
                json!({ "error": err.to_string(), "field": err.field() })
            }
            AppError::Intake(IntakeError::Storage(storage)) => {
                error!(error = %storage, code = ?storage.code(), "candidate storage failure");
                json!({ "error": storage.to_string() })
            }
            AppError::Intake(err) => json!({ "error": err.to_string() }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Payload(value)
    }
}

impl From<IntakeError> for AppError {
    fn from(value: IntakeError) -> Self {
        Self::Intake(value)
    }
}
