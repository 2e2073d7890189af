//! API error type and its JSON response mapping.

use crate::job::{
    domain::JobId,
    ports::ValidationRejection,
    services::{IntakeError, JobLifecycleError},
};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Value, json};

/// Errors surfaced to HTTP clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request body is not a valid processing request.
    InvalidBody(String),
    /// The validator rejected the request.
    Validation(ValidationRejection),
    /// The path does not carry a well-formed job id.
    InvalidJobId(String),
    /// No job exists with the given id.
    JobNotFound(JobId),
    /// An unexpected server-side failure.
    Internal(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job_id: Option<String>,
}

impl ErrorBody {
    fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            details: None,
            job_id: None,
        }
    }
}

impl ApiError {
    /// Returns the HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidBody(_) | Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidJobId(_) => StatusCode::BAD_REQUEST,
            Self::JobNotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn into_body(self) -> ErrorBody {
        match self {
            Self::InvalidBody(message) => ErrorBody {
                details: Some(json!({ "error": message })),
                ..ErrorBody::new("INVALID_BODY", "Request body is not a valid processing request")
            },
            Self::Validation(rejection) => {
                let details = json!({ "code": &rejection.code, "error": &rejection.message });
                ErrorBody {
                    details: Some(details),
                    ..ErrorBody::new(rejection.code, rejection.message)
                }
            }
            Self::InvalidJobId(raw) => {
                ErrorBody::new("INVALID_JOB_ID", format!("Invalid job ID: {raw}"))
            }
            Self::JobNotFound(job_id) => ErrorBody {
                job_id: Some(job_id.to_string()),
                ..ErrorBody::new("JOB_NOT_FOUND", format!("Job {job_id} not found"))
            },
            Self::Internal(message) => ErrorBody::new("INTERNAL_ERROR", message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(message) = &self {
            tracing::error!(error = %message, "Request failed");
        }
        (status, Json(self.into_body())).into_response()
    }
}

impl From<JobLifecycleError> for ApiError {
    fn from(err: JobLifecycleError) -> Self {
        match err {
            JobLifecycleError::NotFound(job_id) => Self::JobNotFound(job_id),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Validation(rejection) => Self::Validation(rejection),
            IntakeError::Lifecycle(other) => {
                Self::Internal(format!("Failed to create processing job: {other}"))
            }
        }
    }
}
