//! Validator port consulted before a job is created.

use crate::job::domain::ProcessingRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error code used when a validator rejects a request without a code.
pub const DEFAULT_VALIDATION_CODE: &str = "VALIDATION_ERROR";

/// Source video properties discovered during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    /// Source duration in seconds.
    pub duration_secs: f64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Container format name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Outcome of validating a processing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Whether the request may be processed.
    pub valid: bool,
    /// Machine-readable rejection code.
    pub code: Option<String>,
    /// Human-readable rejection message.
    pub error: Option<String>,
    /// Source video properties, when the validator probed the source.
    pub video_info: Option<VideoInfo>,
}

impl ValidationOutcome {
    /// Creates an accepting outcome.
    #[must_use]
    pub const fn accepted(video_info: Option<VideoInfo>) -> Self {
        Self {
            valid: true,
            code: None,
            error: None,
            video_info,
        }
    }

    /// Creates a rejecting outcome.
    #[must_use]
    pub fn rejected(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            valid: false,
            code: Some(code.into()),
            error: Some(error.into()),
            video_info: None,
        }
    }

    /// Converts the outcome into accepted video info or a rejection.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationRejection`] when the outcome is not valid.
    pub fn into_result(self) -> Result<Option<VideoInfo>, ValidationRejection> {
        if self.valid {
            return Ok(self.video_info);
        }
        let message = self
            .error
            .unwrap_or_else(|| "request failed validation".to_owned());
        let code = self
            .code
            .unwrap_or_else(|| DEFAULT_VALIDATION_CODE.to_owned());
        Err(ValidationRejection { code, message })
    }
}

/// A validator's rejection of a processing request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ValidationRejection {
    /// Machine-readable rejection code.
    pub code: String,
    /// Human-readable rejection message.
    pub message: String,
}

/// Request validation contract.
#[async_trait]
pub trait RequestValidator: Send + Sync {
    /// Validates a normalized processing request.
    async fn validate(&self, request: &ProcessingRequest) -> ValidationOutcome;
}
