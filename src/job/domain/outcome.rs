//! Terminal outcomes and progress snapshots recorded on a job.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error code reported when a failure message carries no code prefix.
pub const DEFAULT_FAILURE_CODE: &str = "PROCESSING_FAILED";

/// Metadata describing how a job output was produced.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingMetadata {
    /// Encoder command used to produce the output, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Further details reported by the processor (dimensions, size, ...).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
}

impl ProcessingMetadata {
    /// Creates metadata carrying only the encoder command.
    #[must_use]
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: Some(command.into()),
            details: Map::new(),
        }
    }

    /// Returns a detail as an unsigned integer, if present and numeric.
    #[must_use]
    pub fn detail_u64(&self, key: &str) -> Option<u64> {
        self.details.get(key).and_then(Value::as_u64)
    }

    /// Returns a detail as a float, if present and numeric.
    #[must_use]
    pub fn detail_f64(&self, key: &str) -> Option<f64> {
        self.details.get(key).and_then(Value::as_f64)
    }
}

/// Result recorded on a completed job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    /// Location of the produced output.
    pub output_location: String,
    /// Processing metadata.
    pub metadata: ProcessingMetadata,
    /// Wall-clock processing duration in milliseconds.
    pub duration_ms: u64,
}

/// Failure recorded on a failed job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFailure {
    message: String,
}

impl JobFailure {
    /// Creates a failure from a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the machine-readable code derived from the message.
    #[must_use]
    pub fn code(&self) -> &str {
        error_code_from_message(&self.message).unwrap_or(DEFAULT_FAILURE_CODE)
    }
}

/// Terminal outcome of a job. Exactly one is set once a job is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JobOutcome {
    /// The job completed successfully.
    Completed(JobResult),
    /// The job failed.
    Failed(JobFailure),
}

/// Progress snapshot for a processing job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobProgress {
    /// Completion percentage, clamped to `0..=100`.
    pub percent: u8,
    /// Human-readable processing stage.
    pub stage: String,
    /// Encoder throughput in frames per second, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,
    /// Estimated seconds remaining, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta_secs: Option<u64>,
}

impl JobProgress {
    /// Creates a progress snapshot. Percentages above 100 are clamped.
    #[must_use]
    pub fn new(percent: u8, stage: impl Into<String>) -> Self {
        Self {
            percent: percent.min(100),
            stage: stage.into(),
            fps: None,
            eta_secs: None,
        }
    }

    /// Sets encoder throughput.
    #[must_use]
    pub const fn with_fps(mut self, fps: f64) -> Self {
        self.fps = Some(fps);
        self
    }

    /// Sets the estimated time remaining.
    #[must_use]
    pub const fn with_eta_secs(mut self, eta_secs: u64) -> Self {
        self.eta_secs = Some(eta_secs);
        self
    }
}

/// Extracts an upper-snake error code from a `CODE: message` string.
///
/// Returns `None` when the text before the first `:` is not a non-empty
/// run of ASCII uppercase letters, digits and underscores.
#[must_use]
pub fn error_code_from_message(message: &str) -> Option<&str> {
    let (prefix, _) = message.split_once(':')?;
    let candidate = prefix.trim();
    let is_code = !candidate.is_empty()
        && candidate
            .chars()
            .all(|ch| ch.is_ascii_uppercase() || ch.is_ascii_digit() || ch == '_');
    is_code.then_some(candidate)
}
