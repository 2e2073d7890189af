//! Processor port for the external video-processing backend.

use crate::job::domain::{JobId, JobProgress, ProcessingMetadata, ProcessingRequest};
use crate::job::ports::VideoInfo;
use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::mpsc;

/// Result type for processor operations.
pub type ProcessorResult<T> = Result<T, ProcessingError>;

/// Work handed to the processor by a job's background task.
#[derive(Debug)]
pub struct ProcessingTask {
    /// Job being processed.
    pub job_id: JobId,
    /// Normalized request recorded on the job.
    pub request: ProcessingRequest,
    /// Source properties discovered during validation.
    pub video_info: Option<VideoInfo>,
    /// Channel for intermediate progress reports.
    pub progress: ProgressReporter,
}

/// Sends intermediate progress snapshots back to the job lifecycle.
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    sender: mpsc::Sender<JobProgress>,
}

impl ProgressReporter {
    /// Creates a reporter feeding the given channel.
    #[must_use]
    pub const fn new(sender: mpsc::Sender<JobProgress>) -> Self {
        Self { sender }
    }

    /// Reports a progress snapshot.
    ///
    /// Returns `false` when nobody is listening any more.
    pub async fn report(&self, progress: JobProgress) -> bool {
        self.sender.send(progress).await.is_ok()
    }
}

/// Output produced by the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingOutput {
    /// Location of the produced video.
    pub output_url: String,
    /// Encoder command used, when reported.
    pub command: Option<String>,
    /// Further details reported by the backend.
    pub details: Map<String, Value>,
}

impl ProcessingOutput {
    /// Creates an output with only a location.
    #[must_use]
    pub fn new(output_url: impl Into<String>) -> Self {
        Self {
            output_url: output_url.into(),
            command: None,
            details: Map::new(),
        }
    }

    /// Sets the encoder command.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Splits the output into its location and job metadata.
    #[must_use]
    pub fn into_parts(self) -> (String, ProcessingMetadata) {
        let metadata = ProcessingMetadata {
            command: self.command,
            details: self.details,
        };
        (self.output_url, metadata)
    }
}

/// Failure reported by the processor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ProcessingError {
    message: String,
}

impl ProcessingError {
    /// Creates a processing error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Video processing contract.
///
/// The processor owns cancellation and timeouts of its own work; the job
/// lifecycle only awaits the result.
#[async_trait]
pub trait VideoProcessor: Send + Sync {
    /// Processes a job and returns the produced output.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError`] when the backend fails or rejects the job.
    async fn process(&self, task: ProcessingTask) -> ProcessorResult<ProcessingOutput>;
}
