//! Job aggregate root and the lifecycle state machine.

use super::{
    JobDomainError, JobFailure, JobId, JobOutcome, JobProgress, JobResult, ParseJobStatusError,
    ProcessingRequest,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Progress recorded when a job enters processing.
const STARTED_PROGRESS_PERCENT: u8 = 10;

/// Job lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Job has been accepted but processing has not started.
    Pending,
    /// The background task is processing the job.
    Processing,
    /// Processing finished and produced an output.
    Completed,
    /// Processing failed.
    Failed,
}

impl JobStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }

    /// Returns whether no further transition is allowed.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// `Pending -> Failed` is permitted so that failures occurring before
    /// processing starts are still recorded on the job.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Processing | Self::Failed)
                | (Self::Processing, Self::Completed | Self::Failed)
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for JobStatus {
    type Error = ParseJobStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "PENDING" => Ok(Self::Pending),
            "PROCESSING" => Ok(Self::Processing),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            _ => Err(ParseJobStatusError(value.to_owned())),
        }
    }
}

/// Job aggregate root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    id: JobId,
    status: JobStatus,
    request: ProcessingRequest,
    outcome: Option<JobOutcome>,
    progress: Option<JobProgress>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Job {
    /// Creates a new pending job for the given request.
    #[must_use]
    pub fn new(request: ProcessingRequest, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: JobId::new(),
            status: JobStatus::Pending,
            request,
            outcome: None,
            progress: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the job identifier.
    #[must_use]
    pub const fn id(&self) -> JobId {
        self.id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Returns the normalized request the job was created from.
    #[must_use]
    pub const fn request(&self) -> &ProcessingRequest {
        &self.request
    }

    /// Returns the terminal outcome, if the job is terminal.
    #[must_use]
    pub const fn outcome(&self) -> Option<&JobOutcome> {
        self.outcome.as_ref()
    }

    /// Returns the processing result when the job completed.
    #[must_use]
    pub const fn result(&self) -> Option<&JobResult> {
        match &self.outcome {
            Some(JobOutcome::Completed(result)) => Some(result),
            _ => None,
        }
    }

    /// Returns the failure when the job failed.
    #[must_use]
    pub const fn error(&self) -> Option<&JobFailure> {
        match &self.outcome {
            Some(JobOutcome::Failed(failure)) => Some(failure),
            _ => None,
        }
    }

    /// Returns the latest progress snapshot.
    #[must_use]
    pub const fn progress(&self) -> Option<&JobProgress> {
        self.progress.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves a pending job into processing.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidTransition`] unless the job is
    /// pending.
    pub fn start_processing(&mut self, clock: &impl Clock) -> Result<(), JobDomainError> {
        self.transition_to(JobStatus::Processing)?;
        self.progress = Some(JobProgress::new(
            STARTED_PROGRESS_PERCENT,
            "processing started",
        ));
        self.touch(clock);
        Ok(())
    }

    /// Marks a processing job as completed with the given result.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidTransition`] unless the job is
    /// processing.
    pub fn complete(&mut self, result: JobResult, clock: &impl Clock) -> Result<(), JobDomainError> {
        self.transition_to(JobStatus::Completed)?;
        self.outcome = Some(JobOutcome::Completed(result));
        self.progress = Some(JobProgress::new(100, "completed"));
        self.touch(clock);
        Ok(())
    }

    /// Marks a pending or processing job as failed.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::InvalidTransition`] when the job is already
    /// terminal.
    pub fn fail(&mut self, failure: JobFailure, clock: &impl Clock) -> Result<(), JobDomainError> {
        self.transition_to(JobStatus::Failed)?;
        self.outcome = Some(JobOutcome::Failed(failure));
        self.touch(clock);
        Ok(())
    }

    /// Replaces the progress snapshot of a processing job.
    ///
    /// # Errors
    ///
    /// Returns [`JobDomainError::ProgressRequiresProcessing`] unless the job
    /// is processing.
    pub fn record_progress(
        &mut self,
        progress: JobProgress,
        clock: &impl Clock,
    ) -> Result<(), JobDomainError> {
        if self.status != JobStatus::Processing {
            return Err(JobDomainError::ProgressRequiresProcessing {
                job_id: self.id,
                status: self.status,
            });
        }
        self.progress = Some(progress);
        self.touch(clock);
        Ok(())
    }

    fn transition_to(&mut self, target: JobStatus) -> Result<(), JobDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(JobDomainError::InvalidTransition {
                job_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.status = target;
        Ok(())
    }

    /// Advances `updated_at` to the current clock time, never backwards.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = self.updated_at.max(clock.utc());
    }
}
