//! Error types for job domain transitions and parsing.

use super::{JobId, JobStatus};
use thiserror::Error;

/// Errors returned by job lifecycle transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JobDomainError {
    /// The requested transition is not permitted by the state machine.
    #[error("invalid job transition for {job_id}: {from} -> {to}")]
    InvalidTransition {
        /// Job whose transition was rejected.
        job_id: JobId,
        /// Current status.
        from: JobStatus,
        /// Requested target status.
        to: JobStatus,
    },

    /// Progress can only be reported while the job is processing.
    #[error("job {job_id} is not processing (current status: {status})")]
    ProgressRequiresProcessing {
        /// Job identifier.
        job_id: JobId,
        /// Current status.
        status: JobStatus,
    },
}

/// Error returned while parsing job statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown job status: {0}")]
pub struct ParseJobStatusError(pub String);
