//! Domain model for video-processing jobs.
//!
//! The job domain owns the lifecycle state machine, the shape of processing
//! requests and their normalization. Infrastructure concerns stay outside of
//! this boundary.

mod error;
mod ids;
mod job;
mod outcome;
mod request;

pub use error::{JobDomainError, ParseJobStatusError};
pub use ids::JobId;
pub use job::{Job, JobStatus};
pub use outcome::{
    DEFAULT_FAILURE_CODE, JobFailure, JobOutcome, JobProgress, JobResult, ProcessingMetadata,
    error_code_from_message,
};
pub use request::{ClipEffects, ClipSpec, FilterDescriptor, NO_FILTER, ProcessingRequest};
