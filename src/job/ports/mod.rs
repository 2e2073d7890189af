//! Port contracts for job lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by job services.

pub mod processor;
pub mod repository;
pub mod validator;

pub use processor::{
    ProcessingError, ProcessingOutput, ProcessingTask, ProcessorResult, ProgressReporter,
    VideoProcessor,
};
pub use repository::{JobRepository, JobRepositoryError, JobRepositoryResult};
pub use validator::{
    DEFAULT_VALIDATION_CODE, RequestValidator, ValidationOutcome, ValidationRejection, VideoInfo,
};
