//! Application services for job lifecycle orchestration.

mod intake;
mod lifecycle;

pub use intake::{IntakeError, IntakeResult, ProcessingIntakeService, SubmittedJob};
pub use lifecycle::{JobLifecycleError, JobLifecycleResult, JobLifecycleService};
