//! Shared world state for job lifecycle BDD scenarios.

use std::sync::Arc;

use async_trait::async_trait;
use rstest::fixture;
use storyclip::job::{
    adapters::{ClipRangeValidator, memory::InMemoryJobRepository},
    domain::Job,
    ports::{ProcessingError, ProcessingOutput, ProcessingTask, ProcessorResult, VideoProcessor},
    services::{
        IntakeError, JobLifecycleError, JobLifecycleService, ProcessingIntakeService, SubmittedJob,
    },
};
use mockable::DefaultClock;

/// Lifecycle service type used by the BDD world.
pub type TestLifecycle = JobLifecycleService<InMemoryJobRepository, DefaultClock>;

/// Intake service type used by the BDD world.
pub type TestIntake =
    ProcessingIntakeService<InMemoryJobRepository, ClipRangeValidator, ScriptedProcessor, DefaultClock>;

/// Processor that answers every job with a fixed outcome.
#[derive(Debug, Clone)]
pub enum ScriptedProcessor {
    /// Produce the given output location.
    Succeed(String),
    /// Fail with the given message.
    Fail(String),
}

#[async_trait]
impl VideoProcessor for ScriptedProcessor {
    async fn process(&self, _task: ProcessingTask) -> ProcessorResult<ProcessingOutput> {
        match self {
            Self::Succeed(location) => Ok(ProcessingOutput::new(location.clone())),
            Self::Fail(message) => Err(ProcessingError::new(message.clone())),
        }
    }
}

/// Scenario world for job lifecycle behaviour tests.
pub struct JobWorld {
    pub lifecycle: TestLifecycle,
    pub processor: Option<ScriptedProcessor>,
    pub submission: Option<Result<SubmittedJob, IntakeError>>,
    pub current_job: Option<Job>,
    pub last_lifecycle_result: Option<Result<Job, JobLifecycleError>>,
}

impl JobWorld {
    /// Creates a world backed by an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lifecycle: JobLifecycleService::new(
                Arc::new(InMemoryJobRepository::new()),
                Arc::new(DefaultClock),
            ),
            processor: None,
            submission: None,
            current_job: None,
            last_lifecycle_result: None,
        }
    }

    /// Builds an intake service sharing the world's repository.
    ///
    /// # Errors
    ///
    /// Returns an error when no processor behaviour has been configured.
    pub fn intake(&self) -> Result<TestIntake, eyre::Report> {
        let processor = self
            .processor
            .clone()
            .ok_or_else(|| eyre::eyre!("missing processor behaviour in scenario world"))?;
        Ok(ProcessingIntakeService::new(
            self.lifecycle.clone(),
            Arc::new(ClipRangeValidator::new()),
            Arc::new(processor),
        ))
    }
}

impl Default for JobWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> JobWorld {
    JobWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
