//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::fixture;
use storyclip::job::{
    adapters::{ClipRangeValidator, memory::InMemoryJobRepository},
    domain::{ClipSpec, JobProgress, ProcessingRequest},
    ports::{ProcessingOutput, ProcessingTask, ProcessorResult, VideoProcessor},
    services::{JobLifecycleService, ProcessingIntakeService},
};
use tokio::sync::Semaphore;

/// Intake service type used across in-memory tests.
pub type GatedIntake =
    ProcessingIntakeService<InMemoryJobRepository, ClipRangeValidator, GatedProcessor, DefaultClock>;

/// Processor that reports progress and then waits for a permit before
/// finishing, so tests can observe jobs mid-flight.
#[derive(Debug, Clone)]
pub struct GatedProcessor {
    gate: Arc<Semaphore>,
}

impl GatedProcessor {
    /// Creates a processor whose jobs block until released.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gate: Arc::new(Semaphore::new(0)),
        }
    }

    /// Lets `count` blocked jobs finish.
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }
}

#[async_trait]
impl VideoProcessor for GatedProcessor {
    async fn process(&self, task: ProcessingTask) -> ProcessorResult<ProcessingOutput> {
        task.progress
            .report(JobProgress::new(50, "encoding").with_eta_secs(3))
            .await;
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|err| storyclip::job::ports::ProcessingError::new(err.to_string()))?;
        permit.forget();
        Ok(ProcessingOutput::new(format!(
            "https://cdn.example.com/{}.mp4",
            task.job_id
        )))
    }
}

/// Provides an intake service and the processor gate controlling it.
#[fixture]
pub fn gated() -> (GatedIntake, GatedProcessor) {
    let processor = GatedProcessor::new();
    let lifecycle = JobLifecycleService::new(
        Arc::new(InMemoryJobRepository::new()),
        Arc::new(DefaultClock),
    );
    let intake = ProcessingIntakeService::new(
        lifecycle,
        Arc::new(ClipRangeValidator::new()),
        Arc::new(processor.clone()),
    );
    (intake, processor)
}

/// Builds a valid request with a single clip.
#[must_use]
pub fn single_clip_request() -> ProcessingRequest {
    ProcessingRequest {
        video_url: Some("https://cdn.example.com/source.mp4".to_owned()),
        clips: vec![ClipSpec::new(0.0, 5.0)],
        ..ProcessingRequest::default()
    }
}
