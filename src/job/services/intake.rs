//! Request intake and background execution of processing jobs.

use super::lifecycle::{JobLifecycleError, JobLifecycleService};
use crate::job::{
    domain::{DEFAULT_FAILURE_CODE, Job, JobId, JobProgress, ProcessingRequest},
    ports::{
        JobRepository, ProcessingError, ProcessingTask, ProgressReporter, RequestValidator,
        ValidationRejection, VideoInfo, VideoProcessor,
    },
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};

/// Number of progress snapshots buffered between a processor and the
/// lifecycle service.
const PROGRESS_CHANNEL_CAPACITY: usize = 16;

/// Errors returned synchronously by [`ProcessingIntakeService::submit`].
#[derive(Debug, Clone, Error)]
pub enum IntakeError {
    /// The validator rejected the request; no job was created.
    #[error(transparent)]
    Validation(#[from] ValidationRejection),
    /// The job could not be created.
    #[error(transparent)]
    Lifecycle(#[from] JobLifecycleError),
}

/// Result type for intake operations.
pub type IntakeResult<T> = Result<T, IntakeError>;

/// A freshly created job and the handle of its background task.
///
/// Dropping the handle detaches the task; it keeps running to completion.
#[derive(Debug)]
pub struct SubmittedJob {
    /// The job as stored at creation time.
    pub job: Job,
    /// Resolves to the final committed job, or `None` when the final
    /// transition could not be recorded.
    pub handle: JoinHandle<Option<Job>>,
}

/// Normalizes, validates and queues processing requests.
pub struct ProcessingIntakeService<R, V, P, C>
where
    R: JobRepository,
    V: RequestValidator,
    P: VideoProcessor,
    C: Clock + Send + Sync,
{
    lifecycle: JobLifecycleService<R, C>,
    validator: Arc<V>,
    processor: Arc<P>,
}

impl<R, V, P, C> Clone for ProcessingIntakeService<R, V, P, C>
where
    R: JobRepository,
    V: RequestValidator,
    P: VideoProcessor,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            lifecycle: self.lifecycle.clone(),
            validator: Arc::clone(&self.validator),
            processor: Arc::clone(&self.processor),
        }
    }
}

impl<R, V, P, C> ProcessingIntakeService<R, V, P, C>
where
    R: JobRepository + 'static,
    V: RequestValidator + 'static,
    P: VideoProcessor + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new intake service.
    #[must_use]
    pub const fn new(
        lifecycle: JobLifecycleService<R, C>,
        validator: Arc<V>,
        processor: Arc<P>,
    ) -> Self {
        Self {
            lifecycle,
            validator,
            processor,
        }
    }

    /// Returns the lifecycle service used for job state.
    #[must_use]
    pub const fn lifecycle(&self) -> &JobLifecycleService<R, C> {
        &self.lifecycle
    }

    /// Accepts a request and starts processing it in the background.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Validation`] when the validator rejects the
    /// normalized request, or [`IntakeError::Lifecycle`] when the job cannot
    /// be created.
    pub async fn submit(&self, request: ProcessingRequest) -> IntakeResult<SubmittedJob> {
        let normalized = request.normalized();
        let video_info = self
            .validator
            .validate(&normalized)
            .await
            .into_result()
            .inspect_err(|rejection| {
                tracing::info!(code = %rejection.code, error = %rejection.message, "Request rejected");
            })?;

        let job = self.lifecycle.create_job(normalized).await?;
        let runner = self.clone();
        let job_id = job.id();
        let task_request = job.request().clone();
        let handle =
            tokio::spawn(async move { runner.run_job(job_id, task_request, video_info).await });

        Ok(SubmittedJob { job, handle })
    }

    /// Drives a created job through processing to a terminal state.
    ///
    /// The processor runs on its own task so a panic inside it still fails
    /// the job. Lifecycle failures are logged rather than returned; the
    /// result is the final committed job, or `None` when no terminal state
    /// could be recorded.
    pub async fn run_job(
        &self,
        job_id: JobId,
        request: ProcessingRequest,
        video_info: Option<VideoInfo>,
    ) -> Option<Job> {
        if let Err(err) = self.lifecycle.start_processing(job_id).await {
            tracing::error!(job_id = %job_id, error = %err, "Failed to start job processing");
            return self
                .record_failure(job_id, format!("failed to start processing: {err}"))
                .await;
        }

        let started = Instant::now();
        let (sender, receiver) = mpsc::channel(PROGRESS_CHANNEL_CAPACITY);
        let task = ProcessingTask {
            job_id,
            request,
            video_info,
            progress: ProgressReporter::new(sender),
        };
        let processor = Arc::clone(&self.processor);
        let processing = tokio::spawn(async move { processor.process(task).await });
        let (joined, ()) = tokio::join!(processing, self.forward_progress(job_id, receiver));
        let outcome = joined.unwrap_or_else(|err| {
            tracing::error!(job_id = %job_id, error = %err, "Processor task aborted");
            Err(aborted_processing(&err))
        });
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Ok(output) => {
                let (output_location, metadata) = output.into_parts();
                match self
                    .lifecycle
                    .complete_job(job_id, output_location, metadata, duration_ms)
                    .await
                {
                    Ok(job) => Some(job),
                    Err(err) => {
                        tracing::error!(job_id = %job_id, error = %err, "Failed to record job result");
                        self.record_failure(job_id, format!("failed to record result: {err}"))
                            .await
                    }
                }
            }
            Err(err) => {
                tracing::warn!(job_id = %job_id, duration_ms, error = %err, "Processing failed");
                self.record_failure(job_id, err.message()).await
            }
        }
    }

    async fn forward_progress(&self, job_id: JobId, mut receiver: mpsc::Receiver<JobProgress>) {
        while let Some(progress) = receiver.recv().await {
            if let Err(err) = self.lifecycle.record_progress(job_id, progress).await {
                tracing::warn!(job_id = %job_id, error = %err, "Dropping progress update");
            }
        }
    }

    async fn record_failure(&self, job_id: JobId, message: impl Into<String>) -> Option<Job> {
        match self.lifecycle.fail_job(job_id, message).await {
            Ok(job) => Some(job),
            Err(err) => {
                tracing::error!(job_id = %job_id, error = %err, "Failed to record job failure");
                None
            }
        }
    }
}

fn aborted_processing(err: &JoinError) -> ProcessingError {
    let reason = if err.is_panic() {
        "processor panicked"
    } else {
        "processor task was cancelled"
    };
    ProcessingError::new(format!("{DEFAULT_FAILURE_CODE}: {reason}: {err}"))
}
