//! Service layer for job creation, transitions and retrieval.

use crate::job::{
    domain::{
        Job, JobDomainError, JobFailure, JobId, JobProgress, JobResult, ProcessingMetadata,
        ProcessingRequest,
    },
    ports::{JobRepository, JobRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for job lifecycle operations.
#[derive(Debug, Clone, Error)]
pub enum JobLifecycleError {
    /// No job exists with the given identifier.
    #[error("job not found: {0}")]
    NotFound(JobId),
    /// The requested transition is not permitted.
    #[error(transparent)]
    Domain(#[from] JobDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] JobRepositoryError),
}

/// Result type for job lifecycle service operations.
pub type JobLifecycleResult<T> = Result<T, JobLifecycleError>;

/// Job lifecycle orchestration service.
///
/// Each mutating operation loads the committed record, applies the
/// transition to a copy and commits it with a single repository update. A
/// rejected transition or a failed update leaves the stored job unchanged.
pub struct JobLifecycleService<R, C>
where
    R: JobRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for JobLifecycleService<R, C>
where
    R: JobRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> JobLifecycleService<R, C>
where
    R: JobRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new job lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Creates a pending job for the given request.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::Repository`] when the job cannot be
    /// stored.
    pub async fn create_job(&self, request: ProcessingRequest) -> JobLifecycleResult<Job> {
        let job = Job::new(request, &*self.clock);
        self.repository.store(&job).await?;
        tracing::info!(job_id = %job.id(), status = %job.status(), "Job created");
        Ok(job)
    }

    /// Moves a pending job into processing.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::NotFound`] for unknown jobs,
    /// [`JobLifecycleError::Domain`] when the job is not pending, or
    /// [`JobLifecycleError::Repository`] when the update fails.
    pub async fn start_processing(&self, id: JobId) -> JobLifecycleResult<Job> {
        let job = self
            .mutate(id, |job, clock| job.start_processing(clock))
            .await?;
        tracing::info!(job_id = %id, status = %job.status(), "Job processing started");
        Ok(job)
    }

    /// Records a successful result for a processing job.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::NotFound`] for unknown jobs,
    /// [`JobLifecycleError::Domain`] when the job is not processing, or
    /// [`JobLifecycleError::Repository`] when the update fails.
    pub async fn complete_job(
        &self,
        id: JobId,
        output_location: impl Into<String>,
        metadata: ProcessingMetadata,
        duration_ms: u64,
    ) -> JobLifecycleResult<Job> {
        let result = JobResult {
            output_location: output_location.into(),
            metadata,
            duration_ms,
        };
        let job = self
            .mutate(id, move |job, clock| job.complete(result, clock))
            .await?;
        tracing::info!(job_id = %id, duration_ms, "Job completed");
        Ok(job)
    }

    /// Records a failure for a pending or processing job.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::NotFound`] for unknown jobs,
    /// [`JobLifecycleError::Domain`] when the job is already terminal, or
    /// [`JobLifecycleError::Repository`] when the update fails.
    pub async fn fail_job(
        &self,
        id: JobId,
        message: impl Into<String>,
    ) -> JobLifecycleResult<Job> {
        let failure = JobFailure::new(message);
        let job = self
            .mutate(id, move |job, clock| job.fail(failure, clock))
            .await?;
        tracing::warn!(
            job_id = %id,
            error = job.error().map_or("", JobFailure::message),
            "Job failed"
        );
        Ok(job)
    }

    /// Replaces the progress snapshot of a processing job.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::NotFound`] for unknown jobs,
    /// [`JobLifecycleError::Domain`] when the job is not processing, or
    /// [`JobLifecycleError::Repository`] when the update fails.
    pub async fn record_progress(
        &self,
        id: JobId,
        progress: JobProgress,
    ) -> JobLifecycleResult<Job> {
        let percent = progress.percent;
        let job = self
            .mutate(id, move |job, clock| job.record_progress(progress, clock))
            .await?;
        tracing::debug!(job_id = %id, percent, "Job progress recorded");
        Ok(job)
    }

    /// Returns the latest committed state of a job.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::NotFound`] for unknown jobs or
    /// [`JobLifecycleError::Repository`] when the lookup fails.
    pub async fn get_job(&self, id: JobId) -> JobLifecycleResult<Job> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(JobLifecycleError::NotFound(id))
    }

    /// Returns every job, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`JobLifecycleError::Repository`] when the lookup fails.
    pub async fn list_jobs(&self) -> JobLifecycleResult<Vec<Job>> {
        Ok(self.repository.list_all().await?)
    }

    async fn mutate<F>(&self, id: JobId, apply: F) -> JobLifecycleResult<Job>
    where
        F: FnOnce(&mut Job, &C) -> Result<(), JobDomainError> + Send,
    {
        let mut job = self.get_job(id).await?;
        apply(&mut job, &*self.clock)?;
        self.repository.update(&job).await.map_err(|err| match err {
            JobRepositoryError::NotFound(missing) => JobLifecycleError::NotFound(missing),
            other => JobLifecycleError::Repository(other),
        })?;
        Ok(job)
    }
}
