//! Storage contract tests for the in-memory job repository.

use std::sync::Arc;

use super::helpers::single_clip_request;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use storyclip::job::{
    adapters::memory::InMemoryJobRepository,
    domain::{Job, JobFailure, JobStatus},
    ports::{JobRepository, JobRepositoryError},
};

#[fixture]
fn repository() -> Arc<InMemoryJobRepository> {
    Arc::new(InMemoryJobRepository::new())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_then_find_returns_the_same_job(
    repository: Arc<InMemoryJobRepository>,
) -> eyre::Result<()> {
    let job = Job::new(single_clip_request(), &DefaultClock);

    repository.store(&job).await?;

    eyre::ensure!(repository.find_by_id(job.id()).await? == Some(job));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn storing_a_duplicate_id_is_rejected(
    repository: Arc<InMemoryJobRepository>,
) -> eyre::Result<()> {
    let job = Job::new(single_clip_request(), &DefaultClock);
    repository.store(&job).await?;

    let result = repository.store(&job).await;

    eyre::ensure!(matches!(result, Err(JobRepositoryError::DuplicateJob(id)) if id == job.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updating_an_unknown_job_is_not_found(
    repository: Arc<InMemoryJobRepository>,
) -> eyre::Result<()> {
    let job = Job::new(single_clip_request(), &DefaultClock);

    let result = repository.update(&job).await;

    eyre::ensure!(matches!(result, Err(JobRepositoryError::NotFound(id)) if id == job.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_the_committed_record(
    repository: Arc<InMemoryJobRepository>,
) -> eyre::Result<()> {
    let mut job = Job::new(single_clip_request(), &DefaultClock);
    repository.store(&job).await?;

    job.fail(JobFailure::new("INPUT_UNAVAILABLE: 404"), &DefaultClock)?;
    repository.update(&job).await?;

    let stored = repository.find_by_id(job.id()).await?;
    eyre::ensure!(stored.as_ref().map(Job::status) == Some(JobStatus::Failed));
    eyre::ensure!(stored == Some(job));
    Ok(())
}
