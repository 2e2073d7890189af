//! In-memory integration tests for background job execution.

use std::time::Duration;

use super::helpers::{GatedIntake, GatedProcessor, gated, single_clip_request};
use eyre::{OptionExt, ensure};
use rstest::rstest;
use storyclip::job::domain::{Job, JobId, JobStatus};

const POLL_INTERVAL: Duration = Duration::from_millis(5);
const POLL_ATTEMPTS: usize = 400;

async fn wait_for_progress(intake: &GatedIntake, job_id: JobId, percent: u8) -> eyre::Result<Job> {
    for _ in 0..POLL_ATTEMPTS {
        let job = intake.lifecycle().get_job(job_id).await?;
        if job.progress().is_some_and(|progress| progress.percent == percent) {
            return Ok(job);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    Err(eyre::eyre!("job {job_id} never reported {percent}% progress"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_reads_see_processing_while_job_is_in_flight(
    gated: (GatedIntake, GatedProcessor),
) -> eyre::Result<()> {
    let (intake, processor) = gated;

    let submitted = intake.submit(single_clip_request()).await?;
    let job_id = submitted.job.id();
    let in_flight = wait_for_progress(&intake, job_id, 50).await?;

    ensure!(in_flight.status() == JobStatus::Processing);
    ensure!(in_flight.result().is_none() && in_flight.error().is_none());

    processor.release(1);
    let finished = submitted
        .handle
        .await?
        .ok_or_eyre("job should reach a terminal state")?;

    ensure!(finished.status() == JobStatus::Completed);
    ensure!(intake.lifecycle().get_job(job_id).await? == finished);
    ensure!(finished.updated_at() >= in_flight.updated_at());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_jobs_are_isolated(gated: (GatedIntake, GatedProcessor)) -> eyre::Result<()> {
    const JOBS: usize = 8;
    let (intake, processor) = gated;

    let mut submissions = Vec::with_capacity(JOBS);
    for _ in 0..JOBS {
        submissions.push(intake.submit(single_clip_request()).await?);
    }
    for submitted in &submissions {
        wait_for_progress(&intake, submitted.job.id(), 50).await?;
    }

    let readers: Vec<_> = submissions
        .iter()
        .map(|submitted| {
            let reader = intake.clone();
            let job_id = submitted.job.id();
            tokio::spawn(async move { reader.lifecycle().get_job(job_id).await })
        })
        .collect();
    for reader in readers {
        ensure!(reader.await??.status() == JobStatus::Processing);
    }

    processor.release(JOBS);
    for submitted in submissions {
        let job_id = submitted.job.id();
        let finished = submitted
            .handle
            .await?
            .ok_or_eyre("job should reach a terminal state")?;
        ensure!(finished.status() == JobStatus::Completed);
        let location = finished
            .result()
            .map(|result| result.output_location.clone())
            .ok_or_eyre("completed job should carry a result")?;
        ensure!(location.contains(&job_id.to_string()));
    }

    ensure!(intake.lifecycle().list_jobs().await?.len() == JOBS);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detached_task_still_finishes(gated: (GatedIntake, GatedProcessor)) -> eyre::Result<()> {
    let (intake, processor) = gated;

    let submitted = intake.submit(single_clip_request()).await?;
    let job_id = submitted.job.id();
    drop(submitted.handle);
    processor.release(1);

    for _ in 0..POLL_ATTEMPTS {
        if intake.lifecycle().get_job(job_id).await?.status() == JobStatus::Completed {
            return Ok(());
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    Err(eyre::eyre!("detached job {job_id} never completed"))
}
