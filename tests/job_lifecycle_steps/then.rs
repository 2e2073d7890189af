//! Then steps for job lifecycle BDD scenarios.

use super::world::{JobWorld, run_async};
use rstest_bdd_macros::then;
use storyclip::job::{
    domain::{JobDomainError, JobStatus},
    services::{IntakeError, JobLifecycleError},
};

#[then("the submission is accepted as pending")]
fn submission_accepted(world: &JobWorld) -> Result<(), eyre::Report> {
    let Some(Ok(submitted)) = world.submission.as_ref() else {
        return Err(eyre::eyre!(
            "expected an accepted submission, got {:?}",
            world.submission.as_ref().map(|result| result.as_ref().err())
        ));
    };
    eyre::ensure!(
        submitted.job.status() == JobStatus::Pending,
        "expected a pending job, found {}",
        submitted.job.status()
    );
    Ok(())
}

#[then(r#"the job eventually has status "{status}""#)]
fn job_eventually_has_status(world: &mut JobWorld, status: String) -> Result<(), eyre::Report> {
    let expected = JobStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    if let Some(Ok(submitted)) = world.submission.take() {
        run_async(submitted.handle)?;
    }
    let job_id = world
        .current_job
        .as_ref()
        .map(storyclip::job::domain::Job::id)
        .ok_or_else(|| eyre::eyre!("missing current job in scenario world"))?;
    let job = run_async(world.lifecycle.get_job(job_id))?;

    eyre::ensure!(
        job.status() == expected,
        "expected status {expected}, found {}",
        job.status()
    );
    world.current_job = Some(job);
    Ok(())
}

#[then(r#"the job output location is "{location}""#)]
fn job_output_location(world: &JobWorld, location: String) -> Result<(), eyre::Report> {
    let result = world
        .current_job
        .as_ref()
        .and_then(storyclip::job::domain::Job::result)
        .ok_or_else(|| eyre::eyre!("expected a completed job with a result"))?;
    eyre::ensure!(
        result.output_location == location,
        "expected output {location}, found {}",
        result.output_location
    );
    Ok(())
}

#[then(r#"the job error code is "{code}""#)]
fn job_error_code(world: &JobWorld, code: String) -> Result<(), eyre::Report> {
    let failure = world
        .current_job
        .as_ref()
        .and_then(storyclip::job::domain::Job::error)
        .ok_or_else(|| eyre::eyre!("expected a failed job with an error"))?;
    eyre::ensure!(
        failure.code() == code,
        "expected error code {code}, found {}",
        failure.code()
    );
    Ok(())
}

#[then(r#"the submission is rejected with code "{code}""#)]
fn submission_rejected(world: &JobWorld, code: String) -> Result<(), eyre::Report> {
    let Some(Err(IntakeError::Validation(rejection))) = world.submission.as_ref() else {
        return Err(eyre::eyre!("expected a validation rejection"));
    };
    eyre::ensure!(
        rejection.code == code,
        "expected rejection code {code}, found {}",
        rejection.code
    );
    Ok(())
}

#[then("no jobs exist")]
fn no_jobs_exist(world: &JobWorld) -> Result<(), eyre::Report> {
    let jobs = run_async(world.lifecycle.list_jobs())?;
    eyre::ensure!(jobs.is_empty(), "expected no jobs, found {}", jobs.len());
    Ok(())
}

#[then("the lifecycle call fails with an invalid transition error")]
fn lifecycle_call_fails(world: &JobWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_lifecycle_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing lifecycle result"))?;

    if !matches!(
        result,
        Err(JobLifecycleError::Domain(
            JobDomainError::InvalidTransition { .. }
        ))
    ) {
        return Err(eyre::eyre!("expected InvalidTransition error, got {result:?}"));
    }
    Ok(())
}
