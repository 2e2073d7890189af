//! When steps for job lifecycle BDD scenarios.

use super::world::{JobWorld, run_async};
use rstest_bdd_macros::when;
use storyclip::job::domain::{ClipSpec, Job, ProcessingRequest};

#[when("a request with a clip from {start:u32} to {end:u32} seconds is submitted")]
fn submit_request(world: &mut JobWorld, start: u32, end: u32) -> Result<(), eyre::Report> {
    let intake = world.intake()?;
    let request = ProcessingRequest {
        video_url: Some("https://cdn.example.com/source.mp4".to_owned()),
        clips: vec![ClipSpec::new(f64::from(start), f64::from(end))],
        ..ProcessingRequest::default()
    };

    let submission = run_async(intake.submit(request));
    if let Ok(ref submitted) = submission {
        world.current_job = Some(submitted.job.clone());
    }
    world.submission = Some(submission);
    Ok(())
}

#[when("processing is started for the job")]
fn start_processing(world: &mut JobWorld) -> Result<(), eyre::Report> {
    let job_id = world
        .current_job
        .as_ref()
        .map(Job::id)
        .ok_or_else(|| eyre::eyre!("missing current job in scenario world"))?;

    let result = run_async(world.lifecycle.start_processing(job_id));
    world.last_lifecycle_result = Some(result);
    Ok(())
}
