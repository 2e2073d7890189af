//! Given steps for job lifecycle BDD scenarios.

use super::world::{JobWorld, ScriptedProcessor, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use storyclip::job::domain::{ClipSpec, ProcessingRequest};

#[given(r#"a processing backend that succeeds with output "{location}""#)]
fn backend_succeeds(world: &mut JobWorld, location: String) {
    world.processor = Some(ScriptedProcessor::Succeed(location));
}

#[given(r#"a processing backend that fails with "{message}""#)]
fn backend_fails(world: &mut JobWorld, message: String) {
    world.processor = Some(ScriptedProcessor::Fail(message));
}

#[given("a pending job")]
fn pending_job(world: &mut JobWorld) -> Result<(), eyre::Report> {
    let request = ProcessingRequest {
        video_url: Some("https://cdn.example.com/source.mp4".to_owned()),
        clips: vec![ClipSpec::new(0.0, 4.0)],
        ..ProcessingRequest::default()
    }
    .normalized();
    let created = run_async(world.lifecycle.create_job(request)).wrap_err("create pending job")?;
    world.current_job = Some(created);
    Ok(())
}

#[given(r#"the job has been failed with "{message}""#)]
fn job_has_been_failed(world: &mut JobWorld, message: String) -> Result<(), eyre::Report> {
    let job_id = world
        .current_job
        .as_ref()
        .map(storyclip::job::domain::Job::id)
        .ok_or_else(|| eyre::eyre!("missing current job in scenario world"))?;
    let failed =
        run_async(world.lifecycle.fail_job(job_id, message)).wrap_err("fail job in setup")?;
    world.current_job = Some(failed);
    Ok(())
}
