//! Behaviour tests for video processing job lifecycle.

#[path = "job_lifecycle_steps/mod.rs"]
mod job_lifecycle_steps_defs;

use job_lifecycle_steps_defs::world::{JobWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/job_lifecycle.feature",
    name = "Accepted request completes in the background"
)]
#[tokio::test(flavor = "multi_thread")]
async fn accepted_request_completes(world: JobWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/job_lifecycle.feature",
    name = "Processing failure is recorded on the job"
)]
#[tokio::test(flavor = "multi_thread")]
async fn processing_failure_is_recorded(world: JobWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/job_lifecycle.feature",
    name = "Invalid clip range is rejected without creating a job"
)]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_range_is_rejected(world: JobWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/job_lifecycle.feature",
    name = "Terminal jobs cannot be restarted"
)]
#[tokio::test(flavor = "multi_thread")]
async fn terminal_jobs_cannot_restart(world: JobWorld) {
    let _ = world;
}
