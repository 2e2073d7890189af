//! Processing request intake endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mockable::Clock;
use serde::Serialize;

use crate::http::{ApiError, AppState};
use crate::job::{
    domain::{JobId, JobStatus, ProcessingRequest},
    ports::{JobRepository, RequestValidator, VideoProcessor},
    services::SubmittedJob,
};

const ACCEPTED_MESSAGE: &str = "Job created and queued for processing";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AcceptedResponse<'a> {
    success: bool,
    job_id: JobId,
    status: JobStatus,
    message: &'static str,
    estimated_time: &'a str,
}

/// Accepts a processing request and queues it as a background job.
///
/// Responds `202` once the job exists; processing continues after the
/// response is sent.
pub async fn process_video_handler<R, V, P, C>(
    State(state): State<AppState<R, V, P, C>>,
    payload: Result<Json<ProcessingRequest>, JsonRejection>,
) -> Result<Response, ApiError>
where
    R: JobRepository + 'static,
    V: RequestValidator + 'static,
    P: VideoProcessor + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))?;
    tracing::debug!(clips = request.clips.len(), "Received processing request");

    let SubmittedJob { job, handle } = state.intake.submit(request).await?;
    drop(handle);

    let body = AcceptedResponse {
        success: true,
        job_id: job.id(),
        status: job.status(),
        message: ACCEPTED_MESSAGE,
        estimated_time: &state.estimated_time,
    };
    Ok((StatusCode::ACCEPTED, Json(body)).into_response())
}
