//! Job status, record and listing endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mockable::Clock;
use serde::Serialize;

use crate::http::{ApiError, AppState};
use crate::job::{
    domain::{Job, JobId, JobProgress, JobResult, JobStatus},
    ports::{JobRepository, RequestValidator, VideoProcessor},
};

const OUTPUT_KIND: &str = "video";

/// Client-facing status of a job.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JobStatusResponse {
    job_id: JobId,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    progress: Option<ProgressView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outputs: Option<Vec<OutputView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<FailureView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProgressView {
    pct: u8,
    stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fps: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eta_sec: Option<u64>,
}

impl From<&JobProgress> for ProgressView {
    fn from(progress: &JobProgress) -> Self {
        Self {
            pct: progress.percent,
            stage: progress.stage.clone(),
            fps: progress.fps,
            eta_sec: progress.eta_secs,
        }
    }
}

#[derive(Serialize)]
struct OutputView {
    kind: &'static str,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
}

impl From<&JobResult> for OutputView {
    fn from(result: &JobResult) -> Self {
        let details = &result.metadata;
        Self {
            kind: OUTPUT_KIND,
            url: result.output_location.clone(),
            width: details.detail_u64("width"),
            height: details.detail_u64("height"),
            duration: details.detail_f64("duration"),
            size: details.detail_u64("size"),
        }
    }
}

#[derive(Serialize)]
struct FailureView {
    code: String,
    message: String,
}

impl From<&Job> for JobStatusResponse {
    fn from(job: &Job) -> Self {
        let mut view = Self {
            job_id: job.id(),
            status: "queued",
            progress: job.progress().map(ProgressView::from),
            outputs: None,
            quality_score: None,
            error: None,
        };
        match job.status() {
            JobStatus::Pending => {}
            JobStatus::Processing => view.status = "processing",
            JobStatus::Completed => {
                view.status = "completed";
                view.progress = None;
                view.outputs = Some(job.result().map(OutputView::from).into_iter().collect());
                view.quality_score = job
                    .result()
                    .and_then(|result| result.metadata.detail_f64("qualityScore"));
            }
            JobStatus::Failed => {
                view.status = "failed";
                view.progress = None;
                view.error = job.error().map(|failure| FailureView {
                    code: failure.code().to_owned(),
                    message: failure.message().to_owned(),
                });
            }
        }
        view
    }
}

fn parse_job_id(raw: &str) -> Result<JobId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::InvalidJobId(raw.to_owned()))
}

/// Reports the client-facing status of a job.
#[tracing::instrument(skip(state))]
pub async fn job_status_handler<R, V, P, C>(
    State(state): State<AppState<R, V, P, C>>,
    Path(job_id): Path<String>,
) -> Result<Response, ApiError>
where
    R: JobRepository + 'static,
    V: RequestValidator + 'static,
    P: VideoProcessor + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_job_id(&job_id)?;
    let job = state.jobs().get_job(id).await?;
    Ok((StatusCode::OK, Json(JobStatusResponse::from(&job))).into_response())
}

/// Returns the full stored record of a job.
#[tracing::instrument(skip(state))]
pub async fn job_handler<R, V, P, C>(
    State(state): State<AppState<R, V, P, C>>,
    Path(job_id): Path<String>,
) -> Result<Response, ApiError>
where
    R: JobRepository + 'static,
    V: RequestValidator + 'static,
    P: VideoProcessor + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_job_id(&job_id)?;
    let job = state.jobs().get_job(id).await?;
    Ok((StatusCode::OK, Json(job)).into_response())
}

#[derive(Serialize)]
struct JobListResponse {
    success: bool,
    jobs: Vec<Job>,
}

/// Lists every job, newest first.
pub async fn list_jobs_handler<R, V, P, C>(
    State(state): State<AppState<R, V, P, C>>,
) -> Result<Response, ApiError>
where
    R: JobRepository + 'static,
    V: RequestValidator + 'static,
    P: VideoProcessor + 'static,
    C: Clock + Send + Sync + 'static,
{
    let jobs = state.jobs().list_jobs().await?;
    Ok((
        StatusCode::OK,
        Json(JobListResponse {
            success: true,
            jobs,
        }),
    )
        .into_response())
}
