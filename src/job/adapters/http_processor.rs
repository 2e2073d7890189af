//! HTTP client adapter for the external video-processing backend.

use crate::job::{
    domain::{JobId, ProcessingRequest},
    ports::{
        ProcessingError, ProcessingOutput, ProcessingTask, ProcessorResult, VideoInfo,
        VideoProcessor,
    },
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Path of the render endpoint on the processing backend.
const RENDER_PATH: &str = "render";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderRequest<'a> {
    job_id: JobId,
    request: &'a ProcessingRequest,
    video_info: Option<&'a VideoInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderResponse {
    output_url: String,
    #[serde(default, alias = "ffmpegCommand")]
    command: Option<String>,
    #[serde(flatten)]
    details: Map<String, Value>,
}

impl From<RenderResponse> for ProcessingOutput {
    fn from(response: RenderResponse) -> Self {
        Self {
            output_url: response.output_url,
            command: response.command,
            details: response.details,
        }
    }
}

/// Forwards jobs to an FFmpeg-based backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpVideoProcessor {
    client: reqwest::Client,
    render_url: String,
}

impl HttpVideoProcessor {
    /// Creates a processor targeting `base_url` with the given request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessingError`] when the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> ProcessorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ProcessingError::new(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            render_url: render_url(base_url),
        })
    }

    /// Returns the endpoint jobs are posted to.
    #[must_use]
    pub fn render_url(&self) -> &str {
        &self.render_url
    }
}

fn render_url(base_url: &str) -> String {
    format!("{}/{RENDER_PATH}", base_url.trim().trim_end_matches('/'))
}

/// Extracts the most useful message from an upstream error body.
///
/// The upstream detail leads the message so that a `CODE: ...` prefix
/// survives into the job failure.
fn upstream_message(status: reqwest::StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_owned))
    });
    let detail = from_json.unwrap_or_else(|| body.trim().to_owned());
    if detail.is_empty() {
        format!("processing backend returned {status}")
    } else {
        format!("{detail} (processing backend returned {status})")
    }
}

#[async_trait]
impl VideoProcessor for HttpVideoProcessor {
    async fn process(&self, task: ProcessingTask) -> ProcessorResult<ProcessingOutput> {
        let payload = RenderRequest {
            job_id: task.job_id,
            request: &task.request,
            video_info: task.video_info.as_ref(),
        };

        tracing::debug!(job_id = %task.job_id, url = %self.render_url, "Forwarding job to processing backend");

        let response = self
            .client
            .post(&self.render_url)
            .json(&payload)
            .send()
            .await
            .map_err(|err| ProcessingError::new(format!("processing backend unreachable: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProcessingError::new(upstream_message(status, &body)));
        }

        let rendered: RenderResponse = response.json().await.map_err(|err| {
            ProcessingError::new(format!("invalid processing backend response: {err}"))
        })?;
        Ok(rendered.into())
    }
}
