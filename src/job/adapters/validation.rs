//! Structural request validator.

use crate::job::{
    domain::{ClipSpec, ProcessingRequest},
    ports::{RequestValidator, ValidationOutcome},
};
use async_trait::async_trait;

/// Rejection code for an unusable source location.
pub const INPUT_UNAVAILABLE: &str = "INPUT_UNAVAILABLE";

/// Rejection code for an invalid clip range.
pub const BAD_RANGE: &str = "BAD_RANGE";

/// Validates the source location and clip ranges of a request.
///
/// The validator does not probe the source video, so it never reports
/// [`crate::job::ports::VideoInfo`]. Clip ends are checked against
/// `max_source_duration_secs` when one is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipRangeValidator {
    max_source_duration_secs: Option<f64>,
}

impl ClipRangeValidator {
    /// Creates a validator without a source duration limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_source_duration_secs: None,
        }
    }

    /// Rejects clips ending after the given number of seconds.
    #[must_use]
    pub const fn with_max_source_duration(mut self, seconds: f64) -> Self {
        self.max_source_duration_secs = Some(seconds);
        self
    }

    fn check_source(request: &ProcessingRequest) -> Result<(), ValidationOutcome> {
        let Some(url) = request.video_url.as_deref() else {
            return Ok(());
        };
        let trimmed = url.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return Ok(());
        }
        Err(ValidationOutcome::rejected(
            INPUT_UNAVAILABLE,
            format!("{INPUT_UNAVAILABLE}: video URL must be http(s), got '{url}'"),
        ))
    }

    fn check_clip(&self, position: usize, clip: &ClipSpec) -> Result<(), ValidationOutcome> {
        let reject = |reason: String| {
            Err(ValidationOutcome::rejected(
                BAD_RANGE,
                format!("{BAD_RANGE}: clip {position} {reason}"),
            ))
        };

        if !clip.start.is_finite() || !clip.end.is_finite() {
            return reject("has invalid start/end values".to_owned());
        }
        if clip.start < 0.0 {
            return reject("start time cannot be negative".to_owned());
        }
        if clip.end <= clip.start {
            return reject("end time must be greater than start time".to_owned());
        }
        if let Some(limit) = self.max_source_duration_secs
            && clip.end > limit
        {
            return reject(format!(
                "end time ({}s) exceeds video duration ({limit}s)",
                clip.end
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RequestValidator for ClipRangeValidator {
    async fn validate(&self, request: &ProcessingRequest) -> ValidationOutcome {
        if let Err(rejection) = Self::check_source(request) {
            return rejection;
        }
        for (index, clip) in request.clips.iter().enumerate() {
            if let Err(rejection) = self.check_clip(index + 1, clip) {
                return rejection;
            }
        }
        ValidationOutcome::accepted(None)
    }
}
