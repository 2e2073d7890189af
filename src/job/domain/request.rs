//! Processing request payload and its normalization.
//!
//! Requests arrive from the frontend with a loosely populated effect
//! structure. [`ProcessingRequest::normalized`] fills in the canonical
//! defaults for every clip so that validation and processing always see a
//! complete filter descriptor. Unknown fields are preserved verbatim in the
//! `extra` maps so the processing backend receives what the client sent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Filter type used when a clip carries no filter.
pub const NO_FILTER: &str = "none";

fn default_filter_kind() -> String {
    NO_FILTER.to_owned()
}

/// A video processing request as submitted by the client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingRequest {
    /// Source video location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Clips to cut from the source, each with its own effects.
    #[serde(default)]
    pub clips: Vec<ClipSpec>,
    /// Overlay descriptors, forwarded untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlays: Option<Vec<Value>>,
    /// Subtitle descriptors, forwarded untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<Vec<Value>>,
    /// Any other top-level fields supplied by the client.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProcessingRequest {
    /// Returns the request with every clip normalized.
    ///
    /// Normalization is idempotent: applying it to an already normalized
    /// request returns an equal request.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        for clip in &mut self.clips {
            clip.normalize();
        }
        self
    }

    /// Returns whether every clip already carries a complete filter
    /// descriptor.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.clips.iter().all(ClipSpec::is_normalized)
    }
}

/// One clip of a processing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipSpec {
    /// Clip start offset in seconds.
    pub start: f64,
    /// Clip end offset in seconds.
    pub end: f64,
    /// Effects applied to the clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<ClipEffects>,
    /// Any other clip fields supplied by the client.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClipSpec {
    /// Creates a clip without effects.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            effects: None,
            extra: Map::new(),
        }
    }

    /// Sets the clip effects.
    #[must_use]
    pub fn with_effects(mut self, effects: ClipEffects) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Fills in missing effects, filter, command and values.
    pub fn normalize(&mut self) {
        let effects = self.effects.get_or_insert_with(ClipEffects::default);
        let filter = effects.filter.get_or_insert_with(FilterDescriptor::none);
        filter.command.get_or_insert_with(String::new);
        filter.values.get_or_insert_with(Map::new);
    }

    /// Returns whether the clip carries a complete filter descriptor.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.effects
            .as_ref()
            .and_then(|effects| effects.filter.as_ref())
            .is_some_and(|filter| filter.command.is_some() && filter.values.is_some())
    }

}

/// Effects container attached to a clip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipEffects {
    /// Colour/visual filter applied to the clip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterDescriptor>,
    /// Other effect settings (flip, overlays, camera movement, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClipEffects {
    /// Creates an effects container holding only a filter.
    #[must_use]
    pub fn with_filter(filter: FilterDescriptor) -> Self {
        Self {
            filter: Some(filter),
            extra: Map::new(),
        }
    }
}

/// Visual filter descriptor.
///
/// `command` and `values` are also accepted under their legacy names
/// `ffmpegCommand` and `ffmpegValues`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// Filter type, `"none"` when no filter is applied.
    #[serde(rename = "type", default = "default_filter_kind")]
    pub kind: String,
    /// Filter strength.
    #[serde(default)]
    pub intensity: f64,
    /// Raw filter expression handed to the encoder.
    #[serde(
        default,
        alias = "ffmpegCommand",
        skip_serializing_if = "Option::is_none"
    )]
    pub command: Option<String>,
    /// Named filter parameters.
    #[serde(default, alias = "ffmpegValues", skip_serializing_if = "Option::is_none")]
    pub values: Option<Map<String, Value>>,
    /// Any other filter fields supplied by the client.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FilterDescriptor {
    /// Returns the canonical "no filter" descriptor.
    #[must_use]
    pub fn none() -> Self {
        Self {
            kind: default_filter_kind(),
            intensity: 0.0,
            command: Some(String::new()),
            values: Some(Map::new()),
            extra: Map::new(),
        }
    }

    /// Creates a filter of the given type and intensity with no command or
    /// values.
    #[must_use]
    pub fn new(kind: impl Into<String>, intensity: f64) -> Self {
        Self {
            kind: kind.into(),
            intensity,
            command: None,
            values: None,
            extra: Map::new(),
        }
    }
}
