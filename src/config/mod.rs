//! Runtime settings loaded from environment variables.
//!
//! Parsing is a pure function over a variable lookup so that it can be
//! exercised without touching the process environment. [`Settings::from_env`]
//! binds it to [`std::env::var`].

use crate::observability::TracingConfig;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Bind host variable.
pub const HOST_VAR: &str = "STORYCLIP_HOST";
/// Bind port variable.
pub const PORT_VAR: &str = "STORYCLIP_PORT";
/// Processing backend base URL variable.
pub const PROCESSOR_BASE_URL_VAR: &str = "PROCESSOR_BASE_URL";
/// Processing backend request timeout variable, in seconds.
pub const PROCESSOR_TIMEOUT_VAR: &str = "PROCESSOR_TIMEOUT_SECS";
/// Maximum accepted clip end offset variable, in seconds.
pub const MAX_SOURCE_DURATION_VAR: &str = "MAX_SOURCE_DURATION_SECS";
/// Processing time estimate reported to clients.
pub const ESTIMATED_TIME_VAR: &str = "ESTIMATED_TIME";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PROCESSOR_BASE_URL: &str = "http://127.0.0.1:8081";
const DEFAULT_PROCESSOR_TIMEOUT_SECS: u64 = 600;
const DEFAULT_ESTIMATED_TIME: &str = "30-60 seconds";

/// Errors raised while reading settings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be used.
    #[error("invalid value for {name}: '{value}' ({reason})")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Raw value found in the environment.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Processing backend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorSettings {
    /// Base URL of the processing backend.
    pub base_url: String,
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
}

/// Complete service settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Processing backend settings.
    pub processor: ProcessorSettings,
    /// Longest source video, in seconds, that clips may reference.
    pub max_source_duration_secs: Option<f64>,
    /// Processing time estimate returned when a job is accepted.
    pub estimated_time: String,
    /// Log output settings.
    pub tracing: TracingConfig,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through the given variable lookup.
    ///
    /// Unset and blank variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let server = ServerSettings {
            host: read(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port: parse_or(PORT_VAR, read(PORT_VAR), DEFAULT_PORT)?,
        };

        let timeout_secs = parse_or(
            PROCESSOR_TIMEOUT_VAR,
            read(PROCESSOR_TIMEOUT_VAR),
            DEFAULT_PROCESSOR_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(invalid(PROCESSOR_TIMEOUT_VAR, "0", "must be positive"));
        }
        let processor = ProcessorSettings {
            base_url: read(PROCESSOR_BASE_URL_VAR)
                .unwrap_or_else(|| DEFAULT_PROCESSOR_BASE_URL.to_owned()),
            timeout: Duration::from_secs(timeout_secs),
        };

        let max_source_duration_secs = read(MAX_SOURCE_DURATION_VAR)
            .map(|raw| {
                let seconds = parse_or::<f64>(MAX_SOURCE_DURATION_VAR, Some(raw.clone()), 0.0)?;
                if seconds.is_finite() && seconds > 0.0 {
                    Ok(seconds)
                } else {
                    Err(invalid(MAX_SOURCE_DURATION_VAR, &raw, "must be a positive number"))
                }
            })
            .transpose()?;

        Ok(Self {
            server,
            processor,
            max_source_duration_secs,
            estimated_time: read(ESTIMATED_TIME_VAR)
                .unwrap_or_else(|| DEFAULT_ESTIMATED_TIME.to_owned()),
            tracing: TracingConfig::from_lookup(read),
        })
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .parse()
            .map_err(|err: T::Err| invalid(name, &value, &err.to_string()))
    })
}

fn invalid(name: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name,
        value: value.to_owned(),
        reason: reason.to_owned(),
    }
}
