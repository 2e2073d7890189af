//! Log output configuration.

/// Environment name variable.
pub const APP_ENV_VAR: &str = "APP_ENV";
/// Log format variable; `json` selects JSON output.
pub const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

const DEFAULT_ENVIRONMENT: &str = "development";

/// Configuration for tracing initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Deployment environment name, recorded at startup.
    pub environment: String,
    /// Emit JSON log lines instead of human-readable ones.
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_owned(),
            json_format: false,
        }
    }
}

impl TracingConfig {
    /// Reads the configuration through the given variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            environment: lookup(APP_ENV_VAR).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_owned()),
            json_format: lookup(LOG_FORMAT_VAR)
                .is_some_and(|format| format.trim().eq_ignore_ascii_case("json")),
        }
    }
}
