//! CLI settings.
//!
//! Settings are resolved with the following precedence (highest first):
//! 1. Environment variables (`PQSIM_` prefix)
//! 2. Settings file (YAML or JSON)
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::TracingFormat;

/// Complete CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Shot sampling defaults
    #[serde(default)]
    pub sampling: SamplingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "console" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Defaults for the `sample` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Number of shots per estimate
    #[serde(default = "default_shots")]
    pub shots: usize,

    /// RNG seed; unseeded runs draw from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "console".to_string()
}

fn default_shots() -> usize {
    1024
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        SamplingConfig {
            shots: default_shots(),
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a YAML or JSON file, chosen by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        let settings: Settings = if is_json(path) {
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?
        } else {
            serde_yaml_ng::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an optional file, then apply environment overrides.
    pub fn load(settings_file: Option<&Path>) -> Result<Self, ConfigError> {
        let settings = match settings_file {
            Some(path) => Self::from_file(path)?,
            None => Settings::default(),
        };
        let settings = settings.merge_env();
        settings.validate()?;
        Ok(settings)
    }

    /// Merge `PQSIM_*` environment variables into these settings.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge overrides from an arbitrary variable source.
    ///
    /// Only variables that are present override; absent ones leave the
    /// corresponding fields unchanged. Unparseable numbers are ignored.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("PQSIM_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("PQSIM_LOG_FORMAT") {
            self.logging.format = v;
        }
        if let Some(val) = lookup("PQSIM_SHOTS").and_then(|v| v.parse().ok()) {
            self.sampling.shots = val;
        }
        if let Some(val) = lookup("PQSIM_SEED").and_then(|v| v.parse().ok()) {
            self.sampling.seed = Some(val);
        }
        self
    }

    /// Validate settings values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: {other}"
                )));
            }
        }

        self.tracing_format()?;

        if self.sampling.shots == 0 {
            return Err(ConfigError::ValidationError(
                "shots must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Parsed log format.
    pub fn tracing_format(&self) -> Result<TracingFormat, ConfigError> {
        match self.logging.format.as_str() {
            "console" => Ok(TracingFormat::Console),
            "json" => Ok(TracingFormat::Json),
            other => Err(ConfigError::ValidationError(format!(
                "Invalid log format: {other}"
            ))),
        }
    }
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Settings errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
