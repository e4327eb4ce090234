//! Configuration for a composition run.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_MAX_ITERATIONS: usize = 15;

/// What happens to nodes still open when the iteration cap is reached, and to
/// Predicate Modification clashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Mark them `?` and return normally.
    #[default]
    Mark,
    /// Return a `CompositionError` instead.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComposeConfig {
    /// Upper bound on full rule passes. Deep trees may need more than the default.
    pub max_iterations: usize,
    pub on_exhaustion: ExhaustionPolicy,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            on_exhaustion: ExhaustionPolicy::Mark,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_iterations must be at least 1")]
    ZeroIterations,
    #[error("Could not read config '{path}': {message}")]
    Io { path: String, message: String },
    #[error("Malformed config JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e.to_string())
    }
}

impl ComposeConfig {
    pub fn with_max_iterations(max_iterations: usize) -> Result<Self, ConfigError> {
        let config = Self { max_iterations, ..Self::default() };
        config.validate()?;
        Ok(config)
    }

    pub fn fail_fast(mut self) -> Self {
        self.on_exhaustion = ExhaustionPolicy::Fail;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&text)
    }
}
