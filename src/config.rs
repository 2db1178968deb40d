//! Configuration System
//!
//! Tracking behavior and logging settings. Values are layered: built-in
//! defaults, then an optional TOML file, then `FRAMELOG__`-prefixed environment
//! variables (`FRAMELOG__TRACKING__VALUE_RESETS_TOP=false`).

use crate::error::TrackError;
use crate::logging::LoggingConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment prefix for configuration overrides
pub const ENV_PREFIX: &str = "FRAMELOG";

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FramelogConfig {
    #[serde(default)]
    pub tracking: TrackingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tracking behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Whether attaching a value re-anchors the top frame at the value's line.
    /// When false, a value call continues the top frame like a non-resetting
    /// track.
    #[serde(default = "default_true")]
    pub value_resets_top: bool,

    /// Deepest actual stack accepted by a track event (unbounded when unset)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_true() -> bool {
    true
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            value_resets_top: default_true(),
            max_depth: None,
        }
    }
}

impl TrackingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == Some(0) {
            return Err("max_depth must be at least 1".to_string());
        }
        Ok(())
    }
}

impl FramelogConfig {
    pub fn validate(&self) -> Result<(), TrackError> {
        self.tracking
            .validate()
            .map_err(|e| TrackError::ConfigError(format!("tracking: {}", e)))?;
        self.logging
            .validate()
            .map_err(|e| TrackError::ConfigError(format!("logging: {}", e)))?;
        Ok(())
    }
}

/// Loads [`FramelogConfig`] from defaults, an optional file and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Defaults overridden by the environment.
    pub fn load() -> Result<FramelogConfig, TrackError> {
        Self::build(None)
    }

    /// Defaults, then `path` (format taken from its extension), then the
    /// environment. The file must exist.
    pub fn load_from(path: &Path) -> Result<FramelogConfig, TrackError> {
        Self::build(Some(path))
    }

    fn build(path: Option<&Path>) -> Result<FramelogConfig, TrackError> {
        let mut builder = Config::builder()
            .set_default("tracking.value_resets_top", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "text")?
            .set_default("logging.output", "stdout")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config: FramelogConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
