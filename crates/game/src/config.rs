//! Session configuration and RON config files.

use std::fs;
use std::path::Path;

use museum_physics::movement::InvalidConfig;
use museum_physics::MovementConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid movement config: {0}")]
    Invalid(#[from] InvalidConfig),
}

/// Walk session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Movement physics configuration.
    pub movement: MovementConfig,

    /// Mouse sensitivity.
    pub mouse_sensitivity: f32,

    /// How far away an exhibit can be picked for inspection (units).
    pub inspect_range: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            mouse_sensitivity: 2.0,
            inspect_range: 4.0,
        }
    }
}

impl SessionConfig {
    /// Parse a config from RON text and validate it.
    ///
    /// Missing fields take their default values.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.movement.validate()?;
        Ok(config)
    }

    /// Load and validate a RON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Load a config file, falling back to defaults if it is missing or bad.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("using default config ({}): {e}", path.display());
                Self::default()
            }
        }
    }

    /// Serialize to pretty RON.
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }
}
