//! Renderer configuration
//!
//! Settings the graphics context is constructed with: the texture-unit
//! limit the state cache is sized to, and the default raster state applied
//! once at startup. Loadable from TOML with validation and sensible
//! defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::backend::{CullMode, DepthFunc};

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be parsed as TOML
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// Settings parsed but describe an unusable configuration
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Number of texture units the backend exposes
    pub max_texture_units: usize,

    /// Clear color applied at startup (RGBA)
    pub clear_color: [f32; 4],

    /// Clear depth applied at startup
    pub clear_depth: f32,

    /// Whether depth testing starts enabled
    pub depth_test: bool,

    /// Initial depth comparison function
    pub depth_func: DepthFunc,

    /// Initial face-culling mode
    pub cull_mode: CullMode,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_texture_units: 16,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            clear_depth: 1.0,
            depth_test: true,
            depth_func: DepthFunc::LessOrEqual,
            cull_mode: CullMode::Back,
        }
    }
}

impl RenderSettings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check that the settings describe a usable configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_texture_units == 0 {
            return Err(ConfigError::Invalid(
                "max_texture_units must be at least 1".to_owned(),
            ));
        }
        if !(0.0..=1.0).contains(&self.clear_depth) {
            return Err(ConfigError::Invalid(format!(
                "clear_depth must be within [0, 1], got {}",
                self.clear_depth
            )));
        }
        Ok(())
    }
}
