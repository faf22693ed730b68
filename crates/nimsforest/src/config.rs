//! Viewer configuration, loaded once at startup from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nimsforest_scene::CameraTuning;

/// Configuration load failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid viewer TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Viewer tunables. Every field has a default matching the shipped
/// behavior, so a partial (or absent) file is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Minimum camera zoom.
    pub zoom_min: f32,
    /// Maximum camera zoom.
    pub zoom_max: f32,
    /// Wheel-delta-to-zoom factor.
    pub zoom_sensitivity: f32,
    /// Pointer travel (px, per axis) that turns a press into a drag.
    pub drag_threshold: f32,
    /// Seed for the fixture generator.
    pub fixture_seed: u64,
    /// Lands generated by the fixture source.
    pub fixture_lands: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            zoom_min: 0.5,
            zoom_max: 2.0,
            zoom_sensitivity: 0.001,
            drag_threshold: 2.0,
            fixture_seed: 0x4e46,
            fixture_lands: 12,
        }
    }
}

impl ViewerConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Camera tuning derived from this config.
    #[must_use]
    pub fn camera_tuning(&self) -> CameraTuning {
        CameraTuning {
            zoom_min: self.zoom_min,
            zoom_max: self.zoom_max,
            wheel_sensitivity: self.zoom_sensitivity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_shipped_constants() {
        let config = ViewerConfig::default();
        assert!((config.zoom_min - 0.5).abs() < f32::EPSILON);
        assert!((config.zoom_max - 2.0).abs() < f32::EPSILON);
        assert!((config.zoom_sensitivity - 0.001).abs() < f32::EPSILON);
        assert!((config.drag_threshold - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ViewerConfig = toml::from_str("zoom_max = 3.0").unwrap();
        assert!((config.zoom_max - 3.0).abs() < f32::EPSILON);
        assert!((config.zoom_min - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.fixture_lands, 12);
    }

    #[test]
    fn garbage_toml_is_an_error() {
        let result: Result<ViewerConfig, _> = toml::from_str("zoom_max = \"big\"");
        assert!(result.is_err());
    }
}
