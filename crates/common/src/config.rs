use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or validating a tracer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid surface dimensions {width}x{height}: both must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Startup parameters for the tracer session.
///
/// The accumulation surfaces are allocated once at `width`x`height` and never
/// resized while the session runs; a window resize re-initializes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Presentation surface width in physical pixels.
    pub width: u32,
    /// Presentation surface height in physical pixels.
    pub height: u32,
    /// Initial camera position in world space.
    pub initial_position: Vec3,
    /// Initial yaw in degrees (0 looks down +X, -90 looks down -Z).
    pub initial_yaw_degrees: f32,
    /// Initial pitch in degrees, clamped to [-89, 89] at camera construction.
    pub initial_pitch_degrees: f32,
    /// Translation speed in world units per second.
    pub speed: f32,
    /// Scales rotation rate and scroll dolly rate.
    pub sensitivity: f32,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            initial_position: Vec3::new(0.0, 0.75, 1.0),
            initial_yaw_degrees: -90.0,
            initial_pitch_degrees: -32.0,
            speed: 5.0,
            sensitivity: 1.0,
        }
    }
}

impl TracerConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_json::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can size GPU resources.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = TracerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.speed, 5.0);
    }

    #[test]
    fn zero_dimensions_rejected() {
        let config = TracerConfig {
            width: 0,
            ..TracerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { width: 0, .. })
        ));
    }

    #[test]
    fn json_round_trip() {
        let config = TracerConfig {
            width: 1280,
            height: 720,
            speed: 2.5,
            ..TracerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: TracerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config: TracerConfig = serde_json::from_str(r#"{"width": 1024}"#).unwrap();
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 600);
        assert_eq!(config.sensitivity, 1.0);
    }

    #[test]
    fn load_from_file() {
        let dir = std::env::temp_dir().join("daedalus_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, r#"{"width": 640, "height": 480, "speed": 1.0}"#).unwrap();

        let config = TracerConfig::load(&path).unwrap();
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 480);
        assert_eq!(config.speed, 1.0);
    }
}
