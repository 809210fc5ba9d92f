//! Top-level application configuration

use super::{Config, ConfigError};
use crate::camera::CameraInfo;
use crate::frame::FrameConfig;
use crate::player::PlayerConfig;
use serde::{Deserialize, Serialize};

/// # Complete Application Configuration
///
/// Everything the logic layer needs to assemble a world: logging, the camera
/// rig, the player controller and the frame driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Default log filter, overridable through `RUST_LOG`
    pub log_level: String,
    /// Camera rig configuration
    pub camera: CameraInfo,
    /// Player controller tuning
    pub player: PlayerConfig,
    /// Frame driver configuration
    pub frame: FrameConfig,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log level cannot be empty".to_string()));
        }
        self.camera.validate()?;
        self.player.validate()?;
        self.frame.validate()?;
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            camera: CameraInfo::default(),
            player: PlayerConfig::default(),
            frame: FrameConfig::default(),
        }
    }
}

impl Config for ApplicationConfig {}
