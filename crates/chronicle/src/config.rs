//! Engine configuration.
//!
//! Loaded once at startup from TOML; every field has a default so an empty
//! file (or no file at all) yields a playable setup.

use serde::Deserialize;
use thiserror::Error;

/// Errors from loading the engine configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML or has wrong field types.
    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Window setup.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Initial window width in pixels (replaced by the UI overlay size
    /// when one loads).
    pub width: f32,
    /// Initial window height in pixels.
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "chronicle".to_string(),
            width: 1280.0,
            height: 1024.0,
        }
    }
}

/// Camera scrolling behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Edge-scroll trigger margin, in pixels from each screen edge.
    pub edge_margin_px: f32,
    /// Edge-scroll speed in screen pixels per millisecond.
    pub edge_speed: f32,
    /// Screen pixels an arrow key nudges the camera per press.
    pub key_step_px: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            edge_margin_px: 10.0,
            edge_speed: 1.0,
            key_step_px: 20.0,
        }
    }
}

/// HUD layout and timing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Height of the vertical band that counts as the world viewport;
    /// mouse events below it belong to the HUD panels.
    pub world_viewport_height: f32,
    /// Number of visible message-log lines.
    pub message_lines: usize,
    /// Milliseconds a message stays visible.
    pub message_timeout_ms: u64,
    /// Idle sleep per quiet frame, in milliseconds (CPU-yield policy, not
    /// a frame-rate guarantee).
    pub idle_frame_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            world_viewport_height: 800.0,
            message_lines: 5,
            message_timeout_ms: 10_000,
            idle_frame_ms: 1000 / 60,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window setup.
    pub window: WindowConfig,
    /// Camera scrolling.
    pub camera: CameraConfig,
    /// HUD layout and timing.
    pub ui: UiConfig,
}

impl EngineConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is malformed.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}
