//! Configuration system.
//!
//! Loads mover configuration from JSON strings/files. Every field has a
//! default, so partial documents are accepted.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Per-character movement options, set once and read-only while producing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Author move/orientation inputs relative to the movement base, if any.
    pub use_base_relative_movement: bool,
    /// Face the direction of movement rather than the control rotation.
    pub orient_rotation_to_movement: bool,
    /// Keep orientation intent in the horizontal plane.
    pub should_remain_vertical: bool,
    /// Keep turning toward the last move direction after input stops.
    pub maintain_last_input_orientation: bool,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            use_base_relative_movement: true,
            orient_rotation_to_movement: true,
            should_remain_vertical: true,
            maintain_last_input_orientation: false,
        }
    }
}

/// Player controller options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Camera yaw rate at full look deflection, degrees per second.
    pub look_rate_yaw: f32,
    /// Camera pitch rate at full look deflection, degrees per second.
    pub look_rate_pitch: f32,
    pub view_pitch_min: f32,
    pub view_pitch_max: f32,
    /// Fixed simulation tick rate.
    pub tick_hz: u32,
    /// Number of produced commands kept for replay.
    pub history_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            look_rate_yaw: 100.0,
            look_rate_pitch: 100.0,
            view_pitch_min: -89.0,
            view_pitch_max: 89.0,
            tick_hz: 60,
            history_capacity: 128,
        }
    }
}

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MoverConfig {
    pub character: CharacterConfig,
    pub controller: ControllerConfig,
}

impl MoverConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg = Self::from_json_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), ?cfg, "Loaded mover config");
        Ok(cfg)
    }
}
