//! Tunables for a game run.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Analog input tuning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Axis value treated as the resting center.
    pub center: i32,
    /// Distance from center below which movement is ignored.
    pub deadzone: i32,
    /// Values strictly above this classify as `Upper`.
    pub upper_threshold: i32,
    /// Values strictly below this classify as `Lower`.
    pub lower_threshold: i32,
    /// Minimum spacing between accepted taps, in seconds.
    pub tap_cooldown: f64,
    /// Axis silence after which selection returns to `Selecting`, in seconds.
    pub pause_reset: f64,
    /// Axis samples older than this no longer drive movement, in seconds.
    pub stale_after: f64,
    /// Controller-click values strictly above this count as a click.
    pub click_threshold: i32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            center: 64,
            deadzone: 10,
            upper_threshold: 75,
            lower_threshold: 53,
            tap_cooldown: 0.3,
            pause_reset: 0.2,
            stale_after: 0.1,
            click_threshold: 64,
        }
    }
}

/// Player token tuning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Start position.
    pub start: (f32, f32),
    /// Side length of the player's bounding square.
    pub token_size: f32,
    /// Movement per tick at multiplier 1.0 and full axis deflection.
    pub base_speed: f32,
    /// Distance at which target-driven movement snaps to the target.
    pub snap_distance: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: (100.0, 100.0),
            token_size: 8.0,
            base_speed: 2.0,
            snap_distance: 3.0,
        }
    }
}

/// Configuration for a game run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Drawable map width.
    pub width: f32,
    /// Drawable map height.
    pub height: f32,
    /// Location whose first encounter shows the introduction node.
    pub goal_location: String,
    /// Item granted when the alternate theme activates.
    pub theme_marker_item: String,
    /// Analog input tuning.
    pub input: InputConfig,
    /// Player token tuning.
    pub player: PlayerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            goal_location: "Polytron4000".to_string(),
            theme_marker_item: "acid".to_string(),
            input: InputConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> EngineResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| EngineError::Config {
            path: path.to_path_buf(),
            reason: source.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|source| EngineError::Config {
            path: path.to_path_buf(),
            reason: source.to_string(),
        })
    }

    /// Set the drawable bounds.
    pub fn with_bounds(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the goal location.
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal_location = goal.into();
        self
    }

    /// Set the player's start position.
    pub fn with_start(mut self, x: f32, y: f32) -> Self {
        self.player.start = (x, y);
        self
    }

    /// Set the base movement speed.
    pub fn with_base_speed(mut self, speed: f32) -> Self {
        self.player.base_speed = speed;
        self
    }

    /// Set the gesture timers.
    pub fn with_gesture_timing(mut self, tap_cooldown: f64, pause_reset: f64) -> Self {
        self.input.tap_cooldown = tap_cooldown;
        self.input.pause_reset = pause_reset;
        self
    }
}
