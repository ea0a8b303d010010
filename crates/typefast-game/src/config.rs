// Game configuration
//
// Every field has the game's default, so a config file only needs to name
// the values it changes.

use serde::{Deserialize, Serialize};
use typefast_core::policy::DelimiterPolicy;

use crate::scroll::SpawnPolicy;

/// Configuration value that cannot drive a session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("screen size {width}x{height} must be positive")]
    Screen { width: f32, height: f32 },
    #[error("font size {0} must be positive")]
    FontSize(f32),
    #[error("wpm target range {min}..={max} is invalid (minimum must be at least 1)")]
    WpmRange { min: u32, max: u32 },
    #[error("spawn range `{field}` is inverted: {min} > {max}")]
    SpawnRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("minimum spawn speed {0} must not be negative")]
    NegativeSpeed(f32),
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f32 },
    #[error("spawn range `{field}` is too wide: {min}..{max}")]
    SpawnRangeOverflow {
        field: &'static str,
        min: f32,
        max: f32,
    },
}

/// Screen, pacing and tokenizer settings for one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub font_size: f32,
    /// Words spawned per minute.
    pub wpm_target: u32,
    pub wpm_target_min: u32,
    pub wpm_target_max: u32,
    pub spawn: SpawnPolicy,
    pub delimiters: DelimiterPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 720.0,
            font_size: 30.0,
            wpm_target: 30,
            wpm_target_min: 1,
            wpm_target_max: 170,
            spawn: SpawnPolicy::default(),
            delimiters: DelimiterPolicy::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.spawn;
        for (field, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("font_size", self.font_size),
            ("spawn.top", s.top),
            ("spawn.bottom_margin", s.bottom_margin),
            ("spawn.start_x_min", s.start_x_min),
            ("spawn.start_x_max", s.start_x_max),
            ("spawn.speed_min", s.speed_min),
            ("spawn.speed_max", s.speed_max),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(ConfigError::Screen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if !(self.font_size > 0.0) {
            return Err(ConfigError::FontSize(self.font_size));
        }
        if self.wpm_target_min == 0 || self.wpm_target_min > self.wpm_target_max {
            return Err(ConfigError::WpmRange {
                min: self.wpm_target_min,
                max: self.wpm_target_max,
            });
        }
        for (field, min, max) in [
            ("start_x", s.start_x_min, s.start_x_max),
            ("speed", s.speed_min, s.speed_max),
        ] {
            if min > max {
                return Err(ConfigError::SpawnRange { field, min, max });
            }
        }
        // An empty row range falls back to `top`, so only its width matters.
        for (field, min, max) in [
            ("start_x", s.start_x_min, s.start_x_max),
            ("speed", s.speed_min, s.speed_max),
            ("y", s.top, self.screen_height - s.bottom_margin),
        ] {
            if !(max - min).is_finite() {
                return Err(ConfigError::SpawnRangeOverflow { field, min, max });
            }
        }
        if s.speed_min < 0.0 {
            return Err(ConfigError::NegativeSpeed(s.speed_min));
        }
        Ok(())
    }

    /// `target` limited to the configured range.
    pub fn clamp_wpm_target(&self, target: u32) -> u32 {
        target.clamp(self.wpm_target_min, self.wpm_target_max)
    }
}
