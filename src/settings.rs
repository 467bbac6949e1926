//! Game settings
//!
//! Fixed at construction. Persisted as JSON, every field optional in the file.

use std::path::Path;
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::renderer::Color;

/// Errors raised while loading or validating [`Settings`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not access settings file : {0}")]
    Io(#[from] io::Error),

    #[error("settings file is not valid JSON : {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}` : {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Status line texts pushed to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusMessages {
    pub win: String,
    pub lose: String,
    pub paused: String,
}

impl Default for StatusMessages {
    fn default() -> Self {
        Self {
            win: "You win!".to_string(),
            lose: "You lose!".to_string(),
            paused: "Paused".to_string(),
        }
    }
}

/// Entity colours (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub human: Color,
    pub computer: Color,
    pub ball: Color,
    /// Paddle colour while its hit-countdown is running
    pub hit: Color,
    pub median_line: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            human: Color::BLUE,
            computer: Color::RED,
            ball: Color::GREEN,
            hit: Color::WHITE,
            median_line: Color::WHITE.with_alpha(80),
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Entity dimensions ===
    pub paddle_width: u32,
    pub paddle_height: u32,
    pub ball_radius: u32,

    // === Pacing ===
    /// Initial tick rate
    pub frames_per_second: u32,

    // === Physics ===
    /// Ball travel per tick
    pub ball_speed: f32,
    /// Computer paddle travel per tick
    pub paddle_speed: f32,
    /// Largest outgoing angle off a paddle (radians)
    pub max_bounce_angle: f32,

    // === Computer player ===
    /// Chance per tick that the computer paddle tracks the ball
    pub ai_move_probability: f64,
    /// Seed for the reaction RNG, random when absent
    pub seed: Option<u64>,

    // === Presentation ===
    pub hit_flash_frames: u32,
    pub messages: StatusMessages,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            ball_radius: BALL_RADIUS,

            frames_per_second: FPS_INIT,

            ball_speed: BALL_SPEED,
            paddle_speed: PADDLE_SPEED,
            max_bounce_angle: MAX_BOUNCE_ANGLE,

            ai_move_probability: AI_MOVE_PROBABILITY,
            seed: None,

            hit_flash_frames: HIT_FLASH_FRAMES,
            messages: StatusMessages::default(),
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Parse settings from JSON text and validate them
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        if self.paddle_width == 0 {
            return invalid("paddle_width", "must be at least 1");
        }
        if self.paddle_height == 0 {
            return invalid("paddle_height", "must be at least 1");
        }
        if self.ball_radius == 0 {
            return invalid("ball_radius", "must be at least 1");
        }
        if self.frames_per_second == 0 {
            return invalid("frames_per_second", "must be at least 1");
        }
        if !(self.ball_speed.is_finite() && self.ball_speed > 0.0) {
            return invalid("ball_speed", "must be a positive number");
        }
        if !(self.paddle_speed.is_finite() && self.paddle_speed > 0.0) {
            return invalid("paddle_speed", "must be a positive number");
        }
        if !(self.max_bounce_angle > 0.0 && self.max_bounce_angle < std::f32::consts::FRAC_PI_2) {
            return invalid("max_bounce_angle", "must lie strictly between 0 and pi/2");
        }
        if !(0.0..=1.0).contains(&self.ai_move_probability) {
            return invalid("ai_move_probability", "must lie within [0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.paddle_width, 25);
        assert_eq!(settings.paddle_height, 85);
        assert_eq!(settings.ball_radius, 15);
        assert_eq!(settings.frames_per_second, 60);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "paddle_height": 120, "seed": 7 }"#).unwrap();
        assert_eq!(settings.paddle_height, 120);
        assert_eq!(settings.paddle_width, PADDLE_WIDTH);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.messages, StatusMessages::default());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = Settings::from_json(r#"{ "ai_move_probability": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "ai_move_probability",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "frames_per_second": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "frames_per_second",
                ..
            }
        ));

        let err = Settings::from_json(r#"{ "max_bounce_angle": 2.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ paddle_width: "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn save_then_load() {
        let path = std::env::temp_dir().join(format!("duel_pong_settings_{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.ball_speed = 10.0;
        settings.messages.win = "Point!".to_string();
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }
}
