//! Runtime-tunable game settings
//!
//! Every field defaults to the matching constant in [`crate::consts`]. A JSON
//! file may override any subset of fields; missing keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for [`Settings`]
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its usable range
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Canvas ===
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Spawning ===
    /// Milliseconds between periodic asteroid spawns
    pub spawn_interval_ms: f64,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,

    // === Player ===
    pub player_thrust: f32,
    pub player_max_speed: f32,
    pub player_friction: f32,
    pub rotational_speed: f32,
    pub projectile_speed: f32,

    /// RNG seed for asteroid shapes and spawn parameters
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,

            player_thrust: PLAYER_THRUST,
            player_max_speed: PLAYER_MAX_SPEED,
            player_friction: PLAYER_FRICTION,
            rotational_speed: ROTATIONAL_SPEED,
            projectile_speed: PROJECTILE_SPEED,

            seed: 12345,
        }
    }
}

impl Settings {
    /// Settings for a canvas of the given size, everything else default
    pub fn with_canvas(width: f32, height: f32) -> Result<Self, SettingsError> {
        let settings = Self {
            canvas_width: width,
            canvas_height: height,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file and validate them
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms > 0.0) {
            return Err(SettingsError::Invalid {
                field: "spawn_interval_ms",
                reason: format!("must be positive, got {}", self.spawn_interval_ms),
            });
        }
        positive("asteroid_max_speed", self.asteroid_max_speed)?;
        if self.asteroid_min_speed < 0.0 || self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(SettingsError::Invalid {
                field: "asteroid_min_speed",
                reason: format!(
                    "must be within [0, {}], got {}",
                    self.asteroid_max_speed, self.asteroid_min_speed
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.player_friction) {
            return Err(SettingsError::Invalid {
                field: "player_friction",
                reason: format!("must be within [0, 1], got {}", self.player_friction),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}
