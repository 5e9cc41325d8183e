//! Physics tuning
//!
//! Everything that shapes how the table feels lives here so a board can be
//! re-tuned from a JSON file without touching the simulation.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Failure to read or parse a tuning file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read physics config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid physics config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid physics config: {0}")]
    Invalid(&'static str),
}

/// Tunable physics and scoring constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    // === Integration ===
    /// Coefficient of restitution for every surface
    pub restitution: f32,
    /// Downward acceleration per unit of time
    pub gravity: f32,
    /// Velocity retained per unit of time (applied as `drag^dt`)
    pub drag: f32,
    /// Sub-steps per rendered frame (dt = 1 / substeps)
    pub substeps: u32,

    // === Contact geometry ===
    pub ball_radius: f32,
    pub wall_half_thickness: f32,

    // === Actuators ===
    /// Gain of the flipper angle controller
    pub flipper_strength: f32,
    /// Share of the flipper surface velocity handed to the ball on contact
    pub flipper_grip: f32,
    /// Approach speed above which a flipper contact is audible
    pub flipper_cue_speed: f32,
    /// Extra normal velocity from powered obstacles
    pub kick: f32,

    // === Scoring ===
    pub bumper_score: u64,
    pub slingshot_score: u64,
    pub target_score: u64,
    pub bank_bonus: u64,

    // === Rules ===
    pub starting_lives: u8,
    pub drain_margin: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            restitution: 0.4,
            gravity: 0.05,
            drag: 0.995,
            substeps: SUBSTEPS,

            ball_radius: BALL_RADIUS,
            wall_half_thickness: WALL_HALF_THICKNESS,

            flipper_strength: 0.3,
            flipper_grip: 0.5,
            flipper_cue_speed: 2.0,
            kick: 5.0,

            bumper_score: 100,
            slingshot_score: 50,
            target_score: 200,
            bank_bonus: 1000,

            starting_lives: STARTING_LIVES,
            drain_margin: DRAIN_MARGIN,
        }
    }
}

impl PhysicsConfig {
    /// Fixed sub-step size
    #[inline]
    pub fn dt(&self) -> f32 {
        1.0 / self.substeps as f32
    }

    /// Parse a config, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from disk; a missing file falls back to defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let config = Self::from_json(&json)?;
                log::info!("Loaded physics config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("{} not found, using default physics", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.substeps == 0 {
            return Err(ConfigError::Invalid("substeps must be at least 1"));
        }
        if self.ball_radius <= 0.0 {
            return Err(ConfigError::Invalid("ball_radius must be positive"));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid("starting_lives must be at least 1"));
        }
        Ok(())
    }
}
