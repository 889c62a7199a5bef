//! Level settings
//!
//! Data-driven tuning for the level. Everything has a default matching the
//! shipped level; a JSON file can override any subset of fields.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Player tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub spawn: Vec2,
    /// Horizontal speed while a direction is held (px/s)
    pub run_speed: f32,
    /// Upward speed applied by a jump (px/s)
    pub jump_speed: f32,
    pub bounce: f32,
    pub half_extents: Vec2,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            spawn: Vec2::new(100.0, 500.0),
            run_speed: PLAYER_RUN_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            bounce: PLAYER_BOUNCE,
            half_extents: Vec2::new(16.0, 24.0),
        }
    }
}

/// Pickup (star) layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupTuning {
    pub count: usize,
    pub start_x: f32,
    pub step_x: f32,
    /// Spawn and respawn height
    pub y: f32,
    /// Each pickup gets a vertical bounce drawn from this range
    pub bounce_min: f32,
    pub bounce_max: f32,
    pub half_extents: Vec2,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            count: PICKUP_COUNT,
            start_x: PICKUP_START_X,
            step_x: PICKUP_STEP_X,
            y: PICKUP_RESPAWN_Y,
            bounce_min: 0.4,
            bounce_max: 0.8,
            half_extents: Vec2::new(12.0, 11.0),
        }
    }
}

/// Scoring rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringTuning {
    pub points_per_pickup: u32,
    /// Score at which the scroll unlocks
    pub unlock_threshold: u32,
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            points_per_pickup: POINTS_PER_PICKUP,
            unlock_threshold: UNLOCK_THRESHOLD,
        }
    }
}

/// Hazard (bomb) spawn tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardTuning {
    pub spawn_y: f32,
    pub bounce: f32,
    /// Horizontal velocity is drawn from [-max_kick, max_kick]
    pub max_kick: i32,
    pub drift_y: f32,
    pub half_extents: Vec2,
}

impl Default for HazardTuning {
    fn default() -> Self {
        Self {
            spawn_y: HAZARD_SPAWN_Y,
            bounce: HAZARD_BOUNCE,
            max_kick: HAZARD_MAX_KICK,
            drift_y: HAZARD_DRIFT_Y,
            half_extents: Vec2::new(7.0, 7.0),
        }
    }
}

/// Placement of the scroll (marker) and letter (detail object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealLayout {
    pub marker_pos: Vec2,
    pub marker_scale: f32,
    /// Unscaled texture size
    pub marker_size: Vec2,
    pub detail_pos: Vec2,
    pub detail_scale: f32,
    pub detail_size: Vec2,
    /// Peak scale of the unlocked scroll's pulse
    pub pulse_scale: f32,
    pub pulse_ms: u64,
}

impl Default for RevealLayout {
    fn default() -> Self {
        Self {
            marker_pos: Vec2::new(750.0, 50.0),
            marker_scale: 0.6,
            marker_size: Vec2::new(120.0, 120.0),
            detail_pos: Vec2::new(400.0, 300.0),
            detail_scale: 0.8,
            detail_size: Vec2::new(600.0, 450.0),
            pulse_scale: 0.65,
            pulse_ms: 500,
        }
    }
}

/// A static platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub pos: Vec2,
    #[serde(default = "unit_scale")]
    pub scale: f32,
}

fn unit_scale() -> f32 {
    1.0
}

/// Unscaled ground texture size
pub const GROUND_SIZE: Vec2 = Vec2::new(400.0, 32.0);

impl PlatformSpec {
    pub fn half_extents(&self) -> Vec2 {
        GROUND_SIZE * self.scale / 2.0
    }
}

/// Complete level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for pickup bounce and hazard rolls
    pub seed: u64,
    pub world_size: Vec2,
    pub gravity: f32,
    pub player: PlayerTuning,
    pub pickups: PickupTuning,
    pub scoring: ScoringTuning,
    pub long_press_ms: u64,
    pub hazard: HazardTuning,
    pub reveal: RevealLayout,
    pub platforms: Vec<PlatformSpec>,
    pub game_over_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            world_size: Vec2::new(WORLD_WIDTH, WORLD_HEIGHT),
            gravity: 300.0,
            player: PlayerTuning::default(),
            pickups: PickupTuning::default(),
            scoring: ScoringTuning::default(),
            long_press_ms: LONG_PRESS_MS,
            hazard: HazardTuning::default(),
            reveal: RevealLayout::default(),
            platforms: vec![
                PlatformSpec {
                    pos: Vec2::new(400.0, 568.0),
                    scale: 2.0,
                },
                PlatformSpec {
                    pos: Vec2::new(600.0, 400.0),
                    scale: 1.0,
                },
                PlatformSpec {
                    pos: Vec2::new(50.0, 250.0),
                    scale: 1.0,
                },
                PlatformSpec {
                    pos: Vec2::new(750.0, 220.0),
                    scale: 1.0,
                },
            ],
            game_over_delay_ms: GAME_OVER_DELAY_MS,
        }
    }
}

impl Settings {
    /// Default settings with a different seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Reject values the level cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.world_size.x <= 0.0 || self.world_size.y <= 0.0 {
            return Err(SettingsError::Invalid(format!(
                "world size must be positive, got {}x{}",
                self.world_size.x, self.world_size.y
            )));
        }
        if self.pickups.count == 0 {
            return Err(SettingsError::Invalid("pickup count must be at least 1".into()));
        }
        if self.pickups.count > MAX_PICKUPS {
            return Err(SettingsError::Invalid(format!(
                "pickup count must be at most {MAX_PICKUPS}, got {}",
                self.pickups.count
            )));
        }
        let row_end = self.pickups.start_x + self.pickups.step_x * (self.pickups.count - 1) as f32;
        if self.pickups.start_x < 0.0 || row_end > self.world_size.x {
            return Err(SettingsError::Invalid(format!(
                "pickup row spans {}..{} and does not fit a world {} wide",
                self.pickups.start_x, row_end, self.world_size.x
            )));
        }
        if self.pickups.bounce_min > self.pickups.bounce_max {
            return Err(SettingsError::Invalid(format!(
                "pickup bounce range is inverted ({} > {})",
                self.pickups.bounce_min, self.pickups.bounce_max
            )));
        }
        if self.scoring.points_per_pickup == 0 {
            return Err(SettingsError::Invalid("points per pickup must be at least 1".into()));
        }
        if self.long_press_ms == 0 {
            return Err(SettingsError::Invalid("long-press threshold must be at least 1 ms".into()));
        }
        if self.hazard.max_kick < 0 {
            return Err(SettingsError::Invalid(format!(
                "hazard kick must not be negative, got {}",
                self.hazard.max_kick
            )));
        }
        Ok(())
    }
}
