//! Star Scroll - a single-screen platformer level
//!
//! Core modules:
//! - `sim`: Gameplay coordination (input arbitration, collision events, score, reveal, hazards)
//! - `platform`: Physics/render/scene collaborator traits plus headless implementations
//! - `scene`: Scene keys and the game-over screen
//! - `settings`: Data-driven level tuning
//! - `assets`: Texture and animation keys

pub mod assets;
pub mod platform;
pub mod scene;
pub mod settings;
pub mod sim;

pub use platform::{Host, Physics, Renderer, SceneDirector};
pub use scene::{GameOverScreen, SceneKey};
pub use settings::{Settings, SettingsError};
pub use sim::Level;

/// Game configuration constants
pub mod consts {
    /// Frame duration of the reference 60 Hz frame driver, in milliseconds
    pub const FRAME_MS: u64 = 16;

    /// Level dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RUN_SPEED: f32 = 160.0;
    pub const PLAYER_JUMP_SPEED: f32 = 330.0;
    pub const PLAYER_BOUNCE: f32 = 0.2;

    /// Pickup (star) layout
    pub const PICKUP_COUNT: usize = 12;
    pub const PICKUP_START_X: f32 = 12.0;
    pub const PICKUP_STEP_X: f32 = 70.0;
    pub const PICKUP_RESPAWN_Y: f32 = 0.0;
    /// Largest star row a level accepts
    pub const MAX_PICKUPS: usize = 256;

    /// Scoring
    pub const POINTS_PER_PICKUP: u32 = 10;
    pub const UNLOCK_THRESHOLD: u32 = 100;

    /// Touch held at least this long counts as movement, shorter is a jump tap
    pub const LONG_PRESS_MS: u64 = 200;

    /// Hazard (bomb) spawn parameters
    pub const HAZARD_SPAWN_Y: f32 = 16.0;
    pub const HAZARD_BOUNCE: f32 = 1.0;
    pub const HAZARD_MAX_KICK: i32 = 200;
    pub const HAZARD_DRIFT_Y: f32 = 20.0;

    /// Delay between hazard contact and the game-over scene
    pub const GAME_OVER_DELAY_MS: u64 = 2000;
}
