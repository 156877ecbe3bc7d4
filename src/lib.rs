//! Flappy Arcade - a gravity-driven gate runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, obstacles, collisions, phases)
//! - `session`: Owned game session (intent queue, deferred prompt, leaderboard)
//! - `platform`: Fixed-rate clock and input mapping
//! - `persistence`: Key-value storage backends with fail-soft JSON helpers
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::{Leaderboard, LeaderboardEntry, LeaderboardRow};
pub use session::{GameSession, Snapshot};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (276x414 field coordinate space)
pub mod consts {
    /// Fixed simulation timestep (50 Hz, one tick every 20 ms)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 276.0;
    pub const FIELD_HEIGHT: f32 = 414.0;
    /// Height of the ground strip; the ground line sits at FIELD_HEIGHT - GROUND_HEIGHT
    pub const GROUND_HEIGHT: f32 = 112.0;
    /// Width of one ground tile (scroll wraps at this distance)
    pub const GROUND_TILE_WIDTH: f32 = 336.0;

    /// Actor defaults
    pub const ACTOR_X: f32 = 50.0;
    pub const ACTOR_START_Y: f32 = 100.0;
    pub const ACTOR_WIDTH: f32 = 24.0;
    pub const ACTOR_HEIGHT: f32 = 34.0;
    pub const GRAVITY: f32 = 0.125;
    pub const THRUST: f32 = 2.5;
    pub const ANIMATION_FRAMES: u8 = 4;

    /// Obstacle defaults
    pub const SCROLL_SPEED: f32 = 2.0;
    pub const SPAWN_INTERVAL_TICKS: u64 = 100;
    pub const GAP_HEIGHT: f32 = 85.0;
    pub const OBSTACLE_WIDTH: f32 = 52.0;
    pub const OBSTACLE_HEIGHT: f32 = 400.0;
    /// Gap-top offset is GAP_TOP_BASE * min(u + 1, GAP_BIAS_CAP), u uniform in [0, 1)
    pub const GAP_TOP_BASE: f32 = -210.0;
    pub const GAP_BIAS_CAP: f32 = 1.8;

    /// Ticks between landing and the name prompt (500 ms)
    pub const PROMPT_DELAY_TICKS: u64 = 25;
    /// Tap hint animation frames
    pub const HINT_FRAMES: u8 = 2;
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}
