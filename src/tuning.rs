//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be re-tuned from JSON
//! without touching the simulation. Missing fields fall back to the defaults
//! in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Actor ===
    /// Fixed horizontal position of the actor
    pub actor_x: f32,
    /// Vertical position on (re)start
    pub actor_start_y: f32,
    /// Nominal width used for collision radii (not the sprite size)
    pub actor_width: f32,
    /// Nominal height used for collision radii
    pub actor_height: f32,
    /// Velocity added per tick while playing (doubled while falling dead)
    pub gravity: f32,
    /// Upward speed set by a flap
    pub thrust: f32,
    pub animation_frames: u8,

    // === Obstacles ===
    pub scroll_speed: f32,
    pub spawn_interval_ticks: u64,
    pub gap_height: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub gap_top_base: f32,
    pub gap_bias_cap: f32,

    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    pub ground_height: f32,
    pub ground_tile_width: f32,

    // === Flow ===
    /// Delay between landing and the name prompt
    pub prompt_delay_ticks: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            actor_x: ACTOR_X,
            actor_start_y: ACTOR_START_Y,
            actor_width: ACTOR_WIDTH,
            actor_height: ACTOR_HEIGHT,
            gravity: GRAVITY,
            thrust: THRUST,
            animation_frames: ANIMATION_FRAMES,

            scroll_speed: SCROLL_SPEED,
            spawn_interval_ticks: SPAWN_INTERVAL_TICKS,
            gap_height: GAP_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            gap_top_base: GAP_TOP_BASE,
            gap_bias_cap: GAP_BIAS_CAP,

            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            ground_tile_width: GROUND_TILE_WIDTH,

            prompt_delay_ticks: PROMPT_DELAY_TICKS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from a JSON file, falling back to defaults on any error
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would break the tick loop
    pub(crate) fn sanitized(mut self) -> Self {
        self.spawn_interval_ticks = self.spawn_interval_ticks.max(1);
        self.animation_frames = self.animation_frames.max(1);
        self.ground_tile_width = self.ground_tile_width.max(1.0);
        self.thrust = self.thrust.abs().max(f32::EPSILON);
        self
    }

    /// Y coordinate of the ground line
    pub fn ground_y(&self) -> f32 {
        self.field_height - self.ground_height
    }

    /// Radius used for ground contact: average of width and height, halved
    pub fn ground_radius(&self) -> f32 {
        (self.actor_width + self.actor_height) / 4.0
    }

    /// Radius used for obstacle hits: larger of width and height, halved
    pub fn obstacle_radius(&self) -> f32 {
        self.actor_width.max(self.actor_height) / 2.0
    }
}
