//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (oldest obstacle first)
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod collision;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, check_obstacles};
pub use obstacles::ObstacleField;
pub use state::{Actor, GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{TickInput, apply_tap, tick};
