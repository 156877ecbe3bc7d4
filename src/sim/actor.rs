//! Actor physics
//!
//! Vertical integration with gravity, flap impulses and a pitch derived from
//! velocity. Horizontal position never changes; the world scrolls instead.

use glam::Vec2;

use super::state::Actor;
use crate::deg_to_rad;
use crate::tuning::Tuning;

/// Maximum nose-up pitch (degrees)
pub const MAX_CLIMB_TILT: f32 = -25.0;
/// Maximum nose-down pitch (degrees)
pub const MAX_DIVE_TILT: f32 = 90.0;

impl Actor {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.actor_x, tuning.actor_start_y),
            velocity: 0.0,
            tilt: 0.0,
            frame: 0,
        }
    }

    /// Back to the start pose
    pub fn reset(&mut self, tuning: &Tuning) {
        *self = Self::new(tuning);
    }

    /// Apply an upward impulse. Only effective below the top of the field.
    ///
    /// Returns true when the impulse was applied.
    pub fn flap(&mut self, tuning: &Tuning) -> bool {
        if self.pos.y > 0.0 {
            self.velocity = -tuning.thrust;
            true
        } else {
            false
        }
    }

    /// Derive pitch from velocity.
    ///
    /// Climbing scales linearly to -25 degrees at full thrust; falling scales
    /// linearly to 90 degrees at twice the thrust. Both ends are capped.
    pub fn set_tilt(&mut self, thrust: f32) {
        if self.velocity <= 0.0 {
            self.tilt = MAX_CLIMB_TILT.max((MAX_CLIMB_TILT * self.velocity) / (-thrust));
        } else {
            self.tilt = MAX_DIVE_TILT.min((MAX_DIVE_TILT * self.velocity) / (thrust * 2.0));
        }
    }

    /// Idle hover on the ready screen: nudge by a sine sample every 10th tick
    pub fn bob(&mut self, frames: u64) {
        self.tilt = 0.0;
        if frames % 10 == 0 {
            self.pos.y += deg_to_rad(frames as f32).sin();
            self.frame = self.frame.wrapping_add(1);
        }
    }

    /// One integration step: move, re-pitch, then accumulate gravity
    pub fn integrate(&mut self, gravity: f32, thrust: f32) {
        self.pos.y += self.velocity;
        self.set_tilt(thrust);
        self.velocity += gravity;
    }

    /// Touching or below the ground line (ground-contact radius)
    pub fn is_grounded(&self, tuning: &Tuning) -> bool {
        self.pos.y + tuning.ground_radius() >= tuning.ground_y()
    }

    /// Settle on the ground: clamp position, stop, nose straight down
    pub fn land(&mut self, tuning: &Tuning) {
        self.velocity = 0.0;
        self.pos.y = tuning.ground_y() - tuning.ground_radius();
        self.tilt = MAX_DIVE_TILT;
    }

    /// Advance the animation frame on every `every`-th tick
    pub fn animate(&mut self, frames: u64, every: u64) {
        if frames % every == 0 {
            self.frame = self.frame.wrapping_add(1);
        }
    }

    /// Keep the frame index inside the animation strip
    pub fn wrap_frame(&mut self, frame_count: u8) {
        self.frame %= frame_count.max(1);
    }
}
