//! Scrolling obstacle queue
//!
//! Obstacles spawn at the right edge on a fixed tick cadence, all move left
//! at the same speed, and leave from the front of the queue. Spawn order is
//! therefore also left-to-right order.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;
use crate::tuning::Tuning;

/// Ordered obstacles plus the "moved" flag consumed by scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: VecDeque<Obstacle>,
    /// Set whenever the head obstacle is dequeued; cleared when a score lands
    moved: bool,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            obstacles: VecDeque::new(),
            moved: true,
        }
    }

    /// Gap-top offset for a uniform sample `u` in [0, 1).
    ///
    /// `base * min(u + 1, cap)`: with the defaults this is -210 * [1.0, 1.8],
    /// and every u >= 0.8 collapses onto the cap, so the highest placement is
    /// four times as likely as any other.
    pub fn gap_offset(tuning: &Tuning, u: f32) -> f32 {
        tuning.gap_top_base * (u + 1.0).min(tuning.gap_bias_cap)
    }

    /// Append a new obstacle at the right edge of the field
    pub fn spawn<R: Rng + ?Sized>(&mut self, tuning: &Tuning, rng: &mut R) {
        let u: f32 = rng.random();
        let obstacle = Obstacle::new(tuning.field_width, Self::gap_offset(tuning, u));
        log::trace!("Spawned obstacle with gap top {}", obstacle.gap_top(tuning));
        self.obstacles.push_back(obstacle);
    }

    /// Append an already-built obstacle
    pub fn push(&mut self, obstacle: Obstacle) {
        self.obstacles.push_back(obstacle);
    }

    /// Shift everything left; drop the head once it is fully off-screen
    pub fn advance(&mut self, tuning: &Tuning) {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.pos.x -= tuning.scroll_speed;
        }

        let head_gone = self
            .obstacles
            .front()
            .is_some_and(|head| head.pos.x < -tuning.obstacle_width);
        if head_gone {
            self.obstacles.pop_front();
            self.moved = true;
        }
    }

    /// Empty the field and re-arm scoring
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.moved = true;
    }

    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Consume the moved flag after a score
    pub fn clear_moved(&mut self) {
        self.moved = false;
    }

    /// Oldest (leftmost) obstacle
    pub fn head(&self) -> Option<&Obstacle> {
        self.obstacles.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}
