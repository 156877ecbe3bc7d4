//! Collision detection and pass-through scoring
//!
//! The actor is treated as a square of half-size `obstacle_radius` against
//! axis-aligned obstacle columns. Scoring piggybacks on the same scan and only
//! looks at the head obstacle.

use glam::Vec2;

use super::obstacles::ObstacleField;
use crate::tuning::Tuning;

/// Result of scanning the obstacle field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionResult {
    /// The actor overlaps a solid part of some obstacle
    pub hit: bool,
    /// The head obstacle was passed and the score should go up by one
    pub scored: bool,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self::default()
    }
}

/// Check the actor at `pos` against every obstacle, oldest first.
///
/// The first obstacle found overlapping stops the scan with a hit, so no
/// score is registered for it or anything behind it. The head obstacle
/// scores when the actor's left edge is past its right edge and the field's
/// `moved` flag is armed; scoring consumes the flag.
pub fn check_obstacles(pos: Vec2, field: &mut ObstacleField, tuning: &Tuning) -> CollisionResult {
    let mut result = CollisionResult::miss();
    if field.is_empty() {
        return result;
    }

    let r = tuning.obstacle_radius();
    let mut score_head = false;

    for (i, obstacle) in field.iter().enumerate() {
        let left = obstacle.pos.x;
        let right = obstacle.right(tuning);

        if pos.x + r >= left && pos.x - r <= right {
            let roof = obstacle.gap_top(tuning);
            let floor = obstacle.gap_bottom(tuning);
            if pos.y - r <= roof || pos.y + r >= floor {
                result.hit = true;
                break;
            }
        }

        if i == 0 && pos.x - r > right && field.moved() {
            score_head = true;
        }
    }

    if score_head {
        field.clear_moved();
        result.scored = true;
    }

    result
}
