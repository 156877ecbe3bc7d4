//! Read-only view of a session for the render layer

use serde::Serialize;

use crate::highscores::{DISPLAY_ROWS, Leaderboard, LeaderboardRow};
use crate::sim::{GamePhase, GameState};

use super::NamePrompt;

/// Actor pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActorPose {
    pub x: f32,
    pub y: f32,
    /// Pitch in degrees
    pub tilt: f32,
    pub frame: u8,
}

/// One obstacle pair in field coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub x: f32,
    pub width: f32,
    /// Top edge of the upper column (usually off-screen)
    pub top: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub frames: u64,
    pub actor: ActorPose,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub best: Option<u32>,
    pub ground_offset: f32,
    pub ground_y: f32,
    pub hint_frame: u8,
    pub prompt: Option<NamePrompt>,
    /// Top rows with the last submitter highlighted
    pub leaderboard: Vec<LeaderboardRow>,
}

impl Snapshot {
    pub fn capture(
        state: &GameState,
        prompt: Option<&NamePrompt>,
        leaderboard: &Leaderboard,
        last_player: Option<&str>,
    ) -> Self {
        let t = &state.tuning;
        Self {
            phase: state.phase,
            frames: state.frames,
            actor: ActorPose {
                x: state.actor.pos.x,
                y: state.actor.pos.y,
                tilt: state.actor.tilt,
                frame: state.actor.frame,
            },
            obstacles: state
                .field
                .iter()
                .map(|o| ObstacleView {
                    x: o.pos.x,
                    width: t.obstacle_width,
                    top: o.pos.y,
                    gap_top: o.gap_top(t),
                    gap_bottom: o.gap_bottom(t),
                })
                .collect(),
            score: state.score,
            best: leaderboard.top_score(),
            ground_offset: state.ground_offset,
            ground_y: t.ground_y(),
            hint_frame: state.hint_frame,
            prompt: prompt.cloned(),
            leaderboard: leaderboard.top(DISPLAY_ROWS, last_player),
        }
    }

    /// JSON form for hosts on the other side of an FFI boundary
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("Snapshot encoding failed: {}", e);
            String::from("{}")
        })
    }
}
