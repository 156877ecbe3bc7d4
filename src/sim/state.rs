//! Game state and core simulation types
//!
//! One `GameState` holds everything the tick loop mutates. It is owned by the
//! session and passed by reference; there is no global state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacles::ObstacleField;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Idle bobbing, waiting for the first tap
    #[default]
    Ready,
    /// Active gameplay
    Playing,
    /// Crashed; falling to the ground or lying on it
    Over,
}

/// Things that happened during a tick, drained by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ready -> Playing
    Started,
    /// A flap impulse was applied
    Flapped,
    /// The head obstacle was passed
    Scored,
    /// The actor hit an obstacle
    Hit,
    /// The actor reached the ground after the run ended
    Died,
    /// Ask the UI for a player name once the landing delay elapses
    NamePromptRequested { score: u32 },
}

/// The controlled character
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Center position (x is fixed for the whole run)
    pub pos: Vec2,
    /// Vertical velocity, positive is downward
    pub velocity: f32,
    /// Pitch in degrees, negative is nose-up
    pub tilt: f32,
    /// Animation frame index
    pub frame: u8,
}

/// A top/bottom obstacle pair separated by a fixed gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// x = left edge, y = top edge of the upper obstacle (gap-top offset)
    pub pos: Vec2,
}

impl Obstacle {
    pub fn new(x: f32, gap_top_offset: f32) -> Self {
        Self {
            pos: Vec2::new(x, gap_top_offset),
        }
    }

    /// Right edge of the obstacle
    pub fn right(&self, tuning: &Tuning) -> f32 {
        self.pos.x + tuning.obstacle_width
    }

    /// Bottom edge of the upper obstacle
    pub fn gap_top(&self, tuning: &Tuning) -> f32 {
        self.pos.y + tuning.obstacle_height
    }

    /// Top edge of the lower obstacle
    pub fn gap_bottom(&self, tuning: &Tuning) -> f32 {
        self.gap_top(tuning) + tuning.gap_height
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Obstacle placement RNG
    pub rng: Pcg32,
    /// Balance values for this session
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// The player character
    pub actor: Actor,
    /// Scrolling obstacles, oldest first
    pub field: ObstacleField,
    /// Obstacles passed this run
    pub score: u32,
    /// Tick counter; never reset on restart
    pub frames: u64,
    /// Ground scroll offset in (-tile_width, 0]
    pub ground_offset: f32,
    /// Tap hint animation frame
    pub hint_frame: u8,
    /// Die cue already fired for this run
    pub death_cue_played: bool,
    /// Name prompt already requested for this run
    pub name_prompted: bool,
    /// Bumped on every restart so deferred work can detect a stale run
    pub generation: u64,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            actor: Actor::new(&tuning),
            tuning,
            phase: GamePhase::Ready,
            field: ObstacleField::new(),
            score: 0,
            frames: 0,
            ground_offset: 0.0,
            hint_frame: 0,
            death_cue_played: false,
            name_prompted: false,
            generation: 0,
            events: Vec::new(),
        }
    }

    /// Over -> Ready: reset the actor, the field, the score and the one-shot flags
    pub fn restart(&mut self) {
        self.phase = GamePhase::Ready;
        self.actor.reset(&self.tuning);
        self.field.clear();
        self.score = 0;
        self.death_cue_played = false;
        self.name_prompted = false;
        self.generation += 1;
        log::info!("Restarted (generation {})", self.generation);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obstacle_gap_bounds() {
        let t = Tuning::default();
        let o = Obstacle::new(100.0, -300.0);
        assert_eq!(o.right(&t), 152.0);
        assert_eq!(o.gap_top(&t), 100.0);
        assert_eq!(o.gap_bottom(&t), 185.0);
    }

    #[test]
    fn test_restart_resets_run_but_not_frames() {
        let mut state = GameState::new(7, Tuning::default());
        state.phase = GamePhase::Over;
        state.score = 12;
        state.frames = 345;
        state.actor.pos.y = 287.5;
        state.actor.velocity = 4.0;
        state.actor.tilt = 90.0;
        state.death_cue_played = true;
        state.name_prompted = true;
        state.field.push(Obstacle::new(10.0, -250.0));

        state.restart();

        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.score, 0);
        assert_eq!(state.frames, 345);
        assert_eq!(state.actor.pos.y, 100.0);
        assert_eq!(state.actor.velocity, 0.0);
        assert!(state.field.is_empty());
        assert!(state.field.moved());
        assert!(!state.death_cue_played);
        assert!(!state.name_prompted);
        assert_eq!(state.generation, 1);
    }
}
