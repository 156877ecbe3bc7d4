//! Fixed-rate clock
//!
//! Hosts hand in variable frame times; the clock answers how many fixed
//! simulation ticks to run so the game always advances at ~50 Hz.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Smallest accepted tick length (1 kHz)
const MIN_DT: f32 = 0.001;

/// Fixed timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedClock {
    /// The fixed delta time per tick
    dt: f32,
    /// Accumulated time from variable frame deltas
    accumulator: f32,
    max_steps: u32,
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedClock {
    /// Clock ticking every `dt` seconds; non-positive or NaN `dt` is raised to `MIN_DT`
    pub fn new(dt: f32) -> Self {
        Self {
            dt: dt.max(MIN_DT),
            accumulator: 0.0,
            max_steps: MAX_SUBSTEPS,
        }
    }

    /// Add frame time. Returns the number of fixed ticks to run.
    ///
    /// Frame deltas are capped at 0.1 s and at most `MAX_SUBSTEPS` ticks are
    /// returned; leftover backlog past that is dropped.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, 0.1);
        let mut steps = 0;
        while self.accumulator >= self.dt && steps < self.max_steps {
            self.accumulator -= self.dt;
            steps += 1;
        }
        if steps == self.max_steps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0)
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.dt).clamp(0.0, 1.0)
    }
}
