//! Input mapping
//!
//! Pointer taps and the flap keys are the same logical trigger. UI buttons
//! (submit, restart, quit) arrive as their own intents. Everything goes
//! through one queue that the session drains at the start of each tick.

use serde::{Deserialize, Serialize};

/// Key codes that count as a tap: space, W, up arrow
pub const TAP_KEY_CODES: [u32; 3] = [32, 87, 38];

/// Raw host input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput {
    /// A click/touch began anywhere on the playfield
    PointerDown { x: f32, y: f32 },
    /// A key was pressed
    KeyDown { key_code: u32 },
}

/// A request to the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// Start, flap or restart depending on the phase
    Tap,
    /// Restart button on the name prompt
    Restart,
    /// Submit a name from the prompt
    Submit(String),
    /// Dismiss the prompt and stay on the game-over screen
    Quit,
}

impl Intent {
    /// Map raw input onto a tap, if it is one
    pub fn from_raw(input: &RawInput) -> Option<Self> {
        match input {
            RawInput::PointerDown { .. } => Some(Intent::Tap),
            RawInput::KeyDown { key_code } if TAP_KEY_CODES.contains(key_code) => {
                Some(Intent::Tap)
            }
            RawInput::KeyDown { .. } => None,
        }
    }
}

/// A queue of intents, written by event handlers and drained once per tick
#[derive(Debug, Clone, Default)]
pub struct IntentQueue {
    intents: Vec<Intent>,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self {
            intents: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Map and push raw input; returns false when it was ignored
    pub fn push_raw(&mut self, input: &RawInput) -> bool {
        match Intent::from_raw(input) {
            Some(intent) => {
                self.push(intent);
                true
            }
            None => false,
        }
    }

    /// Drain all pending intents in arrival order
    pub fn drain(&mut self) -> Vec<Intent> {
        std::mem::take(&mut self.intents)
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }
}
