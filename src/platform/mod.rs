//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (fixed-rate clock over variable frame times)
//! - Input events (pointer and key codes mapped to intents)

pub mod clock;
pub mod input;

pub use clock::FixedClock;
pub use input::{Intent, IntentQueue, RawInput};
