//! Player preferences
//!
//! Persisted separately from the leaderboard in the same key-value store.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, KvStore};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence every cue
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "flappy_settings";

    /// Volume a cue should play at after mute and both sliders
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load(store: &dyn KvStore) -> Self {
        let settings = persistence::load_or_default(store, Self::STORAGE_KEY);
        log::debug!("Settings: {:?}", settings);
        settings
    }

    /// Save settings; failures are logged and ignored
    pub fn save(&self, store: &mut dyn KvStore) {
        if persistence::save_or_log(store, Self::STORAGE_KEY, self) {
            log::info!("Settings saved");
        }
    }
}
