//! Browser bindings
//!
//! The page owns the canvas, the sprites and the audio elements. It forwards
//! taps, keys and prompt buttons here, calls `frame` from
//! `requestAnimationFrame`, then draws whatever `snapshot_json` describes and
//! plays whatever `take_cues` returns.

use wasm_bindgen::prelude::*;

use crate::audio::CueBuffer;
use crate::persistence::{KvStore, LocalStorageStore, MemoryStore};
use crate::platform::{FixedClock, Intent, RawInput};
use crate::session::GameSession;
use crate::settings::Settings;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already set: {e}").into());
    }
    log::info!("Flappy Arcade starting...");
}

fn open_store() -> Box<dyn KvStore> {
    match LocalStorageStore::open() {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{}; scores will not persist", e);
            Box::new(MemoryStore::new())
        }
    }
}

/// One game bound to the page
#[wasm_bindgen]
pub struct WebGame {
    session: GameSession<Box<dyn KvStore>, CueBuffer>,
    clock: FixedClock,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let seed = js_sys::Date::now() as u64;
        log::info!("Game initialized with seed: {}", seed);
        WebGame {
            session: GameSession::new(seed, Tuning::default(), open_store(), CueBuffer::new()),
            clock: FixedClock::default(),
        }
    }

    /// Click or touch on the playfield
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.session.push_raw(&RawInput::PointerDown { x, y });
    }

    /// Key press; returns true when the key was consumed as a tap
    pub fn key_down(&mut self, key_code: u32) -> bool {
        self.session.push_raw(&RawInput::KeyDown { key_code })
    }

    pub fn restart(&mut self) {
        self.session.push(Intent::Restart);
    }

    pub fn submit(&mut self, name: String) {
        self.session.push(Intent::Submit(name));
    }

    pub fn quit(&mut self) {
        self.session.push(Intent::Quit);
    }

    pub fn set_muted(&mut self, muted: bool) {
        let settings = Settings {
            muted,
            ..self.session.settings().clone()
        };
        self.session.set_settings(settings);
    }

    /// Advance by the elapsed frame time in seconds. Returns ticks run.
    pub fn frame(&mut self, dt: f32) -> u32 {
        self.session.run_frame(&mut self.clock, dt)
    }

    pub fn snapshot_json(&self) -> String {
        self.session.snapshot().to_json()
    }

    /// Cues produced since the last call, as `[name, volume]` pairs
    pub fn take_cues(&mut self) -> js_sys::Array {
        self.session
            .audio_mut()
            .sink_mut()
            .drain()
            .into_iter()
            .map(|(effect, volume)| {
                let pair = js_sys::Array::new();
                pair.push(&JsValue::from_str(effect.as_str()));
                pair.push(&JsValue::from_f64(volume as f64));
                JsValue::from(pair)
            })
            .collect()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}
