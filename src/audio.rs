//! Audio cues
//!
//! The simulation only names the cue; a sink decides how (or whether) to
//! make a sound. The manager applies mute and volume from [`Settings`].

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundEffect {
    /// Run started from the ready screen
    Start,
    /// Flap impulse applied
    Flap,
    /// Obstacle passed
    Score,
    /// Actor struck an obstacle
    Hit,
    /// Actor came to rest on the ground
    Die,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Start => "start",
            SoundEffect::Flap => "flap",
            SoundEffect::Score => "score",
            SoundEffect::Hit => "hit",
            SoundEffect::Die => "die",
        }
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::Scored => Some(SoundEffect::Score),
            GameEvent::Hit => Some(SoundEffect::Hit),
            GameEvent::Died => Some(SoundEffect::Die),
            GameEvent::NamePromptRequested { .. } => None,
        }
    }
}

/// Something that can play a cue
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Collects cues for a host to pull (browser glue, tests)
#[derive(Debug, Clone, Default)]
pub struct CueBuffer {
    cues: Vec<(SoundEffect, f32)>,
}

impl CueBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered cue
    pub fn drain(&mut self) -> Vec<(SoundEffect, f32)> {
        std::mem::take(&mut self.cues)
    }

    pub fn effects(&self) -> Vec<SoundEffect> {
        self.cues.iter().map(|(e, _)| *e).collect()
    }
}

impl AudioSink for CueBuffer {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        self.cues.push((effect, volume));
    }
}

/// Writes cues to the log (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("cue {} @ {:.2}", effect.as_str(), volume);
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    volume: f32,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        Self {
            sink,
            volume: settings.effective_volume(),
        }
    }

    /// Pick up changed mute/volume preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.volume = settings.effective_volume();
    }

    /// Play a sound effect; silent when muted
    pub fn play(&mut self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        self.sink.play(effect, self.volume);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
