//! Game session
//!
//! Owns the simulation state, the leaderboard, the name prompt and the
//! deferred-task scheduler. Hosts push intents at any time; `step` drains them
//! exactly once per tick, then runs the simulation, then plays cues and fires
//! due deferred work. Nothing mutates the game from outside `step`.

pub mod scheduler;
pub mod snapshot;

use serde::Serialize;

use crate::audio::{AudioManager, AudioSink, SoundEffect};
use crate::highscores::Leaderboard;
use crate::persistence::KvStore;
use crate::platform::{FixedClock, Intent, IntentQueue, RawInput};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, apply_tap, tick};
use crate::tuning::Tuning;

pub use scheduler::{Deferred, Scheduler};
pub use snapshot::{ActorPose, ObstacleView, Snapshot};

/// The blocking name-entry prompt shown after a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamePrompt {
    /// Final score of the run being recorded
    pub score: u32,
    /// A name was accepted; further submits are ignored
    pub submitted: bool,
}

/// A complete single-player session
pub struct GameSession<S: KvStore, A: AudioSink> {
    state: GameState,
    intents: IntentQueue,
    scheduler: Scheduler,
    prompt: Option<NamePrompt>,
    leaderboard: Leaderboard,
    last_player: Option<String>,
    settings: Settings,
    audio: AudioManager<A>,
    store: S,
}

impl<S: KvStore, A: AudioSink> GameSession<S, A> {
    /// Start a session, loading leaderboard and settings from `store`
    pub fn new(seed: u64, tuning: Tuning, store: S, sink: A) -> Self {
        let leaderboard = Leaderboard::load(&store);
        let last_player = Leaderboard::load_last_player(&store);
        let settings = Settings::load(&store);
        log::info!("Session started with seed {}", seed);
        Self {
            state: GameState::new(seed, tuning),
            intents: IntentQueue::new(),
            scheduler: Scheduler::new(),
            prompt: None,
            leaderboard,
            last_player,
            audio: AudioManager::new(sink, &settings),
            settings,
            store,
        }
    }

    /// Queue an intent for the next tick
    pub fn push(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Queue raw host input; non-tap keys are ignored
    pub fn push_raw(&mut self, input: &RawInput) -> bool {
        self.intents.push_raw(input)
    }

    /// Run as many fixed ticks as `frame_dt` covers. Returns ticks run.
    pub fn run_frame(&mut self, clock: &mut FixedClock, frame_dt: f32) -> u32 {
        let steps = clock.advance(frame_dt);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// One tick: intents, simulation, cues, deferred work
    pub fn step(&mut self) {
        for intent in self.intents.drain() {
            self.apply_intent(intent);
        }

        tick(&mut self.state, &TickInput::default());

        for event in self.state.drain_events() {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }
            if let GameEvent::NamePromptRequested { score } = event {
                self.scheduler.schedule(
                    self.state.frames,
                    self.state.tuning.prompt_delay_ticks,
                    self.state.generation,
                    Deferred::ShowNamePrompt { score },
                );
            }
        }

        for task in self.scheduler.take_due(self.state.frames, self.state.generation) {
            match task {
                Deferred::ShowNamePrompt { score } => {
                    log::info!("Prompting for player name (score {})", score);
                    self.prompt = Some(NamePrompt {
                        score,
                        submitted: false,
                    });
                }
            }
        }
    }

    fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Tap => {
                let blocked = self.prompt.is_some();
                if blocked && self.state.phase == GamePhase::Over {
                    log::debug!("Tap ignored while the name prompt is open");
                }
                apply_tap(&mut self.state, blocked);
            }
            Intent::Restart => {
                if self.state.phase == GamePhase::Over {
                    self.prompt = None;
                    self.state.restart();
                }
            }
            Intent::Submit(name) => self.submit(&name),
            Intent::Quit => {
                if self.prompt.take().is_some() {
                    log::debug!("Name prompt dismissed");
                }
            }
        }
    }

    fn submit(&mut self, name: &str) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        let name = name.trim();
        if prompt.submitted || name.is_empty() {
            return;
        }

        Leaderboard::save_last_player(&mut self.store, name);
        self.last_player = Some(name.to_string());
        if self.leaderboard.add_score(name, prompt.score) {
            self.leaderboard.save(&mut self.store);
        }
        prompt.submitted = true;
        log::info!("Recorded score {} for {}", prompt.score, name);
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(
            &self.state,
            self.prompt.as_ref(),
            &self.leaderboard,
            self.last_player.as_deref(),
        )
    }

    /// Replace preferences, persist them and update the audio volume
    pub fn set_settings(&mut self, settings: Settings) {
        settings.save(&mut self.store);
        self.audio.apply_settings(&settings);
        self.settings = settings;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn prompt(&self) -> Option<&NamePrompt> {
        self.prompt.as_ref()
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn last_player(&self) -> Option<&str> {
        self.last_player.as_deref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn pending_deferred(&self) -> usize {
        self.scheduler.len()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager<A> {
        &mut self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueBuffer;
    use crate::persistence::MemoryStore;
    use crate::sim::Obstacle;

    type TestSession = GameSession<MemoryStore, CueBuffer>;

    fn session() -> TestSession {
        GameSession::new(42, Tuning::default(), MemoryStore::new(), CueBuffer::new())
    }

    fn steps(s: &mut TestSession, n: usize) {
        for _ in 0..n {
            s.step();
        }
    }

    /// Start a run and let the actor drop to the ground
    fn crash(s: &mut TestSession) {
        s.push(Intent::Tap);
        for _ in 0..300 {
            s.step();
            if s.state().phase == GamePhase::Over {
                return;
            }
        }
        panic!("run never ended");
    }

    /// Crash, land and wait for the prompt to open
    fn crash_and_prompt(s: &mut TestSession) {
        crash(s);
        for _ in 0..200 {
            s.step();
            if s.prompt().is_some() {
                return;
            }
        }
        panic!("prompt never opened");
    }

    fn cues(s: &mut TestSession) -> Vec<SoundEffect> {
        s.audio_mut().sink_mut().drain().into_iter().map(|(e, _)| e).collect()
    }

    #[test]
    fn test_cues_follow_the_run() {
        let mut s = session();
        crash(&mut s);
        steps(&mut s, 50);
        let played = cues(&mut s);
        assert_eq!(played.first(), Some(&SoundEffect::Start));
        assert_eq!(played.iter().filter(|e| **e == SoundEffect::Die).count(), 1);
        assert!(!played.contains(&SoundEffect::Hit));
    }

    #[test]
    fn test_prompt_opens_after_delay() {
        let mut s = session();
        crash(&mut s);
        // Land
        let mut landed_at = None;
        for _ in 0..100 {
            s.step();
            if s.state().death_cue_played {
                landed_at = Some(s.state().frames);
                break;
            }
        }
        let landed_at = landed_at.expect("never landed");
        assert!(s.prompt().is_none());

        while s.state().frames < landed_at + 24 {
            s.step();
            assert!(s.prompt().is_none());
        }
        s.step();
        assert_eq!(
            s.prompt(),
            Some(&NamePrompt {
                score: 0,
                submitted: false
            })
        );
    }

    #[test]
    fn test_tap_is_blocked_while_prompt_open() {
        let mut s = session();
        crash_and_prompt(&mut s);
        let before = s.snapshot();

        s.push(Intent::Tap);
        s.step();

        let after = s.snapshot();
        assert_eq!(after.phase, GamePhase::Over);
        assert_eq!(after.actor, before.actor);
        assert_eq!(after.obstacles, before.obstacles);
        assert_eq!(s.state().generation, 0);
    }

    #[test]
    fn test_quit_then_tap_restarts() {
        let mut s = session();
        crash_and_prompt(&mut s);
        s.push(Intent::Quit);
        s.step();
        assert!(s.prompt().is_none());
        assert_eq!(s.state().phase, GamePhase::Over);

        s.push(Intent::Tap);
        s.step();
        assert_eq!(s.state().phase, GamePhase::Ready);
        assert_eq!(s.state().score, 0);
    }

    #[test]
    fn test_submit_records_and_keeps_prompt_open() {
        let mut s = session();
        crash_and_prompt(&mut s);

        s.push(Intent::Submit("   ".into()));
        s.step();
        assert!(s.leaderboard().is_empty());
        assert!(!s.prompt().unwrap().submitted);

        s.push(Intent::Submit("  Ann ".into()));
        s.push(Intent::Submit("Bob".into()));
        s.step();

        assert!(s.prompt().unwrap().submitted);
        assert_eq!(s.leaderboard().entries.len(), 1);
        assert_eq!(s.leaderboard().entries[0].name, "Ann");
        assert_eq!(s.last_player(), Some("Ann"));
        assert_eq!(
            s.store().get(Leaderboard::LAST_PLAYER_KEY).unwrap().as_deref(),
            Some("Ann")
        );

        let rows = s.snapshot().leaderboard;
        assert_eq!(rows.len(), 1);
        assert!(rows[0].highlighted);
    }

    #[test]
    fn test_restart_button_closes_prompt() {
        let mut s = session();
        crash_and_prompt(&mut s);
        s.push(Intent::Restart);
        s.step();
        assert!(s.prompt().is_none());
        assert_eq!(s.state().phase, GamePhase::Ready);
        assert!(s.state().field.is_empty());
        assert_eq!(s.state().actor.velocity, 0.0);
    }

    #[test]
    fn test_restart_before_delay_cancels_prompt() {
        let mut s = session();
        crash(&mut s);
        while !s.state().death_cue_played {
            s.step();
        }
        assert_eq!(s.pending_deferred(), 1);

        // Prompt not open yet, so the tap restarts
        s.push(Intent::Tap);
        steps(&mut s, 100);
        assert_eq!(s.state().phase, GamePhase::Ready);
        assert!(s.prompt().is_none());
        assert_eq!(s.pending_deferred(), 0);
    }

    #[test]
    fn test_restart_ignored_outside_over() {
        let mut s = session();
        s.push(Intent::Restart);
        s.step();
        assert_eq!(s.state().phase, GamePhase::Ready);
        assert_eq!(s.state().generation, 0);
    }

    #[test]
    fn test_intents_applied_in_order_within_one_tick() {
        let mut s = session();
        crash(&mut s);
        // Tap restarts, second tap starts the next run
        s.push(Intent::Tap);
        s.push(Intent::Tap);
        s.step();
        assert_eq!(s.state().phase, GamePhase::Playing);
        assert_eq!(s.state().generation, 1);
    }

    #[test]
    fn test_scoring_through_session() {
        let mut s = session();
        s.push(Intent::Tap);
        s.step();
        cues(&mut s);

        // Replace whatever spawned with one obstacle just behind the actor
        let mut state = s.state().clone();
        state.field.clear();
        state.field.push(Obstacle::new(-20.0, -250.0));
        state.actor.pos.y = 190.0;
        state.actor.velocity = 0.0;
        s.state = state;

        s.step();
        assert_eq!(s.state().score, 1);
        assert_eq!(cues(&mut s), vec![SoundEffect::Score]);

        s.step();
        assert_eq!(s.state().score, 1);
    }

    #[test]
    fn test_leaderboard_loaded_from_store() {
        let mut store = MemoryStore::new();
        store
            .set(Leaderboard::STORAGE_KEY, r#"[{"name":"Zed","score":9}]"#)
            .unwrap();
        store.set(Leaderboard::LAST_PLAYER_KEY, "zed").unwrap();
        let s = GameSession::new(1, Tuning::default(), store, CueBuffer::new());
        let snap = s.snapshot();
        assert_eq!(snap.best, Some(9));
        assert!(snap.leaderboard[0].highlighted);
    }

    #[test]
    fn test_muted_settings_silence_cues() {
        let mut s = session();
        s.set_settings(Settings {
            muted: true,
            ..Default::default()
        });
        s.push(Intent::Tap);
        s.step();
        assert!(cues(&mut s).is_empty());
        assert!(s.store().get("flappy_settings").unwrap().is_some());
    }

    #[test]
    fn test_run_frame_uses_clock() {
        let mut s = session();
        let mut clock = FixedClock::new(1.0 / 64.0);
        let ran = s.run_frame(&mut clock, 0.05);
        assert_eq!(ran, 3);
        assert_eq!(s.state().frames, 3);
    }
}
