//! Flappy Arcade entry point
//!
//! The browser build is driven from JavaScript through `flappy_arcade::web`.
//! The native binary runs headless: an autopilot plays a few rounds against
//! the real session, enters a name on each prompt and prints the leaderboard.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use flappy_arcade::audio::LogSink;
    use flappy_arcade::persistence::{FileStore, KvStore, MemoryStore};
    use flappy_arcade::platform::Intent;
    use flappy_arcade::sim::{GamePhase, GameState};
    use flappy_arcade::{GameSession, Tuning};

    /// Give up on a round that never ends
    const MAX_TICKS_PER_ROUND: u64 = 50 * 60 * 5;

    /// Aim this far above the lower lip of the next gap
    const AIM_ABOVE_FLOOR: f32 = 28.0;

    struct Config {
        rounds: u32,
        player: String,
        seed: u64,
        data_dir: String,
        tuning: Tuning,
    }

    impl Config {
        fn from_env() -> Self {
            let var = |k: &str| std::env::var(k).ok().filter(|v| !v.trim().is_empty());
            let tuning = match var("FLAPPY_TUNING") {
                Some(path) => Tuning::load_file(Path::new(&path)),
                None => Tuning::default(),
            };
            Self {
                rounds: var("FLAPPY_ROUNDS").and_then(|v| v.parse().ok()).unwrap_or(3),
                player: var("FLAPPY_PLAYER").unwrap_or_else(|| "Autopilot".to_string()),
                seed: var("FLAPPY_SEED").and_then(|v| v.parse().ok()).unwrap_or_else(clock_seed),
                data_dir: var("FLAPPY_DATA_DIR").unwrap_or_else(|| ".flappy".to_string()),
                tuning,
            }
        }
    }

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    fn open_store(dir: &str) -> Box<dyn KvStore> {
        match FileStore::open(dir) {
            Ok(store) => {
                log::info!("Scores stored in {}", store.dir().display());
                Box::new(store)
            }
            Err(e) => {
                log::warn!("{}; scores will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    /// Flap when falling below the aim point for the next gap
    fn wants_flap(state: &GameState) -> bool {
        let t = &state.tuning;
        let actor = &state.actor;
        let aim = state
            .field
            .iter()
            .find(|o| o.right(t) + t.obstacle_radius() >= actor.pos.x)
            .map(|o| o.gap_bottom(t) - AIM_ABOVE_FLOOR)
            .unwrap_or(t.ground_y() * 0.5);
        actor.velocity >= 0.0 && actor.pos.y > aim
    }

    pub fn run() {
        let config = Config::from_env();
        log::info!("Flappy Arcade (headless) starting with seed {}", config.seed);

        let mut session = GameSession::new(
            config.seed,
            config.tuning,
            open_store(&config.data_dir),
            LogSink,
        );

        for round in 1..=config.rounds {
            let start = session.state().frames;
            session.push(Intent::Tap);

            loop {
                let state = session.state();
                if state.phase == GamePhase::Playing && wants_flap(state) {
                    session.push(Intent::Tap);
                }
                session.step();

                if let Some(prompt) = session.prompt() {
                    println!("Round {}: score {}", round, prompt.score);
                    session.push(Intent::Submit(config.player.clone()));
                    session.push(Intent::Restart);
                    session.step();
                    break;
                }
                if session.state().frames - start > MAX_TICKS_PER_ROUND {
                    log::warn!("Round {} hit the tick limit; abandoning", round);
                    return;
                }
            }
        }

        println!("\nLeaderboard");
        for row in session.snapshot().leaderboard {
            let marker = if row.highlighted { "*" } else { " " };
            println!("{}{:>2}. {:<16} {:>4}", marker, row.rank, row.name, row.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is flappy_arcade::web::start, this is just to satisfy the compiler
}
