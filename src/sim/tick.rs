//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::check_obstacles;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Tap/flap trigger (pointer or flap key)
    pub tap: bool,
    /// A blocking prompt is open; taps while Over do nothing
    pub restart_blocked: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.tap {
        apply_tap(state, input.restart_blocked);
    }

    step_actor(state);
    scroll_ground(state);

    if state.phase == GamePhase::Playing {
        if state.frames % state.tuning.spawn_interval_ticks == 0 {
            state.field.spawn(&state.tuning, &mut state.rng);
        }
        state.field.advance(&state.tuning);
    }

    if state.phase != GamePhase::Playing && state.frames % 10 == 0 {
        state.hint_frame = (state.hint_frame + 1) % crate::consts::HINT_FRAMES;
    }

    state.frames += 1;
}

/// Interpret one tap according to the current phase
pub fn apply_tap(state: &mut GameState, restart_blocked: bool) {
    match state.phase {
        GamePhase::Ready => {
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::Started);
            log::debug!("Run started at frame {}", state.frames);
        }
        GamePhase::Playing => {
            if state.actor.flap(&state.tuning) {
                state.events.push(GameEvent::Flapped);
            }
        }
        GamePhase::Over => {
            if !restart_blocked {
                state.restart();
            }
        }
    }
}

fn step_actor(state: &mut GameState) {
    let tuning = &state.tuning;
    let actor = &mut state.actor;

    match state.phase {
        GamePhase::Ready => {
            actor.bob(state.frames);
        }

        GamePhase::Playing => {
            actor.animate(state.frames, 5);
            actor.integrate(tuning.gravity, tuning.thrust);

            // Ground contact short-circuits the obstacle scan
            let crashed = actor.is_grounded(tuning) || {
                let result = check_obstacles(actor.pos, &mut state.field, tuning);
                if result.scored {
                    state.score += 1;
                    state.events.push(GameEvent::Scored);
                }
                if result.hit {
                    state.events.push(GameEvent::Hit);
                }
                result.hit
            };

            if crashed {
                state.phase = GamePhase::Over;
                log::info!("Run over with score {}", state.score);
            }
        }

        GamePhase::Over => {
            actor.frame = 1;
            if !actor.is_grounded(tuning) {
                actor.integrate(tuning.gravity * 2.0, tuning.thrust);
            } else {
                actor.land(tuning);
                if !state.death_cue_played {
                    state.death_cue_played = true;
                    state.events.push(GameEvent::Died);
                    if !state.name_prompted {
                        state.name_prompted = true;
                        state.events.push(GameEvent::NamePromptRequested { score: state.score });
                    }
                }
            }
        }
    }

    actor.wrap_frame(tuning.animation_frames);
}

fn scroll_ground(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let tile = state.tuning.ground_tile_width;
    state.ground_offset -= state.tuning.scroll_speed;
    if state.ground_offset <= -tile {
        state.ground_offset += tile;
    }
}
