//! Per-frame simulation tick
//!
//! Single entry point the host driver calls once per display frame:
//! command handling, then (while running) spawn-check, move, resolve,
//! speed ramp, in that fixed order. Everything is synchronous; a pause or
//! reset takes effect before any state mutation in the same call.
//!
//! The tick is one discrete step: movement is per-tick, not per-elapsed-
//! millisecond. Only the spawner consumes wall-clock time.

use super::collision::resolve;
use super::spawn::accrue_and_spawn;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick
///
/// Direction flags are held-key state sampled once per tick, so pressing
/// both directions resolves the same way every tick (left wins). The rest
/// are one-shot commands the host clears after the tick consumes them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left arrow held
    pub move_left: bool,
    /// Right arrow held
    pub move_right: bool,
    /// Begin a run (from idle; pair with `reset` to replay after game over)
    pub start: bool,
    /// Toggle pause while running/paused
    pub pause: bool,
    /// Abandon the session and return to idle
    pub reset: bool,
}

/// Advance the session by one tick.
///
/// `dt_ms` is the wall-clock time since the previous call; it feeds only
/// the spawn cadence. Returns the outcome events of this tick for the
/// feedback collaborator.
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) -> Vec<GameEvent> {
    // Commands first, so a pause or reset halts this very tick
    if input.reset {
        state.reset();
    }
    if input.start {
        state.start();
    }
    if input.pause {
        match state.phase {
            GamePhase::Running => state.pause(),
            GamePhase::Paused => state.resume(),
            _ => {}
        }
    }

    // Nothing moves, spawns, or resolves outside Running
    if state.phase != GamePhase::Running {
        return Vec::new();
    }

    state.time_ticks += 1;

    // Sample held directions; left checked before right
    if input.move_left {
        state.player.move_left();
    } else if input.move_right {
        state.player.move_right();
    }

    accrue_and_spawn(state, dt_ms);
    advance_items(state);

    let mut events = Vec::new();
    resolve(state, &mut events);
    apply_speed_ramp(state);

    state.normalize_order();
    events
}

/// Mover: every live item falls by the shared speed; y never decreases
fn advance_items(state: &mut GameState) {
    let speed = state.fall_speed;
    for item in state.items.iter_mut() {
        item.pos.y += speed;
    }
}

/// Bump the shared fall speed the first tick the score sits on a new
/// multiple of `SPEED_SCORE_INTERVAL`. The `last_speed_bump_score` marker
/// keeps the bump from re-firing while the score stays on that multiple.
fn apply_speed_ramp(state: &mut GameState) {
    if state.score > 0
        && state.score % SPEED_SCORE_INTERVAL == 0
        && state.score != state.last_speed_bump_score
        && state.fall_speed < MAX_FALL_SPEED
    {
        state.fall_speed = (state.fall_speed + SPEED_STEP).min(MAX_FALL_SPEED);
        state.last_speed_bump_score = state.score;
        log::debug!(
            "Fall speed ramped to {:.1} at score {}",
            state.fall_speed,
            state.score
        );
    }
}
