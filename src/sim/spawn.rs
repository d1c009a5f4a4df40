//! Item spawner
//!
//! Spawning runs on accumulated wall-clock time, not on ticks: one item
//! per `SPAWN_INTERVAL_MS` while the session is running. The accumulator
//! lives inside `GameState`, so pausing or resetting the session stops
//! the cadence with it; there is no separate timer to leak.

use rand::Rng;

use super::state::{GamePhase, GameState, Item, ItemKind, JUNK_KINDS, SUPPLY_KINDS};
use crate::consts::*;

/// Accrue `dt_ms` of wall-clock time and spawn items at the fixed cadence.
///
/// A long frame can owe more than one interval; each owed interval spawns
/// exactly one item.
pub fn accrue_and_spawn(state: &mut GameState, dt_ms: f64) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.spawn_elapsed_ms += dt_ms;
    while state.spawn_elapsed_ms >= SPAWN_INTERVAL_MS {
        state.spawn_elapsed_ms -= SPAWN_INTERVAL_MS;
        spawn_item(state);
    }
}

/// Append one item with random category and horizontal position
fn spawn_item(state: &mut GameState) {
    let is_good = state.rng.random_bool(GOOD_ITEM_PROBABILITY);
    let kind = pick_kind(state, is_good);
    let x = state.rng.random_range(0.0..GAME_WIDTH - ITEM_SIZE);

    let id = state.next_entity_id();
    state.items.push(Item::new(id, x, kind));
    log::debug!("Spawned {:?} at x={:.1}", kind, x);
}

fn pick_kind(state: &mut GameState, is_good: bool) -> ItemKind {
    if is_good {
        SUPPLY_KINDS[state.rng.random_range(0..SUPPLY_KINDS.len())]
    } else {
        JUNK_KINDS[state.rng.random_range(0..JUNK_KINDS.len())]
    }
}
