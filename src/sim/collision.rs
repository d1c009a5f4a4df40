//! Catch resolution: items vs the collector hitbox and the bottom edge
//!
//! Each live item is evaluated exactly once per tick against two mutually
//! exclusive conditions, overlap first, bottom exit second. Items are
//! evaluated independently; the score/lives counters accumulate every
//! outcome from the tick before the next tick starts.

use glam::Vec2;

use super::state::{GameEvent, GameState, Item};
use crate::consts::*;

/// Axis-aligned rectangle, boundary-inclusive on both axes
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// True when the rectangles overlap, edges touching included
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.max.x >= other.min.x
            && self.min.x <= other.max.x
            && self.max.y >= other.min.y
            && self.min.y <= other.max.y
    }
}

/// The collector's hitbox: a fixed-height band anchored to the bottom edge
#[inline]
pub fn player_rect(player_x: f32) -> Rect {
    Rect {
        min: Vec2::new(player_x, GAME_HEIGHT - PLAYER_SIZE),
        max: Vec2::new(player_x + PLAYER_SIZE, GAME_HEIGHT),
    }
}

/// An item's hitbox from its top-left corner
#[inline]
pub fn item_rect(item: &Item) -> Rect {
    Rect {
        min: item.pos,
        max: item.pos + Vec2::splat(ITEM_SIZE),
    }
}

/// Resolve every live item against the collector and the bottom boundary.
///
/// Caught or fallen items are marked resolved and removed from the live
/// set in this same call. Score/lives mutation goes through the session's
/// own methods so the floors and the game-over transition hold.
pub fn resolve(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = player_rect(state.player.x);

    // Take the set out so outcome application can borrow the session
    let mut items = std::mem::take(&mut state.items);

    for item in items.iter_mut() {
        if item.resolved {
            continue;
        }

        if item_rect(item).intersects(&player) {
            item.resolved = true;
            if item.kind.is_good() {
                state.add_score(CATCH_BONUS);
                events.push(GameEvent::CatchGood);
            } else {
                state.lose_life();
                state.add_score(-CATCH_PENALTY);
                events.push(GameEvent::CatchBad);
            }
        } else if item.pos.y > GAME_HEIGHT {
            item.resolved = true;
            if item.kind.is_good() {
                // A missed supply costs a life just like catching junk,
                // but no score penalty
                let remaining = state.lose_life();
                events.push(GameEvent::MissGood {
                    fatal: remaining == 0,
                });
            }
            // Junk reaching the ground is the correct outcome: no effect
        }
    }

    items.retain(|i| !i.resolved);
    state.items = items;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{GamePhase, ItemKind};

    fn running_state() -> GameState {
        let mut state = GameState::new(42);
        state.start();
        state
    }

    /// Place an item horizontally centered on the player at the given y
    fn item_over_player(state: &mut GameState, kind: ItemKind, y: f32) {
        let id = state.next_entity_id();
        let x = state.player.x + (PLAYER_SIZE - ITEM_SIZE) / 2.0;
        let mut item = Item::new(id, x, kind);
        item.pos.y = y;
        state.items.push(item);
    }

    #[test]
    fn test_rect_intersection_is_boundary_inclusive() {
        // Item bottom exactly touching the player's top edge counts
        let player = player_rect(100.0);
        let item = Rect {
            min: Vec2::new(110.0, GAME_HEIGHT - PLAYER_SIZE - ITEM_SIZE),
            max: Vec2::new(110.0 + ITEM_SIZE, GAME_HEIGHT - PLAYER_SIZE),
        };
        assert!(item.intersects(&player));
        assert!(player.intersects(&item));

        // One unit higher and it no longer touches
        let above = Rect {
            min: item.min - Vec2::new(0.0, 1.0),
            max: item.max - Vec2::new(0.0, 1.0),
        };
        assert!(!above.intersects(&player));
    }

    #[test]
    fn test_no_catch_without_horizontal_overlap() {
        let mut state = running_state();
        state.player.x = 0.0;
        let id = state.next_entity_id();
        let mut item = Item::new(id, GAME_WIDTH - ITEM_SIZE, ItemKind::Water);
        item.pos.y = GAME_HEIGHT - PLAYER_SIZE;
        state.items.push(item);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        assert!(events.is_empty());
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_catch_good_awards_bonus() {
        let mut state = running_state();
        item_over_player(&mut state, ItemKind::Water, GAME_HEIGHT - PLAYER_SIZE);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.score, CATCH_BONUS);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(events, vec![GameEvent::CatchGood]);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_catch_bad_costs_life_and_score() {
        let mut state = running_state();
        state.add_score(10);
        item_over_player(&mut state, ItemKind::Vase, GAME_HEIGHT - PLAYER_SIZE);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.score, 5);
        assert_eq!(state.lives, INITIAL_LIVES - 1);
        assert_eq!(events, vec![GameEvent::CatchBad]);
    }

    #[test]
    fn test_catch_bad_score_floors_at_zero() {
        let mut state = running_state();
        item_over_player(&mut state, ItemKind::Plate, GAME_HEIGHT - PLAYER_SIZE);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_missed_supply_costs_life() {
        let mut state = running_state();
        state.player.x = 0.0;
        let id = state.next_entity_id();
        let mut item = Item::new(id, GAME_WIDTH - ITEM_SIZE, ItemKind::Radio);
        item.pos.y = GAME_HEIGHT + 1.0;
        state.items.push(item);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.lives, INITIAL_LIVES - 1);
        assert_eq!(state.score, 0);
        assert_eq!(events, vec![GameEvent::MissGood { fatal: false }]);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_fatal_miss_ends_run_same_tick() {
        let mut state = running_state();
        state.lives = 1;
        state.player.x = 0.0;
        let id = state.next_entity_id();
        let mut item = Item::new(id, GAME_WIDTH - ITEM_SIZE, ItemKind::Flashlight);
        item.pos.y = GAME_HEIGHT + 1.0;
        state.items.push(item);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(events, vec![GameEvent::MissGood { fatal: true }]);
    }

    #[test]
    fn test_junk_passing_bottom_is_free() {
        let mut state = running_state();
        state.player.x = 0.0;
        let id = state.next_entity_id();
        let mut item = Item::new(id, GAME_WIDTH - ITEM_SIZE, ItemKind::Television);
        item.pos.y = GAME_HEIGHT + 1.0;
        state.items.push(item);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.score, 0);
        assert!(events.is_empty());
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_overlap_wins_over_bottom_exit() {
        // An item past the bottom line but still overlapping the player
        // band must count as a catch, not a miss
        let mut state = running_state();
        item_over_player(&mut state, ItemKind::Water, GAME_HEIGHT - 1.0);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        assert_eq!(events, vec![GameEvent::CatchGood]);
    }

    #[test]
    fn test_unresolved_item_keeps_falling() {
        let mut state = running_state();
        state.player.x = 0.0;
        let id = state.next_entity_id();
        let mut item = Item::new(id, GAME_WIDTH - ITEM_SIZE, ItemKind::Book);
        item.pos.y = 100.0;
        state.items.push(item);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);
        assert_eq!(state.items.len(), 1);
        assert!(!state.items[0].resolved);
        assert_eq!(state.items[0].pos.y, 100.0);
    }

    #[test]
    fn test_multiple_outcomes_accumulate_in_one_pass() {
        let mut state = running_state();
        state.add_score(10);
        // One good catch, one bad catch, one junk passthrough
        item_over_player(&mut state, ItemKind::Water, GAME_HEIGHT - PLAYER_SIZE);
        item_over_player(&mut state, ItemKind::Vase, GAME_HEIGHT - PLAYER_SIZE + 5.0);
        let id = state.next_entity_id();
        let mut junk = Item::new(id, 0.0, ItemKind::Chips);
        junk.pos.y = GAME_HEIGHT + 10.0;
        state.player.x = GAME_WIDTH / 2.0;
        // Re-center the two catchable items over the moved player
        for item in state.items.iter_mut() {
            item.pos.x = state.player.x + (PLAYER_SIZE - ITEM_SIZE) / 2.0;
        }
        state.items.push(junk);

        let mut events = Vec::new();
        resolve(&mut state, &mut events);

        assert_eq!(state.score, 10 + CATCH_BONUS - CATCH_PENALTY);
        assert_eq!(state.lives, INITIAL_LIVES - 1);
        assert_eq!(events.len(), 2);
        assert!(state.items.is_empty());
    }
}
