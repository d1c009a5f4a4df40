//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per tick (only the spawn cadence reads wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, item_rect, player_rect, resolve};
pub use spawn::accrue_and_spawn;
pub use state::{GameEvent, GamePhase, GameState, Item, ItemKind, Player};
pub use tick::{TickInput, tick};
