//! Game state and core simulation types
//!
//! The session (score, lives, phase, fall speed) is owned exclusively by
//! [`GameState`]; the spawner and resolver mutate it only through the
//! methods defined here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first start command; nothing spawns or moves
    Idle,
    /// Active gameplay
    Running,
    /// Frozen mid-run; all entity and counter state preserved
    Paused,
    /// Run ended (lives exhausted), terminal until reset
    GameOver,
}

/// What kind of thing is falling
///
/// Supplies belong in the emergency kit and must be caught; junk must be
/// dodged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    // Supplies (catch these)
    Water,
    Whistle,
    FirstAidKit,
    CannedFood,
    Blanket,
    Battery,
    Flashlight,
    Radio,
    // Junk (dodge these)
    Toy,
    Chips,
    Book,
    Vase,
    Plate,
    Television,
    FlowerPot,
}

/// The supply kinds, used for weighted spawn selection
pub const SUPPLY_KINDS: [ItemKind; 8] = [
    ItemKind::Water,
    ItemKind::Whistle,
    ItemKind::FirstAidKit,
    ItemKind::CannedFood,
    ItemKind::Blanket,
    ItemKind::Battery,
    ItemKind::Flashlight,
    ItemKind::Radio,
];

/// The junk kinds
pub const JUNK_KINDS: [ItemKind; 7] = [
    ItemKind::Toy,
    ItemKind::Chips,
    ItemKind::Book,
    ItemKind::Vase,
    ItemKind::Plate,
    ItemKind::Television,
    ItemKind::FlowerPot,
];

impl ItemKind {
    /// Whether catching this item is rewarded (true) or penalized (false)
    pub fn is_good(&self) -> bool {
        !matches!(
            self,
            ItemKind::Toy
                | ItemKind::Chips
                | ItemKind::Book
                | ItemKind::Vase
                | ItemKind::Plate
                | ItemKind::Television
                | ItemKind::FlowerPot
        )
    }

    /// Kebab-case name used by the presentation shell for image lookup
    pub fn asset_name(&self) -> &'static str {
        match self {
            ItemKind::Water => "water",
            ItemKind::Whistle => "whistle",
            ItemKind::FirstAidKit => "first-aid-kit",
            ItemKind::CannedFood => "canned-food",
            ItemKind::Blanket => "blanket",
            ItemKind::Battery => "battery",
            ItemKind::Flashlight => "flashlight",
            ItemKind::Radio => "radio",
            ItemKind::Toy => "toy",
            ItemKind::Chips => "chips",
            ItemKind::Book => "book",
            ItemKind::Vase => "vase",
            ItemKind::Plate => "plate",
            ItemKind::Television => "television",
            ItemKind::FlowerPot => "flower-pot",
        }
    }
}

/// A falling item entity
///
/// Invariant: every item in `GameState::items` has `resolved == false`.
/// The resolver flips the flag and removes the item in the same tick; a
/// resolved item never re-enters the live set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    /// Top-left corner; x is fixed at spawn, y advances each tick
    pub pos: Vec2,
    pub kind: ItemKind,
    pub resolved: bool,
}

impl Item {
    pub fn new(id: u32, x: f32, kind: ItemKind) -> Self {
        Self {
            id,
            // Spawn fully above the visible top edge
            pos: Vec2::new(x, -ITEM_SIZE),
            kind,
            resolved: false,
        }
    }
}

/// The player's collector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Left edge; clamped to `[0, GAME_WIDTH - PLAYER_SIZE]`
    pub x: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: GAME_WIDTH / 2.0 - PLAYER_SIZE / 2.0,
        }
    }
}

impl Player {
    pub fn move_left(&mut self) {
        self.x = (self.x - PLAYER_SPEED).max(0.0);
    }

    pub fn move_right(&mut self) {
        self.x = (self.x + PLAYER_SPEED).min(GAME_WIDTH - PLAYER_SIZE);
    }
}

/// Outcome events produced by the resolver, consumed by the feedback
/// collaborator. Fire-and-forget: nothing in the sim waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A supply was caught
    CatchGood,
    /// Junk was caught (life lost, score penalty)
    CatchBad,
    /// A supply hit the ground uncaught (life lost).
    /// `fatal` marks the decrement that ended the run; the original game
    /// plays no miss sound in that case, and we keep that behavior.
    MissGood { fatal: bool },
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG used by the spawner
    pub rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Score, never below 0
    pub score: i32,
    /// Remaining misses/mistakes before game over
    pub lives: u8,
    /// Shared fall speed (units per tick), monotonic within a run
    pub fall_speed: f32,
    /// Last score at which a speed bump was applied; guards against
    /// re-bumping every tick while score sits on an exact multiple
    pub last_speed_bump_score: i32,
    /// Wall-clock milliseconds accumulated toward the next spawn
    pub spawn_elapsed_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The collector
    pub player: Player,
    /// Live falling items (sorted by id for determinism)
    pub items: Vec<Item>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session in `Idle` with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            lives: INITIAL_LIVES,
            fall_speed: INITIAL_FALL_SPEED,
            last_speed_bump_score: 0,
            spawn_elapsed_ms: 0.0,
            time_ticks: 0,
            player: Player::default(),
            items: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ensure items are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.items.sort_by_key(|i| i.id);
    }

    // === Session State Machine operations ===

    /// Begin a run: `Idle -> Running` with full counter reinitialization.
    /// No-op in any other phase.
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            return;
        }
        self.reinit_run();
        self.phase = GamePhase::Running;
        log::info!("Session started (seed {})", self.seed);
    }

    /// `Running -> Paused`; no-op elsewhere
    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            log::info!("Session paused");
        }
    }

    /// `Paused -> Running`; no-op elsewhere
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            log::info!("Session resumed");
        }
    }

    /// Return to `Idle` from any phase, reinitializing score, lives, fall
    /// speed, and the live-item set. The RNG stream is left where it is so
    /// replays see fresh spawns.
    pub fn reset(&mut self) {
        self.reinit_run();
        self.phase = GamePhase::Idle;
        log::info!("Session reset");
    }

    fn reinit_run(&mut self) {
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.fall_speed = INITIAL_FALL_SPEED;
        self.last_speed_bump_score = 0;
        self.spawn_elapsed_ms = 0.0;
        self.time_ticks = 0;
        self.player = Player::default();
        self.items.clear();
    }

    // === Counter mutation (funnel for the resolver) ===

    /// Add a (possibly negative) score delta, clamped at 0
    pub fn add_score(&mut self, delta: i32) {
        self.score = (self.score + delta).max(0);
    }

    /// Remove one life; transitions to `GameOver` when the last one goes.
    /// Returns the remaining count.
    pub fn lose_life(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 && self.phase == GamePhase::Running {
            self.phase = GamePhase::GameOver;
            log::info!("Game over at score {}", self.score);
        }
        self.lives
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.fall_speed, INITIAL_FALL_SPEED);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_pause_outside_running_is_noop() {
        let mut state = GameState::new(7);
        state.pause();
        assert_eq!(state.phase, GamePhase::Idle);

        state.resume();
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_start_pause_resume_cycle() {
        let mut state = GameState::new(7);
        state.start();
        assert_eq!(state.phase, GamePhase::Running);

        state.pause();
        assert_eq!(state.phase, GamePhase::Paused);

        state.resume();
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_start_is_noop_while_running() {
        let mut state = GameState::new(7);
        state.start();
        state.add_score(30);
        state.start();
        // A second start must not wipe the run
        assert_eq!(state.score, 30);
    }

    #[test]
    fn test_reset_from_game_over_reinitializes() {
        let mut state = GameState::new(7);
        state.start();
        state.add_score(120);
        for _ in 0..INITIAL_LIVES {
            state.lose_life();
        }
        assert_eq!(state.phase, GamePhase::GameOver);

        state.reset();
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.fall_speed, INITIAL_FALL_SPEED);
        assert!(state.items.is_empty());
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut state = GameState::new(7);
        state.start();
        state.add_score(-50);
        assert_eq!(state.score, 0);

        state.add_score(3);
        state.add_score(-50);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_lives_never_underflow() {
        let mut state = GameState::new(7);
        state.start();
        for _ in 0..20 {
            state.lose_life();
        }
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_item_spawns_off_screen() {
        let item = Item::new(1, 100.0, ItemKind::Water);
        assert!(item.pos.y + crate::consts::ITEM_SIZE <= 0.0);
        assert!(!item.resolved);
    }

    #[test]
    fn test_player_clamps_to_field() {
        let mut player = Player { x: 3.0 };
        player.move_left();
        assert_eq!(player.x, 0.0);

        player.x = GAME_WIDTH - PLAYER_SIZE - 3.0;
        player.move_right();
        assert_eq!(player.x, GAME_WIDTH - PLAYER_SIZE);
    }

    #[test]
    fn test_kind_classification() {
        for kind in SUPPLY_KINDS {
            assert!(kind.is_good(), "{:?} should be a supply", kind);
        }
        for kind in JUNK_KINDS {
            assert!(!kind.is_good(), "{:?} should be junk", kind);
        }
    }
}
