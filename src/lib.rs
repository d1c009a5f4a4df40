//! Kit Drop - catch the emergency-kit supplies, dodge the junk
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, catch resolution, session state)
//! - `audio`: Procedural sound feedback (Web Audio, wasm only)
//! - `settings`: User preferences persisted to LocalStorage

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (logical pixels)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Collector (player) hitbox is a square anchored to the bottom edge
    pub const PLAYER_SIZE: f32 = 80.0;
    /// Horizontal movement per tick while a direction key is held
    pub const PLAYER_SPEED: f32 = 10.0;

    /// Falling item hitbox (square)
    pub const ITEM_SIZE: f32 = 50.0;

    /// Fall speed at session start (units per tick)
    pub const INITIAL_FALL_SPEED: f32 = 2.0;
    /// Fall speed never exceeds this
    pub const MAX_FALL_SPEED: f32 = 10.0;
    /// Fall speed increment applied at each score milestone
    pub const SPEED_STEP: f32 = 0.1;
    /// Score multiple that triggers a speed bump
    pub const SPEED_SCORE_INTERVAL: i32 = 50;

    /// Wall-clock interval between item spawns
    pub const SPAWN_INTERVAL_MS: f64 = 1500.0;
    /// Chance a spawned item is a needed supply (rest are junk)
    pub const GOOD_ITEM_PROBABILITY: f64 = 0.5;

    /// Misses/mistakes allowed before the run ends
    pub const INITIAL_LIVES: u8 = 5;
    /// Points awarded for catching a supply
    pub const CATCH_BONUS: i32 = 10;
    /// Points deducted for catching junk (score floored at 0)
    pub const CATCH_PENALTY: i32 = 5;
}
