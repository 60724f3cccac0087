//! Sky Runner - An endless-runner simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `render`: Draw-command model and the per-frame render pass
//! - `audio`: Semantic cues and sinks that turn them into beeps
//! - `persistence`: High score stores
//! - `session`: Game wrapper that owns the state, the store and fault recovery
//! - `grid`: The simpler grid-based snake variant

pub mod audio;
pub mod color;
pub mod grid;
pub mod persistence;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use color::Color;
pub use session::Game;
pub use settings::{Difficulty, DifficultyPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulated milliseconds per tick (~60 Hz)
    pub const FRAME_MS: u64 = 16;
    /// Default Δt hint in seconds when the driver passes nothing usable
    pub const FRAME_SECS: f32 = FRAME_MS as f32 / 1000.0;

    /// World dimensions (pixels)
    pub const WORLD_WIDTH: f32 = 900.0;
    pub const WORLD_HEIGHT: f32 = 300.0;
    /// Top edge of the ground band
    pub const GROUND_Y: f32 = 250.0;

    /// Player geometry
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_WIDTH: f32 = 44.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_DUCK_WIDTH: f32 = 58.0;
    pub const PLAYER_DUCK_HEIGHT: f32 = 28.0;
    /// Hit-box shrink applied to the player only
    pub const PLAYER_INSET_X: f32 = 6.0;
    pub const PLAYER_INSET_Y: f32 = 4.0;

    /// Constant gravity (px/tick²) and jump impulses (px/tick, negative = up)
    pub const GRAVITY: f32 = 0.9;
    pub const JUMP_VELOCITY: f32 = -15.5;
    pub const DUCK_JUMP_VELOCITY: f32 = -12.0;
    /// Minimum downward speed for a landing to count
    pub const LAND_THRESHOLD: f32 = 1.0;

    /// Scroll speed bounds (px/tick)
    pub const MIN_SPEED: f32 = 4.0;
    pub const MAX_SPEED: f32 = 16.0;
    /// Maximum bonus speed earned from distance
    pub const SPEED_RAMP_MAX: f32 = 6.0;
    /// Distance per unit of bonus speed
    pub const SPEED_RAMP_DISTANCE: f32 = 1800.0;
    /// Fraction of the gap to the target speed closed per tick
    pub const SPEED_SMOOTHING: f32 = 0.02;
    pub const SPEED_WOBBLE: f32 = 0.1;
    /// Birds fly slightly faster than the ground scrolls
    pub const BIRD_SPEED_FACTOR: f32 = 1.15;

    /// Score accrual per pixel of effective speed, per tick
    pub const SCORE_RATE: f32 = 0.2;
    pub const COIN_VALUE: u64 = 25;
    pub const MILESTONE_EVERY: u64 = 500;

    /// Timed effects (ms)
    pub const SLOWMO_MS: u64 = 4000;
    pub const SLOWMO_SCALE: f32 = 0.5;
    pub const INVULNERABLE_MS: u64 = 800;
    pub const BANNER_MS: u64 = 2000;
    pub const POWER_UP_INTERVAL_MS: (u64, u64) = (8000, 14000);

    /// Decor
    pub const CLOUD_CHANCE: f64 = 0.01;
    pub const INITIAL_CLOUDS: usize = 3;
    pub const GROUND_SEGMENT_WIDTH: f32 = 300.0;

    /// Day/night cycle length in seconds of hint time
    pub const DAY_LENGTH_SECS: f32 = 90.0;
    /// Night factor above which stars appear
    pub const STAR_THRESHOLD: f32 = 0.6;

    /// Entities spawn just past the right edge
    pub const SPAWN_X: f32 = WORLD_WIDTH + 20.0;
}
