//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-driven clock only (no wall time)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod entities;
pub mod input;
pub mod particles;
pub mod physics;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timer;

pub use entities::{
    Cloud, Coin, Collidable, Entity, Frame, GroundSeg, Obstacle, ObstacleKind, Pickup, Player,
    PowerUp, PowerUpKind,
};
pub use input::InputEvent;
pub use particles::{Effect, Particle, ParticleSystem};
pub use rect::Rect;
pub use spawner::{SpawnPlan, Spawner};
pub use state::{Banner, Cue, GamePhase, GameState};
pub use tick::{SimFault, tick};
pub use timer::Timer;
