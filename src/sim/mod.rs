//! Seeded simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Randomness only through the run's seeded generator
//! - Insertion-ordered containers, reverse-index removal
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod config;
pub mod state;
pub mod tick;

pub use collision::circle_hit;
pub use config::{Difficulty, Mode};
pub use state::{
    Bullet, Enemy, GameEvent, HudSnapshot, InputIntent, Orb, Particle, ParticleColor, Player,
    PowerUp, PowerUpKind, SimState,
};
pub use tick::{hurt, step};
