//! Neon Glide - a neon vertical-scrolling arcade shooter
//!
//! Core modules:
//! - `prng`: Seeded mulberry32 generator and string seeding
//! - `sim`: Simulation (spawning, movement, collisions, scoring)
//! - `control`: Run lifecycle and host events
//! - `input`: Keyboard, pointer and touch pad mapping
//! - `renderer`: WebGPU rendering of simulation snapshots
//! - `audio`: Procedural sound effects, unlocked by a user gesture
//! - `highscores` / `settings`: Host-side persistence

pub mod audio;
pub mod control;
pub mod highscores;
pub mod input;
pub mod prng;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use control::{FrameOutcome, Game, HostEvent, RunPhase};
pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation accepts (s)
    pub const MAX_FRAME_DT: f32 = 0.033;
    /// HUD mirror refresh interval (s of simulated time)
    pub const HUD_REFRESH: f32 = 0.1;

    /// Player ship
    pub const PLAYER_RADIUS: f32 = 18.0;
    pub const PLAYER_MAX_HP: u8 = 3;
    /// Distance of the ship above the bottom edge
    pub const PLAYER_Y_OFFSET: f32 = 90.0;
    /// Horizontal margin the ship is clamped to
    pub const PLAYER_MARGIN: f32 = 24.0;
    pub const PLAYER_ACCEL: f32 = 3600.0;
    /// Velocity multiplier applied per step when no direction is held
    pub const PLAYER_FRICTION: f32 = 0.84;
    pub const PLAYER_MAX_VX: f32 = 560.0;
    /// Pointer steering: offset clamp and gain
    pub const POINTER_MAX_DX: f32 = 900.0;
    pub const POINTER_GAIN: f32 = 3.2;

    /// Guns
    pub const FIRE_RATE: f32 = 0.12;
    pub const BULLET_SPEED: f32 = 720.0;
    pub const BULLET_RADIUS: f32 = 3.5;
    /// Horizontal offset of each barrel from the ship center
    pub const BARREL_OFFSET: f32 = 10.0;
    /// Nose offset above the ship center
    pub const NOSE_OFFSET: f32 = 16.0;
    /// Enemy bullets fly at this multiple of the scroll speed
    pub const ENEMY_BULLET_SPEED_MUL: f32 = 1.3;

    /// Spawning
    pub const LANE_COUNT: usize = 6;
    pub const SPAWN_INTERVAL_MIN: f32 = 0.55;
    pub const SPAWN_INTERVAL_MAX: f32 = 0.9;
    pub const ENEMY_RADIUS: f32 = 18.0;
    pub const ENEMY_HP: u8 = 2;
    pub const ORB_RADIUS: f32 = 9.0;
    pub const ORB_CHANCE: f32 = 0.6;
    pub const POWERUP_RADIUS: f32 = 12.0;
    pub const POWERUP_CHANCE: f32 = 0.18;

    /// Scoring
    pub const ENEMY_SCORE: f64 = 25.0;
    pub const ORB_SCORE: f64 = 10.0;
    pub const AURA_SCORE: f64 = 15.0;
    pub const DISTANCE_SCORE_RATE: f64 = 0.35;

    /// Power-ups and damage
    pub const STEALTH_POWERUP_SECS: f32 = 3.0;
    pub const HURT_STEALTH_SECS: f32 = 1.0;
    pub const AURA_RADIUS: f32 = 120.0;
    pub const HURT_SHAKE: f32 = 14.0;
    pub const EXPLOSION_SHAKE: f32 = 18.0;
    /// Screen shake decay (px/s)
    pub const SHAKE_DECAY: f32 = 72.0;

    /// Speed
    /// Scroll speed gained per second of run time
    pub const SPEED_RAMP: f32 = 10.0;
    /// The run's cap never exceeds this multiple of the viewport height
    pub const SPEED_CAP_PER_HEIGHT: f32 = 1.5;
    /// Cap used when the viewport has no height yet
    pub const FALLBACK_MAX_SPEED: f32 = 800.0;

    /// Off-screen culling margins
    pub const ENEMY_CULL_MARGIN: f32 = 120.0;
    pub const BULLET_CULL_MARGIN: f32 = 60.0;
    pub const ENEMY_BULLET_CULL_MARGIN: f32 = 60.0;
    pub const ORB_CULL_MARGIN: f32 = 40.0;
    pub const POWERUP_CULL_MARGIN: f32 = 60.0;
}

/// Clamp a frame delta into the range the simulation accepts.
///
/// Negative or NaN deltas (clock skew, resumed tabs) become 0.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        0.0
    } else {
        dt.clamp(0.0, consts::MAX_FRAME_DT)
    }
}
