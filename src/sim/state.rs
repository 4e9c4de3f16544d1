//! Simulation state and entity model
//!
//! `SimState` is the authoritative world for one run. It is rebuilt from
//! scratch on every start and only mutated by [`super::tick::step`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::config::{Difficulty, Mode};
use crate::consts::*;
use crate::prng::Mulberry32;

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Horizontal velocity (px/s)
    pub vx: f32,
    pub radius: f32,
    pub hp: u8,
    pub max_hp: u8,
    /// Seconds until the guns can fire again (goes negative while idle)
    pub fire_cooldown: f32,
    /// Seconds between shots
    pub fire_rate: f32,
    /// Seconds of damage immunity left
    pub stealth: f32,
}

impl Player {
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(w * 0.5, h - PLAYER_Y_OFFSET),
            vx: 0.0,
            radius: PLAYER_RADIUS,
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            fire_cooldown: 0.0,
            fire_rate: FIRE_RATE,
            stealth: 0.0,
        }
    }

    pub fn is_stealthed(&self) -> bool {
        self.stealth > 0.0
    }
}

/// A weaving enemy fighter
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    /// `y` is the fall speed; `x` is the spawn bias the renderer banks the
    /// sprite with. Lateral motion comes from the sine drift.
    pub vel: Vec2,
    pub radius: f32,
    pub hp: u8,
    /// Seconds alive, drives the drift phase
    pub age: f32,
}

/// Score orb
#[derive(Debug, Clone)]
pub struct Orb {
    pub pos: Vec2,
    pub vy: f32,
    pub radius: f32,
}

/// Power-up variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Restore one hit point
    Heal,
    /// Three seconds of damage immunity
    Stealth,
    /// Destroy every enemy near the player
    Aura,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Heal, PowerUpKind::Stealth, PowerUpKind::Aura];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Heal => "heal",
            PowerUpKind::Stealth => "stealth",
            PowerUpKind::Aura => "aura",
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub vy: f32,
    pub kind: PowerUpKind,
}

/// Player or enemy projectile (direction is the sign of `vy`)
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vy: f32,
    pub radius: f32,
}

/// Particle palette tag, resolved to a color by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    Muzzle,
    Impact,
    Orb,
    Explosion,
}

/// A purely visual particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left
    pub life: f32,
    pub color: ParticleColor,
}

/// Something that happened during a step. Drained by the host each frame and
/// turned into sound effects; never read back by the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Twin shot fired
    Fired,
    /// Enemy destroyed (bullets, aura or ramming)
    EnemyDestroyed { pos: Vec2 },
    OrbCollected,
    PowerUpCollected(PowerUpKind),
    /// Player took damage, `hp` is what's left
    PlayerHurt { hp: u8 },
}

/// What the player wants to do this step. Written by the input layer, read by
/// the step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputIntent {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    /// Pointer/touch x in viewport pixels while a pointer is down
    pub pointer_x: Option<f32>,
    pub pointer_firing: bool,
}

impl InputIntent {
    pub fn firing(&self) -> bool {
        self.fire || self.pointer_firing
    }
}

/// Numbers the HUD displays. A derived copy, never written back.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub speed: u32,
    pub hp: u8,
    pub max_hp: u8,
    /// Stealth seconds remaining (0 when inactive)
    pub stealth: f32,
    pub wave_level: u32,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct SimState {
    /// Run seed (reproduces the run together with the inputs)
    pub seed: u32,
    pub(crate) rng: Mulberry32,
    /// Elapsed run time (s)
    pub time: f32,
    /// Viewport size in CSS pixels
    pub width: f32,
    pub height: f32,
    /// Device pixel ratio of the canvas
    pub dpr: f32,
    pub difficulty: Difficulty,
    pub mode: Mode,
    /// Difficulty ceiling before the viewport clamp
    pub difficulty_max: f32,
    /// Speed cap for this run, `min(difficulty max, height * 1.5)`
    pub max_speed_from_h: f32,
    pub base_speed: f32,
    /// Current scroll speed (px/s)
    pub speed: f32,
    pub spawn_mul: f32,
    /// Seconds until the next spawn (scaled by `spawn_mul`)
    pub next_spawn: f32,
    pub enemy_bullet_rate: f32,
    pub wave_level: u32,
    pub score: f64,
    pub alive: bool,
    /// Screen shake magnitude in px
    pub shake: f32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub orbs: Vec<Orb>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    /// Events produced since the host last drained them
    pub events: Vec<GameEvent>,
}

impl SimState {
    /// Fresh run for the given parameters and viewport
    pub fn new(
        seed: u32,
        difficulty: Difficulty,
        mode: Mode,
        width: f32,
        height: f32,
        dpr: f32,
    ) -> Self {
        let diff = difficulty.params();
        let m = mode.params();

        Self {
            seed,
            rng: Mulberry32::new(seed),
            time: 0.0,
            width,
            height,
            dpr,
            difficulty,
            mode,
            difficulty_max: diff.max_speed,
            max_speed_from_h: speed_cap(diff.max_speed, height),
            base_speed: diff.speed,
            speed: diff.speed,
            spawn_mul: diff.spawn * m.spawn_mul,
            next_spawn: 0.0,
            enemy_bullet_rate: m.enemy_bullets,
            wave_level: 0,
            score: 0.0,
            alive: true,
            shake: 0.0,
            player: Player::new(width, height),
            enemies: Vec::new(),
            orbs: Vec::new(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Effective speed cap (a viewport without height falls back to a fixed cap)
    pub fn max_speed(&self) -> f32 {
        if self.max_speed_from_h > 0.0 {
            self.max_speed_from_h
        } else {
            FALLBACK_MAX_SPEED
        }
    }

    /// Apply a viewport change. Only called between steps.
    pub fn resize(&mut self, width: f32, height: f32, dpr: f32) {
        self.width = width;
        self.height = height;
        self.dpr = dpr;
        self.player.pos.y = height - PLAYER_Y_OFFSET;
        self.max_speed_from_h = speed_cap(self.difficulty_max, height);
    }

    /// Score as the host sees it
    pub fn display_score(&self) -> u64 {
        self.score.round() as u64
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.display_score(),
            speed: self.speed.round() as u32,
            hp: self.player.hp,
            max_hp: self.player.max_hp,
            stealth: self.player.stealth.max(0.0),
            wave_level: self.wave_level,
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Width of one of the six spawn lanes
    pub fn lane_width(&self) -> f32 {
        self.width / LANE_COUNT as f32
    }
}

fn speed_cap(difficulty_max: f32, height: f32) -> f32 {
    difficulty_max.min(height * SPEED_CAP_PER_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = SimState::new(1, Difficulty::Chill, Mode::Onslaught, 480.0, 800.0, 2.0);
        assert!(state.alive);
        assert_eq!(state.player.hp, 3);
        assert_eq!(state.player.pos, Vec2::new(240.0, 710.0));
        assert_eq!(state.speed, 220.0);
        assert!((state.spawn_mul - 0.8 * 1.6).abs() < 1e-6);
        assert_eq!(state.enemy_bullet_rate, 0.20);
        assert_eq!(state.max_speed(), 650.0);
        assert!(state.enemies.is_empty() && state.particles.is_empty());
    }

    #[test]
    fn test_speed_cap_follows_viewport() {
        let state = SimState::new(1, Difficulty::Hyper, Mode::Endless, 400.0, 300.0, 1.0);
        assert_eq!(state.max_speed(), 450.0);

        let flat = SimState::new(1, Difficulty::Hyper, Mode::Endless, 400.0, 0.0, 1.0);
        assert_eq!(flat.max_speed(), FALLBACK_MAX_SPEED);
    }

    #[test]
    fn test_resize_reanchors_player_and_cap() {
        let mut state = SimState::new(1, Difficulty::Normal, Mode::Endless, 400.0, 800.0, 1.0);
        state.resize(600.0, 400.0, 2.0);
        assert_eq!(state.player.pos.y, 310.0);
        assert_eq!(state.max_speed(), 600.0);
        assert_eq!(state.dpr, 2.0);
    }

    #[test]
    fn test_hud_rounds_and_clamps() {
        let mut state = SimState::new(1, Difficulty::Normal, Mode::Endless, 400.0, 800.0, 1.0);
        state.score = 41.6;
        state.player.stealth = -0.01;
        let hud = state.hud();
        assert_eq!(hud.score, 42);
        assert_eq!(hud.stealth, 0.0);
        assert_eq!(hud.speed, 280);
    }
}
