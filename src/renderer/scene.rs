//! Scene tessellation
//!
//! Turns a read-only [`SimState`] into one triangle list in screen pixels.
//! Jitter (shake, engine flame) comes from a presentation-only PCG stream so
//! drawing never touches the run's generator.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes::{
    circle, ellipse, fan, hsla, line, outline, place, radial_gradient, rect, ring, with_alpha,
};
use super::vertex::{Vertex, colors};
use crate::consts::LANE_COUNT;
use crate::sim::{Enemy, ParticleColor, PowerUpKind, SimState};

/// Player silhouette, nose up, notch at the tail
const SHIP: [Vec2; 6] = [
    Vec2::new(0.0, -22.0),
    Vec2::new(18.0, 12.0),
    Vec2::new(6.0, 12.0),
    Vec2::new(0.0, 4.0),
    Vec2::new(-6.0, 12.0),
    Vec2::new(-18.0, 12.0),
];

/// Max bank angle for enemies at full lateral bias (rad)
const ENEMY_BANK: f32 = 0.18;
/// Particles are drawn as small squares
const PARTICLE_SIZE: f32 = 2.0;
/// Full particle opacity until this much life is left
const PARTICLE_FADE: f32 = 0.3;

/// Presentation-only state carried between frames
pub struct Visuals {
    rng: Pcg32,
    /// Wall-clock seconds, drives enemy hue cycling
    time: f32,
    /// Apply screen shake (off for reduced motion)
    pub shake_enabled: bool,
}

impl Visuals {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            time: 0.0,
            shake_enabled: true,
        }
    }

    /// Advance the animation clock by real frame time
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
        }
    }
}

/// Build the frame's triangles, back to front
pub fn build(state: &SimState, paused: bool, visuals: &mut Visuals) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(4096);

    let shake = if visuals.shake_enabled && state.shake > 0.0 {
        let s = state.shake;
        Vec2::new(
            visuals.rng.random_range(-0.5..0.5) * s,
            visuals.rng.random_range(-0.5..0.5) * s,
        )
    } else {
        Vec2::ZERO
    };

    lanes(&mut out, state);

    for orb in &state.orbs {
        let c = orb.pos;
        out.extend(radial_gradient(
            c,
            orb.radius * 2.0,
            colors::ORB_GLOW,
            with_alpha(colors::ORB_GLOW, 0.0),
            16,
        ));
        out.extend(ring(c, orb.radius - 0.75, orb.radius + 0.75, colors::ORB_RIM, 16));
    }

    for powerup in &state.powerups {
        powerup_badge(&mut out, powerup.pos, powerup.kind);
    }

    for enemy in &state.enemies {
        fighter(&mut out, enemy, visuals.time);
    }

    for bullet in &state.enemy_bullets {
        out.extend(circle(bullet.pos, bullet.radius, colors::ENEMY_BULLET, 8));
    }
    for bullet in &state.bullets {
        out.extend(circle(bullet.pos, bullet.radius, colors::PLAYER_BULLET, 8));
    }

    for particle in &state.particles {
        let base = match particle.color {
            ParticleColor::Muzzle => colors::MUZZLE,
            ParticleColor::Impact => colors::IMPACT,
            ParticleColor::Orb => colors::ORB_SPARK,
            ParticleColor::Explosion => colors::EXPLOSION,
        };
        let alpha = base[3] * (particle.life / PARTICLE_FADE).clamp(0.0, 1.0);
        let p = particle.pos;
        out.extend(rect(p, p + Vec2::splat(PARTICLE_SIZE), with_alpha(base, alpha)));
    }

    if state.alive {
        warship(&mut out, state, &mut visuals.rng);
    }

    if shake != Vec2::ZERO {
        for v in &mut out {
            v.position[0] += shake.x;
            v.position[1] += shake.y;
        }
    }

    // Overlay stays put while the world shakes
    if paused {
        out.extend(rect(
            Vec2::ZERO,
            Vec2::new(state.width, state.height),
            colors::PAUSE_DIM,
        ));
    }

    out
}

fn lanes(out: &mut Vec<Vertex>, state: &SimState) {
    let lane_w = state.lane_width();
    for i in 1..LANE_COUNT {
        let x = lane_w * i as f32;
        out.extend(line(
            Vec2::new(x, 0.0),
            Vec2::new(x, state.height),
            1.0,
            colors::LANE,
        ));
    }
}

fn powerup_badge(out: &mut Vec<Vertex>, c: Vec2, kind: PowerUpKind) {
    let color = match kind {
        PowerUpKind::Heal => colors::HEAL,
        PowerUpKind::Stealth => colors::STEALTH,
        PowerUpKind::Aura => colors::AURA,
    };
    out.extend(ring(c, 11.0, 13.0, color, 20));

    match kind {
        // Cross
        PowerUpKind::Heal => {
            out.extend(rect(c - Vec2::new(5.0, 1.5), c + Vec2::new(5.0, 1.5), color));
            out.extend(rect(c - Vec2::new(1.5, 5.0), c + Vec2::new(1.5, 5.0), color));
        }
        // Shades
        PowerUpKind::Stealth => {
            out.extend(ellipse(c + Vec2::new(-3.5, 0.0), Vec2::new(3.0, 2.2), color, 10));
            out.extend(ellipse(c + Vec2::new(3.5, 0.0), Vec2::new(3.0, 2.2), color, 10));
            out.extend(line(c - Vec2::new(1.0, 0.5), c + Vec2::new(1.0, -0.5), 1.0, color));
        }
        // Burst
        PowerUpKind::Aura => {
            for k in 0..4 {
                let dir = Vec2::from_angle(k as f32 * std::f32::consts::FRAC_PI_4);
                out.extend(line(c - dir * 6.0, c + dir * 6.0, 1.6, color));
            }
        }
    }
}

fn fighter(out: &mut Vec<Vertex>, enemy: &Enemy, time: f32) {
    let r = enemy.radius;
    let hue = 200.0 + ((time + enemy.pos.x * 0.01) * 3.0).sin() * 40.0;
    let bank = (enemy.vel.x / 30.0).clamp(-1.0, 1.0) * ENEMY_BANK;

    let hull = place(
        &[
            Vec2::new(0.0, -r),
            Vec2::new(r * 0.85, r),
            Vec2::new(0.0, r * 0.45),
            Vec2::new(-r * 0.85, r),
        ],
        enemy.pos,
        bank,
    );
    out.extend(fan(&hull, hsla(hue, 0.9, 0.6, 0.18)));
    out.extend(outline(&hull, 2.0, hsla(hue, 0.95, 0.65, 0.85)));
}

fn warship(out: &mut Vec<Vertex>, state: &SimState, rng: &mut Pcg32) {
    let player = &state.player;
    let p = player.pos;

    if player.is_stealthed() {
        out.extend(radial_gradient(
            p,
            34.0,
            colors::STEALTH_GLOW,
            with_alpha(colors::STEALTH_GLOW, 0.0),
            24,
        ));
    }

    // Engine flame under the hull
    let flame = 12.0 + rng.random_range(0.0..10.0);
    let flame_color = with_alpha(colors::FLAME, colors::FLAME[3] * 0.75);
    let tip = p + Vec2::new(0.0, 24.0 + flame);
    out.push(Vertex::new(p.x - 8.0, p.y + 12.0, flame_color));
    out.push(Vertex::new(p.x + 8.0, p.y + 12.0, flame_color));
    out.push(Vertex::new(tip.x, tip.y, with_alpha(colors::FLAME, 0.0)));

    let hull = place(&SHIP, p, 0.0);
    out.extend(fan(&hull, colors::SHIP_FILL));
    out.extend(outline(&hull, 1.6, colors::SHIP_OUTLINE));
    out.extend(ellipse(p + Vec2::new(0.0, -6.0), Vec2::new(6.0, 8.0), colors::COCKPIT, 16));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Difficulty, InputIntent, Mode, step};

    fn state() -> SimState {
        SimState::new(3, Difficulty::Normal, Mode::Endless, 480.0, 800.0, 1.0)
    }

    #[test]
    fn test_idle_scene_has_lanes_and_ship() {
        let state = state();
        let mut visuals = Visuals::new(1);
        let verts = build(&state, false, &mut visuals);
        assert!(!verts.is_empty());
        assert_eq!(verts.len() % 3, 0);

        // First lane line sits exactly on the lane boundary
        let lane_x = state.lane_width();
        assert!((verts[0].position[0] - lane_x).abs() <= 0.5);
    }

    #[test]
    fn test_pause_adds_overlay_last() {
        let state = state();
        let mut visuals = Visuals::new(1);
        let plain = build(&state, false, &mut visuals).len();
        let verts = build(&state, true, &mut visuals);
        assert_eq!(verts.len(), plain + 6);
        assert_eq!(verts[verts.len() - 1].color, colors::PAUSE_DIM);
    }

    #[test]
    fn test_drawing_leaves_run_untouched() {
        let mut a = state();
        let mut b = state();
        let input = InputIntent {
            fire: true,
            ..Default::default()
        };
        let mut visuals = Visuals::new(9);
        for _ in 0..120 {
            step(&mut a, &input, 1.0 / 60.0);
            step(&mut b, &input, 1.0 / 60.0);
            // Only `a` is drawn every frame
            build(&a, false, &mut visuals);
            visuals.advance(1.0 / 60.0);
        }
        assert_eq!(a.score.to_bits(), b.score.to_bits());
        assert_eq!(a.enemies.len(), b.enemies.len());
        assert_eq!(a.particles.len(), b.particles.len());
    }

    #[test]
    fn test_shake_disabled_keeps_lanes_fixed() {
        let mut state = state();
        state.shake = 18.0;
        let mut visuals = Visuals::new(5);
        visuals.shake_enabled = false;
        let verts = build(&state, false, &mut visuals);
        let lane_x = state.lane_width();
        assert!((verts[0].position[0] - lane_x).abs() <= 0.5);

        visuals.shake_enabled = true;
        let shaken = build(&state, false, &mut visuals);
        assert_eq!(shaken.len(), verts.len());
        assert_ne!(shaken[0].position, verts[0].position);
    }

    #[test]
    fn test_dead_player_not_drawn() {
        let mut state = state();
        let mut visuals = Visuals::new(1);
        let alive = build(&state, false, &mut visuals).len();
        state.alive = false;
        assert!(build(&state, false, &mut visuals).len() < alive);
    }
}
