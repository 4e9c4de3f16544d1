//! Variable timestep simulation step
//!
//! Advances a run by one frame. Phase order is fixed: spawns happen before
//! collisions, and damage is applied before off-screen cleanup.

use glam::Vec2;

use super::collision::{circle_hit, overlapping_desc};
use super::config::{WAVE_PERIOD, WAVE_SPAWN_GROWTH, WAVE_SPEED_GROWTH};
use super::state::{
    Bullet, Enemy, GameEvent, InputIntent, Orb, Particle, ParticleColor, PowerUp, PowerUpKind,
    SimState,
};
use crate::consts::*;
use crate::prng::Mulberry32;

/// Horizontal inset added to every lane position
const LANE_INSET: f32 = 30.0;
/// Lateral jitter inside a lane, as a fraction of the lane width (each side)
const LANE_JITTER: f32 = 0.2;

/// Particle burst recipe
struct Burst {
    count: usize,
    /// Half-range of each velocity component (px/s)
    spread: f32,
    life: f32,
    life_jitter: f32,
    color: ParticleColor,
}

const IMPACT_BURST: Burst = Burst {
    count: 10,
    spread: 90.0,
    life: 0.25,
    life_jitter: 0.25,
    color: ParticleColor::Impact,
};

const ORB_BURST: Burst = Burst {
    count: 12,
    spread: 80.0,
    life: 0.4,
    life_jitter: 0.3,
    color: ParticleColor::Orb,
};

const EXPLOSION_BURST: Burst = Burst {
    count: 28,
    spread: 140.0,
    life: 0.4,
    life_jitter: 0.5,
    color: ParticleColor::Explosion,
};

/// Advance the run by `dt` seconds (clamped to [`MAX_FRAME_DT`]).
///
/// A dead run is terminal: stepping it does nothing.
pub fn step(state: &mut SimState, input: &InputIntent, dt: f32) {
    if !state.alive {
        return;
    }
    let dt = crate::clamp_dt(dt);
    state.time += dt;

    ramp_speed(state);
    apply_controls(state, input, dt);
    fire_guns(state, input, dt);
    spawn(state, dt);
    enemy_fire(state, dt);
    move_entities(state, dt);

    resolve_bullet_hits(state);
    collect_orbs(state);
    collect_powerups(state);
    apply_damage(state);

    decay_particles(state, dt);
    cull_offscreen(state);

    // Distance score accrues every step, collisions or not
    state.score += f64::from(state.speed) * f64::from(dt) * DISTANCE_SCORE_RATE;

    decay_timers(state, dt);
}

/// Apply `amount` damage to the player.
///
/// Dropping to 0 hp ends the run; anything else grants a short stealth window
/// so one cluster of hazards can only land a single hit.
pub fn hurt(state: &mut SimState, amount: u8) {
    let player = &mut state.player;
    player.hp = player.hp.saturating_sub(amount);
    state.shake = HURT_SHAKE;

    if player.hp == 0 {
        state.alive = false;
        log::info!(
            "Player destroyed at t={:.1}s, score {}",
            state.time,
            state.score.round()
        );
    } else {
        player.stealth = player.stealth.max(HURT_STEALTH_SECS);
    }

    let hp = state.player.hp;
    state.events.push(GameEvent::PlayerHurt { hp });
}

fn ramp_speed(state: &mut SimState) {
    let max_speed = state.max_speed();
    state.speed = (state.base_speed + state.time * SPEED_RAMP).min(max_speed);

    if state.mode.escalates() {
        let level = (state.time / WAVE_PERIOD).floor() as u32;
        if level != state.wave_level {
            state.wave_level = level;
            state.spawn_mul *= WAVE_SPAWN_GROWTH;
            state.base_speed = (state.base_speed * WAVE_SPEED_GROWTH).min(max_speed);
            log::info!(
                "Wave {} (spawn x{:.2}, base speed {:.0})",
                level,
                state.spawn_mul,
                state.base_speed
            );
        }
    }
}

fn apply_controls(state: &mut SimState, input: &InputIntent, dt: f32) {
    let player = &mut state.player;

    match (input.left, input.right) {
        (true, false) => player.vx = (player.vx - PLAYER_ACCEL * dt).max(-PLAYER_MAX_VX),
        (false, true) => player.vx = (player.vx + PLAYER_ACCEL * dt).min(PLAYER_MAX_VX),
        _ => player.vx *= PLAYER_FRICTION,
    }

    // Pointer steering pulls toward the finger/cursor
    if let Some(target_x) = input.pointer_x {
        let dx = (target_x - player.pos.x).clamp(-POINTER_MAX_DX, POINTER_MAX_DX);
        player.vx += dx * POINTER_GAIN * dt;
    }

    let max_x = (state.width - PLAYER_MARGIN).max(PLAYER_MARGIN);
    player.pos.x = (player.pos.x + player.vx * dt).clamp(PLAYER_MARGIN, max_x);
}

fn fire_guns(state: &mut SimState, input: &InputIntent, dt: f32) {
    let player = &mut state.player;
    player.fire_cooldown -= dt;
    if !input.firing() || player.fire_cooldown > 0.0 {
        return;
    }
    player.fire_cooldown = player.fire_rate;

    let nose = Vec2::new(player.pos.x, player.pos.y - NOSE_OFFSET);
    for side in [-BARREL_OFFSET, BARREL_OFFSET] {
        state.bullets.push(Bullet {
            pos: nose + Vec2::new(side, 0.0),
            vy: -BULLET_SPEED,
            radius: BULLET_RADIUS,
        });
    }

    // Muzzle flash
    let rng = &mut state.rng;
    for _ in 0..6 {
        let side = if rng.chance(0.5) {
            -BARREL_OFFSET
        } else {
            BARREL_OFFSET
        };
        let vel = Vec2::new(rng.spread(30.0), -120.0 - rng.unit() * 80.0);
        let life = 0.15 + rng.unit() * 0.2;
        state.particles.push(Particle {
            pos: nose + Vec2::new(side, 0.0),
            vel,
            life,
            color: ParticleColor::Muzzle,
        });
    }

    state.events.push(GameEvent::Fired);
}

fn spawn(state: &mut SimState, dt: f32) {
    state.next_spawn -= dt * state.spawn_mul;
    if state.next_spawn > 0.0 {
        return;
    }

    let lane_w = state.lane_width();
    let speed = state.speed;
    let rng = &mut state.rng;

    state.next_spawn = rng.range(SPAWN_INTERVAL_MIN, SPAWN_INTERVAL_MAX);

    let lane = rng.index(LANE_COUNT) as f32;
    let x = LANE_INSET + lane * lane_w + lane_w * 0.5 + rng.spread(lane_w * LANE_JITTER);
    // Spawn further above the top edge as the scroll speeds up
    let lead = (40.0 + speed * 0.18).min(160.0);
    let vx = rng.range(-30.0, 30.0);
    let vy = speed * rng.range(0.95, 1.12);

    state.enemies.push(Enemy {
        pos: Vec2::new(x, -lead),
        vel: Vec2::new(vx, vy),
        radius: ENEMY_RADIUS,
        hp: ENEMY_HP,
        age: 0.0,
    });

    if rng.chance(ORB_CHANCE) {
        let ox = x + rng.range(-60.0, 60.0);
        state.orbs.push(Orb {
            pos: Vec2::new(ox, -lead * 1.2),
            vy: speed * 0.95,
            radius: ORB_RADIUS,
        });
    }

    if rng.chance(POWERUP_CHANCE) {
        let kind = PowerUpKind::ALL[rng.index(PowerUpKind::ALL.len())];
        let px = x + rng.range(-40.0, 40.0);
        state.powerups.push(PowerUp {
            pos: Vec2::new(px, -lead * 1.4),
            vy: speed * 0.9,
            kind,
        });
    }
}

fn enemy_fire(state: &mut SimState, dt: f32) {
    if !state.mode.damage_enabled() {
        return;
    }

    let p = state.enemy_bullet_rate * dt;
    let vy = state.speed * ENEMY_BULLET_SPEED_MUL;
    for enemy in &state.enemies {
        if state.rng.chance(p) {
            state.enemy_bullets.push(Bullet {
                pos: enemy.pos + Vec2::new(0.0, 10.0),
                vy,
                radius: BULLET_RADIUS,
            });
        }
    }
}

fn move_entities(state: &mut SimState, dt: f32) {
    for enemy in &mut state.enemies {
        enemy.age += dt;
        enemy.pos.y += enemy.vel.y * dt;
        // Weave: phase depends on age and lane position
        enemy.pos.x += ((enemy.age + enemy.pos.x * 0.01) * 3.0).sin() * 40.0 * dt;
    }
    for orb in &mut state.orbs {
        orb.pos.y += orb.vy * dt;
    }
    for bullet in state.bullets.iter_mut().chain(state.enemy_bullets.iter_mut()) {
        bullet.pos.y += bullet.vy * dt;
    }
    for powerup in &mut state.powerups {
        powerup.pos.y += powerup.vy * dt;
    }
}

fn resolve_bullet_hits(state: &mut SimState) {
    // Walk both lists backwards so removals never shift unvisited entries
    let mut i = state.enemies.len();
    while i > 0 {
        i -= 1;
        let mut j = state.bullets.len();
        while j > 0 {
            j -= 1;
            let enemy = &state.enemies[i];
            let bullet = &state.bullets[j];
            if !circle_hit(enemy.pos, enemy.radius, bullet.pos, bullet.radius) {
                continue;
            }

            let bullet = state.bullets.remove(j);
            let enemy = &mut state.enemies[i];
            enemy.hp = enemy.hp.saturating_sub(1);
            let destroyed = enemy.hp == 0;
            emit_burst(&mut state.particles, &mut state.rng, bullet.pos, &IMPACT_BURST);

            if destroyed {
                let enemy = state.enemies.remove(i);
                state.score += ENEMY_SCORE;
                explode(state, enemy.pos);
                break;
            }
        }
    }
}

fn collect_orbs(state: &mut SimState) {
    let center = state.player.pos;
    let reach = state.player.radius + 4.0;
    let cull_y = state.height + ORB_CULL_MARGIN;

    let mut i = state.orbs.len();
    while i > 0 {
        i -= 1;
        let orb = &state.orbs[i];
        if orb.pos.y > cull_y {
            state.orbs.remove(i);
            continue;
        }
        if circle_hit(center, reach, orb.pos, orb.radius) {
            let orb = state.orbs.remove(i);
            state.score += ORB_SCORE;
            emit_burst(&mut state.particles, &mut state.rng, orb.pos, &ORB_BURST);
            state.events.push(GameEvent::OrbCollected);
        }
    }
}

fn collect_powerups(state: &mut SimState) {
    let center = state.player.pos;
    let reach = state.player.radius + 6.0;
    let cull_y = state.height + POWERUP_CULL_MARGIN;

    let mut i = state.powerups.len();
    while i > 0 {
        i -= 1;
        let powerup = &state.powerups[i];
        if powerup.pos.y > cull_y {
            state.powerups.remove(i);
            continue;
        }
        if !circle_hit(center, reach, powerup.pos, POWERUP_RADIUS) {
            continue;
        }

        let kind = state.powerups.remove(i).kind;
        match kind {
            PowerUpKind::Heal => {
                let player = &mut state.player;
                player.hp = (player.hp + 1).min(player.max_hp);
            }
            PowerUpKind::Stealth => state.player.stealth = STEALTH_POWERUP_SECS,
            PowerUpKind::Aura => {
                aura_blast(state, center, AURA_RADIUS);
                state.score += AURA_SCORE;
            }
        }
        state.events.push(GameEvent::PowerUpCollected(kind));
    }
}

/// Destroy every enemy touching the blast circle, +25 each
fn aura_blast(state: &mut SimState, center: Vec2, radius: f32) {
    let hits = overlapping_desc(center, radius, &state.enemies, |e| (e.pos, e.radius));
    for i in hits {
        let enemy = state.enemies.remove(i);
        state.score += ENEMY_SCORE;
        explode(state, enemy.pos);
    }
}

fn apply_damage(state: &mut SimState) {
    if !state.mode.damage_enabled() || state.player.is_stealthed() {
        return;
    }
    let center = state.player.pos;
    let radius = state.player.radius;

    // At most one hit per hazard category per step
    if let Some(i) = state
        .enemy_bullets
        .iter()
        .rposition(|b| circle_hit(center, radius, b.pos, b.radius))
    {
        state.enemy_bullets.remove(i);
        hurt(state, 1);
    }

    // A bullet hit above already granted stealth
    if !state.alive || state.player.is_stealthed() {
        return;
    }

    if let Some(i) = state
        .enemies
        .iter()
        .rposition(|e| circle_hit(center, radius, e.pos, e.radius))
    {
        let enemy = state.enemies.remove(i);
        explode(state, enemy.pos);
        hurt(state, 1);
    }
}

fn decay_particles(state: &mut SimState, dt: f32) {
    for particle in &mut state.particles {
        particle.pos += particle.vel * dt;
        particle.life -= dt;
    }
    state.particles.retain(|p| p.life > 0.0);
}

fn cull_offscreen(state: &mut SimState) {
    let h = state.height;
    state.enemies.retain(|e| e.pos.y < h + ENEMY_CULL_MARGIN);
    state.bullets.retain(|b| b.pos.y > -BULLET_CULL_MARGIN);
    state
        .enemy_bullets
        .retain(|b| b.pos.y < h + ENEMY_BULLET_CULL_MARGIN);
}

fn decay_timers(state: &mut SimState, dt: f32) {
    let player = &mut state.player;
    if player.stealth > 0.0 {
        player.stealth = (player.stealth - dt).max(0.0);
    }
    state.shake = (state.shake - SHAKE_DECAY * dt).max(0.0);
}

fn explode(state: &mut SimState, pos: Vec2) {
    state.shake = EXPLOSION_SHAKE;
    emit_burst(&mut state.particles, &mut state.rng, pos, &EXPLOSION_BURST);
    state.events.push(GameEvent::EnemyDestroyed { pos });
}

fn emit_burst(particles: &mut Vec<Particle>, rng: &mut Mulberry32, pos: Vec2, burst: &Burst) {
    particles.reserve(burst.count);
    for _ in 0..burst.count {
        let vel = Vec2::new(rng.spread(burst.spread), rng.spread(burst.spread));
        let life = burst.life + rng.unit() * burst.life_jitter;
        particles.push(Particle {
            pos,
            vel,
            life,
            color: burst.color,
        });
    }
}
