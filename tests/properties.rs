//! Property tests over whole runs driven by arbitrary input

use neon_glide::sim::{Difficulty, InputIntent, Mode, SimState, step};
use neon_glide::{FrameOutcome, Game};
use proptest::prelude::*;

fn difficulty() -> impl Strategy<Value = Difficulty> {
    proptest::sample::select(Difficulty::ALL.to_vec())
}

fn mode() -> impl Strategy<Value = Mode> {
    proptest::sample::select(Mode::ALL.to_vec())
}

fn intent() -> impl Strategy<Value = InputIntent> {
    (
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(-100.0f32..600.0),
        any::<bool>(),
    )
        .prop_map(|(left, right, fire, pointer_x, pointer_firing)| InputIntent {
            left,
            right,
            fire,
            pointer_x,
            pointer_firing,
        })
}

/// A short script of (input, frame count, dt) segments
fn script() -> impl Strategy<Value = Vec<(InputIntent, u16, f32)>> {
    proptest::collection::vec((intent(), 1u16..90, 0.0f32..0.05), 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn run_invariants_hold(
        seed in any::<u32>(),
        difficulty in difficulty(),
        mode in mode(),
        script in script(),
    ) {
        let mut state = SimState::new(seed, difficulty, mode, 480.0, 800.0, 1.0);
        let mut last_score = state.score;
        let mut last_speed = state.speed;

        for (input, frames, dt) in script {
            for _ in 0..frames {
                let hp_before = state.player.hp;
                let stealth_before = state.player.stealth;
                step(&mut state, &input, dt);

                let p = &state.player;
                prop_assert_eq!(state.alive, p.hp > 0);
                if stealth_before > 0.0 {
                    prop_assert!(p.hp >= hp_before, "hit through stealth");
                }
                prop_assert!(p.hp <= p.max_hp);
                prop_assert!(p.stealth >= 0.0);
                prop_assert!(p.pos.x >= 0.0 && p.pos.x <= state.width);
                prop_assert!(state.score >= last_score);
                prop_assert!(state.speed >= last_speed);
                prop_assert!(state.speed <= state.max_speed() + 1e-3);
                prop_assert!(state.shake >= 0.0);

                last_score = state.score;
                last_speed = state.speed;
            }
        }

        if mode == Mode::Zen {
            prop_assert!(state.alive);
            prop_assert_eq!(state.player.hp, state.player.max_hp);
        }
    }

    #[test]
    fn same_seed_and_input_replay_identically(
        seed in any::<u32>(),
        difficulty in difficulty(),
        mode in mode(),
        script in script(),
    ) {
        let mut a = SimState::new(seed, difficulty, mode, 390.0, 844.0, 3.0);
        let mut b = SimState::new(seed, difficulty, mode, 390.0, 844.0, 3.0);

        for (input, frames, dt) in script {
            for _ in 0..frames {
                step(&mut a, &input, dt);
                step(&mut b, &input, dt);
            }
            prop_assert_eq!(a.drain_events(), b.drain_events());
        }

        prop_assert_eq!(a.score.to_bits(), b.score.to_bits());
        prop_assert_eq!(a.player.pos, b.player.pos);
        prop_assert_eq!(a.player.hp, b.player.hp);
        prop_assert_eq!(a.enemies.len(), b.enemies.len());
        prop_assert_eq!(a.particles.len(), b.particles.len());
        prop_assert_eq!(a.alive, b.alive);
    }

    #[test]
    fn game_over_reported_once(
        seed in any::<u32>(),
        script in script(),
    ) {
        let mut game = Game::new(seed, 480.0, 800.0, 1.0);
        game.set_difficulty("hyper");
        game.set_mode("bullethell");
        game.start();

        let mut overs = 0;
        for (input, frames, dt) in script {
            for _ in 0..frames {
                if let FrameOutcome::GameOver { .. } = game.advance(dt, &input) {
                    overs += 1;
                }
            }
        }
        prop_assert!(overs <= 1);
        if overs == 1 {
            prop_assert!(!game.is_running());
        }
    }
}
