//! Audio system using the Web Audio API
//!
//! Procedurally generated sound effects, no sample files. The audio context
//! is never created up front: browsers only allow it after a user gesture, so
//! the host calls [`AudioManager::unlock`] from its click/key handlers.

use crate::settings::Settings;
use crate::sim::{GameEvent, PowerUpKind};

/// Master gain at full volume
pub const MASTER_GAIN: f32 = 0.25;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Twin shot fired
    Laser,
    /// Enemy destroyed
    Explosion,
    /// Orb collected
    Pickup,
    /// Power-up collected, pitched per variant
    Power(PowerUpKind),
    /// Player took damage
    Hurt,
    /// UI click (run start)
    Click,
}

impl SoundEffect {
    /// Sound cue for a simulation event
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Fired => SoundEffect::Laser,
            GameEvent::EnemyDestroyed { .. } => SoundEffect::Explosion,
            GameEvent::OrbCollected => SoundEffect::Pickup,
            GameEvent::PowerUpCollected(kind) => SoundEffect::Power(*kind),
            GameEvent::PlayerHurt { .. } => SoundEffect::Hurt,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    backend: Option<web::WebAudio>,
    unlocked: bool,
    enabled: bool,
    /// User volume (0.0 - 1.0), scales [`MASTER_GAIN`]
    volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    /// Silent until [`Self::unlock`] is called
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            backend: None,
            unlocked: false,
            enabled: true,
            volume: 1.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.enabled = settings.sfx_enabled;
        self.volume = settings.master_volume.clamp(0.0, 1.0);
        self.sync_gain();
    }

    /// Create (or resume) the audio context. Call from a user gesture only.
    pub fn unlock(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if self.backend.is_none() {
                self.backend = web::WebAudio::new();
                if self.backend.is_none() {
                    log::warn!("Failed to create AudioContext - audio disabled");
                } else {
                    log::info!("Audio unlocked");
                }
            }
            if let Some(backend) = &self.backend {
                backend.resume();
            }
            self.unlocked = self.backend.is_some();
            self.sync_gain();
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            // No audio device natively; effects are accepted and dropped
            self.unlocked = true;
        }
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked
    }

    pub fn set_enabled(&mut self, on: bool) {
        self.enabled = on;
        self.sync_gain();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
        self.sync_gain();
    }

    /// Gain applied to the master node
    pub fn effective_gain(&self) -> f32 {
        if self.enabled {
            MASTER_GAIN * self.volume
        } else {
            0.0
        }
    }

    fn sync_gain(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(backend) = &self.backend {
            backend.set_gain(self.effective_gain());
        }
    }

    /// Play a sound effect. Returns false when it was dropped (locked, muted
    /// or no audio device).
    pub fn play(&self, effect: SoundEffect) -> bool {
        if !self.unlocked || self.effective_gain() <= 0.0 {
            return false;
        }

        #[cfg(target_arch = "wasm32")]
        {
            let Some(backend) = &self.backend else {
                return false;
            };
            backend.play(effect);
        }

        #[cfg(not(target_arch = "wasm32"))]
        log::trace!("sfx {:?}", effect);

        true
    }

    /// Play the cue for every drained simulation event, returns how many sounded
    pub fn play_events(&self, events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| self.play(SoundEffect::for_event(e)))
            .count()
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use web_sys::{
        AudioBuffer, AudioContext, AudioContextState, BiquadFilterType, GainNode, OscillatorType,
    };

    use super::SoundEffect;
    use crate::sim::PowerUpKind;

    const SAMPLE_RATE: f32 = 44100.0;
    const NOISE_SECS: f32 = 0.3;

    pub struct WebAudio {
        ctx: AudioContext,
        master: GainNode,
        noise: Option<AudioBuffer>,
    }

    impl WebAudio {
        pub fn new() -> Option<Self> {
            let ctx = AudioContext::new().ok()?;
            let master = ctx.create_gain().ok()?;
            master.gain().set_value(super::MASTER_GAIN);
            master.connect_with_audio_node(&ctx.destination()).ok()?;
            let noise = noise_buffer(&ctx);
            Some(Self { ctx, master, noise })
        }

        pub fn resume(&self) {
            if self.ctx.state() == AudioContextState::Suspended {
                let _ = self.ctx.resume();
            }
        }

        pub fn set_gain(&self, gain: f32) {
            self.master.gain().set_value(gain);
        }

        pub fn play(&self, effect: SoundEffect) {
            match effect {
                SoundEffect::Laser => self.play_laser(),
                SoundEffect::Explosion => self.play_explosion(),
                SoundEffect::Pickup => self.play_sweep(OscillatorType::Triangle, 440.0, 880.0, 0.12),
                SoundEffect::Power(kind) => {
                    let base = match kind {
                        PowerUpKind::Aura => 300.0,
                        PowerUpKind::Stealth => 220.0,
                        PowerUpKind::Heal => 260.0,
                    };
                    self.play_sweep(OscillatorType::Sawtooth, base, base * 2.0, 0.25);
                }
                SoundEffect::Hurt => self.play_sweep(OscillatorType::Sawtooth, 160.0, 80.0, 0.2),
                SoundEffect::Click => self.play_sweep(OscillatorType::Square, 1200.0, 600.0, 0.05),
            }
        }

        /// Gain node with a 10 ms attack and exponential release, wired to master
        fn envelope(&self, duration: f64) -> Option<(GainNode, f64)> {
            let gain = self.ctx.create_gain().ok()?;
            let t = self.ctx.current_time();
            gain.gain().set_value_at_time(0.0001, t).ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(1.0, t + 0.01)
                .ok()?;
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, t + duration)
                .ok()?;
            gain.connect_with_audio_node(&self.master).ok()?;
            Some((gain, t))
        }

        /// Single oscillator pitch sweep
        fn play_sweep(&self, osc_type: OscillatorType, from: f32, to: f32, duration: f64) {
            let Some((gain, t)) = self.envelope(duration) else {
                return;
            };
            let Ok(osc) = self.ctx.create_oscillator() else {
                return;
            };
            osc.set_type(osc_type);
            osc.frequency().set_value_at_time(from, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(to, t + duration)
                .ok();
            if osc.connect_with_audio_node(&gain).is_err() {
                return;
            }
            osc.start().ok();
            osc.stop_with_when(t + duration + 0.01).ok();
        }

        /// Laser - square chirp through a highpass
        fn play_laser(&self) {
            let Some((gain, t)) = self.envelope(0.12) else {
                return;
            };
            let (Ok(osc), Ok(filter)) = (self.ctx.create_oscillator(), self.ctx.create_biquad_filter())
            else {
                return;
            };
            osc.set_type(OscillatorType::Square);
            filter.set_type(BiquadFilterType::Highpass);
            filter.frequency().set_value(400.0);
            osc.frequency().set_value_at_time(900.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(280.0, t + 0.12)
                .ok();

            if osc.connect_with_audio_node(&filter).is_err()
                || filter.connect_with_audio_node(&gain).is_err()
            {
                return;
            }
            osc.start().ok();
            osc.stop_with_when(t + 0.13).ok();
        }

        /// Explosion - decaying noise through a closing lowpass
        fn play_explosion(&self) {
            let Some(noise) = &self.noise else {
                return;
            };
            let Some((gain, t)) = self.envelope(0.5) else {
                return;
            };
            let (Ok(source), Ok(filter)) =
                (self.ctx.create_buffer_source(), self.ctx.create_biquad_filter())
            else {
                return;
            };
            source.set_buffer(Some(noise));
            filter.set_type(BiquadFilterType::Lowpass);
            filter.frequency().set_value_at_time(800.0, t).ok();
            filter
                .frequency()
                .exponential_ramp_to_value_at_time(120.0, t + 0.45)
                .ok();

            if source.connect_with_audio_node(&filter).is_err()
                || filter.connect_with_audio_node(&gain).is_err()
            {
                return;
            }
            source.start().ok();
            source.stop_with_when(t + 0.5).ok();
        }
    }

    /// 300 ms of white noise with a quadratic fade, shared by every explosion
    fn noise_buffer(ctx: &AudioContext) -> Option<AudioBuffer> {
        let len = (NOISE_SECS * SAMPLE_RATE) as u32;
        let buffer = ctx.create_buffer(1, len, SAMPLE_RATE).ok()?;
        let mut rng = Pcg32::seed_from_u64(0x6e6f_6973_65);
        let mut data: Vec<f32> = (0..len)
            .map(|i| {
                let fade = 1.0 - i as f32 / len as f32;
                rng.random_range(-1.0f32..1.0) * fade * fade
            })
            .collect();
        buffer.copy_to_channel(&mut data, 0).ok()?;
        Some(buffer)
    }
}
