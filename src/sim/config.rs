//! Difficulty and mode tables
//!
//! Pure configuration lookups. Keys coming from the host (select boxes,
//! LocalStorage) never fail to parse: unknown values fall back to
//! `normal` / `endless`.

use serde::{Deserialize, Serialize};

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Chill,
    #[default]
    Normal,
    Hyper,
}

/// Per-difficulty scroll parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyParams {
    /// Base scroll speed (px/s)
    pub speed: f32,
    /// Spawn-rate multiplier
    pub spawn: f32,
    /// Maximum scroll speed (px/s)
    pub max_speed: f32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Chill, Difficulty::Normal, Difficulty::Hyper];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Chill => "chill",
            Difficulty::Normal => "normal",
            Difficulty::Hyper => "hyper",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "chill" => Some(Difficulty::Chill),
            "normal" => Some(Difficulty::Normal),
            "hyper" => Some(Difficulty::Hyper),
            _ => None,
        }
    }

    /// Lookup by key, falling back to `normal` for anything unrecognized
    pub fn from_key(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::debug!("Unknown difficulty {:?}, using normal", s);
            Difficulty::Normal
        })
    }

    pub fn params(&self) -> DifficultyParams {
        match self {
            Difficulty::Chill => DifficultyParams {
                speed: 220.0,
                spawn: 0.80,
                max_speed: 650.0,
            },
            Difficulty::Normal => DifficultyParams {
                speed: 280.0,
                spawn: 1.00,
                max_speed: 800.0,
            },
            Difficulty::Hyper => DifficultyParams {
                speed: 360.0,
                spawn: 1.30,
                max_speed: 950.0,
            },
        }
    }
}

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Endless,
    Onslaught,
    BulletHell,
    Waves,
    /// No damage from any source
    Zen,
}

/// Per-mode spawn and fire parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeParams {
    /// Probability per second that a given enemy fires
    pub enemy_bullets: f32,
    /// Spawn-rate multiplier (stacks with the difficulty's)
    pub spawn_mul: f32,
}

/// Seconds of run time per wave level
pub const WAVE_PERIOD: f32 = 20.0;
/// Spawn multiplier growth per wave level
pub const WAVE_SPAWN_GROWTH: f32 = 1.12;
/// Base speed growth per wave level
pub const WAVE_SPEED_GROWTH: f32 = 1.06;

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Endless,
        Mode::Onslaught,
        Mode::BulletHell,
        Mode::Waves,
        Mode::Zen,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Endless => "endless",
            Mode::Onslaught => "onslaught",
            Mode::BulletHell => "bullethell",
            Mode::Waves => "waves",
            Mode::Zen => "zen",
        }
    }

    /// Display name for menus
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Endless => "Endless",
            Mode::Onslaught => "Onslaught",
            Mode::BulletHell => "Bullet Hell",
            Mode::Waves => "Waves",
            Mode::Zen => "Zen",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "endless" => Some(Mode::Endless),
            "onslaught" => Some(Mode::Onslaught),
            "bullethell" | "bullet-hell" => Some(Mode::BulletHell),
            "waves" => Some(Mode::Waves),
            "zen" => Some(Mode::Zen),
            _ => None,
        }
    }

    /// Lookup by key, falling back to `endless` for anything unrecognized
    pub fn from_key(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            log::debug!("Unknown mode {:?}, using endless", s);
            Mode::Endless
        })
    }

    pub fn params(&self) -> ModeParams {
        let (enemy_bullets, spawn_mul) = match self {
            Mode::Endless => (0.15, 1.0),
            Mode::Onslaught => (0.20, 1.6),
            Mode::BulletHell => (0.45, 1.2),
            Mode::Waves => (0.25, 0.9),
            Mode::Zen => (0.0, 0.7),
        };
        ModeParams {
            enemy_bullets,
            spawn_mul,
        }
    }

    /// Whether hazards can damage the player in this mode
    pub fn damage_enabled(&self) -> bool {
        *self != Mode::Zen
    }

    /// Whether the 20-second wave escalation applies
    pub fn escalates(&self) -> bool {
        *self == Mode::Waves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_fall_back() {
        assert_eq!(Difficulty::from_key("nightmare"), Difficulty::Normal);
        assert_eq!(Difficulty::from_key(""), Difficulty::Normal);
        assert_eq!(Mode::from_key("versus"), Mode::Endless);
        assert_eq!(Mode::from_key("HYPER"), Mode::Endless);
    }

    #[test]
    fn test_keys_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_key(d.as_str()), d);
        }
        for m in Mode::ALL {
            assert_eq!(Mode::from_key(m.as_str()), m);
        }
        assert_eq!(Mode::from_key(" Zen "), Mode::Zen);
    }

    #[test]
    fn test_param_tables() {
        let hyper = Difficulty::Hyper.params();
        assert_eq!(hyper.speed, 360.0);
        assert_eq!(hyper.max_speed, 950.0);
        assert_eq!(Mode::BulletHell.params().enemy_bullets, 0.45);
        assert_eq!(Mode::Zen.params().enemy_bullets, 0.0);
        assert!(!Mode::Zen.damage_enabled());
        assert!(Mode::Waves.escalates());
        assert!(!Mode::Endless.escalates());
    }

    #[test]
    fn test_serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Mode::BulletHell).unwrap();
        assert_eq!(json, "\"bullethell\"");
        let d: Difficulty = serde_json::from_str("\"chill\"").unwrap();
        assert_eq!(d, Difficulty::Chill);
    }
}
