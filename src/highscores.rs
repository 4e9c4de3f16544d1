//! Best score per mode
//!
//! One number per mode, persisted to LocalStorage under its own key so a mode
//! switch only has to read a single entry.

use std::collections::HashMap;

use crate::sim::Mode;

/// Best scores, keyed by mode
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighScores {
    best: HashMap<Mode, u64>,
}

impl HighScores {
    /// LocalStorage key prefix (used only in wasm32)
    #[allow(dead_code)]
    const KEY_PREFIX: &'static str = "neon_glide:best:";

    /// Create an empty table
    pub fn new() -> Self {
        Self {
            best: HashMap::new(),
        }
    }

    /// LocalStorage key for a mode
    pub fn storage_key(mode: Mode) -> String {
        format!("{}{}", Self::KEY_PREFIX, mode.as_str())
    }

    /// Best score for a mode (0 when none recorded)
    pub fn best(&self, mode: Mode) -> u64 {
        self.best.get(&mode).copied().unwrap_or(0)
    }

    /// Record a finished run. Returns true when it beats the stored best.
    pub fn record(&mut self, mode: Mode, score: u64) -> bool {
        if score <= self.best(mode) {
            return false;
        }
        self.best.insert(mode, score);
        true
    }

    /// Parse a stored value. Missing or malformed entries read as 0.
    pub fn parse_stored(raw: Option<&str>) -> u64 {
        let Some(raw) = raw.map(str::trim) else {
            return 0;
        };
        if let Ok(score) = raw.parse::<u64>() {
            return score;
        }
        match raw.parse::<f64>() {
            Ok(score) if score.is_finite() && score > 0.0 => score.round() as u64,
            _ => 0,
        }
    }

    /// Load every mode's best from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let mut scores = Self::new();
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            for mode in Mode::ALL {
                let raw = storage.get_item(&Self::storage_key(mode)).ok().flatten();
                let score = Self::parse_stored(raw.as_deref());
                if score > 0 {
                    scores.best.insert(mode, score);
                }
            }
            log::info!("Loaded best scores for {} modes", scores.best.len());
        }

        scores
    }

    /// Save one mode's best to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self, mode: Mode) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let score = self.best(mode);
            let _ = storage.set_item(&Self::storage_key(mode), &score.to_string());
            log::info!("Best score saved ({}: {})", mode.as_str(), score);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self, _mode: Mode) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_max_per_mode() {
        let mut scores = HighScores::new();
        assert!(scores.record(Mode::Endless, 120));
        assert!(!scores.record(Mode::Endless, 80));
        assert!(!scores.record(Mode::Endless, 120));
        assert!(scores.record(Mode::Endless, 121));
        assert_eq!(scores.best(Mode::Endless), 121);
        assert_eq!(scores.best(Mode::Zen), 0);
    }

    #[test]
    fn test_zero_never_records() {
        let mut scores = HighScores::new();
        assert!(!scores.record(Mode::Waves, 0));
    }

    #[test]
    fn test_storage_keys() {
        assert_eq!(
            HighScores::storage_key(Mode::BulletHell),
            "neon_glide:best:bullethell"
        );
    }

    #[test]
    fn test_parse_stored_is_lenient() {
        assert_eq!(HighScores::parse_stored(None), 0);
        assert_eq!(HighScores::parse_stored(Some("")), 0);
        assert_eq!(HighScores::parse_stored(Some("1234")), 1234);
        assert_eq!(HighScores::parse_stored(Some(" 99.6 ")), 100);
        assert_eq!(HighScores::parse_stored(Some("-5")), 0);
        assert_eq!(HighScores::parse_stored(Some("NaN")), 0);
        assert_eq!(HighScores::parse_stored(Some("lots")), 0);
    }
}
