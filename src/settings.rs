//! Player preferences
//!
//! Persisted in LocalStorage, separate from the best scores.

use serde::{Deserialize, Serialize};

use crate::sim::{Difficulty, Mode};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Difficulty selected for the next run
    pub difficulty: Difficulty,
    /// Mode selected for the next run
    pub mode: Mode,

    // === Audio ===
    /// Sound effects on/off
    pub sfx_enabled: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,

    // === Visual Effects ===
    /// Screen shake on explosions/impacts
    pub screen_shake: bool,

    // === Accessibility ===
    /// Reduced motion (no shake)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            mode: Mode::Endless,
            sfx_enabled: true,
            master_volume: 1.0,
            screen_shake: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_glide_settings";

    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Set the volume, clamped to 0.0 - 1.0
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = if vol.is_nan() { 1.0 } else { vol.clamp(0.0, 1.0) };
    }

    /// Parse stored JSON; anything unreadable gives the defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.set_master_volume(settings.master_volume);
                settings
            }
            Err(err) => {
                log::debug!("Ignoring stored settings: {}", err);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.difficulty, Difficulty::Normal);
        assert_eq!(settings.mode, Mode::Endless);
        assert!(settings.sfx_enabled);
        assert!(settings.effective_screen_shake());
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"mode":"zen","master_volume":4.0}"#);
        assert_eq!(settings.mode, Mode::Zen);
        assert_eq!(settings.difficulty, Difficulty::Normal);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_slider_volume_clamped() {
        let mut settings = Settings::default();
        settings.set_master_volume(0.35);
        assert_eq!(settings.master_volume, 0.35);
        settings.set_master_volume(1.5);
        assert_eq!(settings.master_volume, 1.0);
        settings.set_master_volume(-0.2);
        assert_eq!(settings.master_volume, 0.0);
        settings.set_master_volume(f32::NAN);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_garbage_json_gives_defaults() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
        assert_eq!(
            Settings::from_json(r#"{"mode":"versus"}"#),
            Settings::default()
        );
    }
}
