//! Host input mapping
//!
//! Keyboard codes, pointer and on-screen pad presses are folded into a
//! [`Controls`] record. Keys that drive the run lifecycle come back as a
//! [`KeyCommand`] for the host to apply, so the mapping stays testable
//! without a browser.

use crate::control::Game;
use crate::sim::InputIntent;

/// Keys whose default action (page scroll) is suppressed
const SCROLL_KEYS: [&str; 9] = [
    "Space",
    "ArrowLeft",
    "ArrowRight",
    "ArrowUp",
    "ArrowDown",
    "PageDown",
    "PageUp",
    "Home",
    "End",
];

/// Should the host call `preventDefault` for this key code
pub fn blocks_scroll(code: &str) -> bool {
    SCROLL_KEYS.contains(&code)
}

/// Lifecycle action requested by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Nothing for the host to do
    None,
    /// Begin a run (host also unlocks audio)
    Start,
    Resume,
    TogglePause,
}

/// On-screen pad buttons for touch devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadButton {
    Left,
    Fire,
    Right,
}

impl PadButton {
    pub const ALL: [PadButton; 3] = [PadButton::Left, PadButton::Fire, PadButton::Right];

    /// DOM id of the button
    pub fn element_id(&self) -> &'static str {
        match self {
            PadButton::Left => "pad-left",
            PadButton::Fire => "pad-fire",
            PadButton::Right => "pad-right",
        }
    }
}

/// Raw input state, folded into an [`InputIntent`] every frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub pointer_x: Option<f32>,
    pub pointer_firing: bool,
}

impl Controls {
    pub fn intent(&self) -> InputIntent {
        InputIntent {
            left: self.left,
            right: self.right,
            fire: self.fire,
            pointer_x: self.pointer_x,
            pointer_firing: self.pointer_firing,
        }
    }

    /// Release everything (focus lost, run ended)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Key press. Auto-repeats are ignored so a held Space never restarts.
    pub fn key_down(&mut self, code: &str, repeat: bool, game: &Game) -> KeyCommand {
        if repeat {
            return KeyCommand::None;
        }
        if game.is_input_locked() && matches!(code, "Space" | "Enter" | "KeyP") {
            return KeyCommand::None;
        }

        match code {
            "ArrowLeft" | "KeyA" => self.left = true,
            "ArrowRight" | "KeyD" => self.right = true,
            "Space" => {
                if !game.is_running() {
                    return KeyCommand::Start;
                } else if game.is_paused() {
                    return KeyCommand::Resume;
                }
                self.fire = true;
            }
            "Enter" => {
                if !game.is_running() {
                    return KeyCommand::Start;
                } else if game.is_paused() {
                    return KeyCommand::Resume;
                }
            }
            "KeyP" => return KeyCommand::TogglePause,
            _ => {}
        }
        KeyCommand::None
    }

    pub fn key_up(&mut self, code: &str) {
        match code {
            "ArrowLeft" | "KeyA" => self.left = false,
            "ArrowRight" | "KeyD" => self.right = false,
            "Space" => self.fire = false,
            _ => {}
        }
    }

    /// Press on the canvas: steer toward `x` and fire
    pub fn pointer_down(&mut self, x: f32) {
        self.pointer_firing = true;
        self.pointer_x = Some(x);
    }

    /// Hover steers even without a press
    pub fn pointer_move(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    pub fn pointer_release(&mut self) {
        self.pointer_firing = false;
        self.pointer_x = None;
    }

    pub fn pad(&mut self, button: PadButton, pressed: bool) {
        match button {
            PadButton::Left => self.left = pressed,
            PadButton::Fire => {
                self.fire = pressed;
                self.pointer_firing = pressed;
            }
            PadButton::Right => self.right = pressed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> Game {
        Game::new(11, 480.0, 800.0, 1.0)
    }

    /// Apply a key press the way the browser host does
    fn press(controls: &mut Controls, game: &mut Game, code: &str, repeat: bool) {
        match controls.key_down(code, repeat, game) {
            KeyCommand::Start => {
                game.start();
            }
            KeyCommand::Resume => game.resume(),
            KeyCommand::TogglePause => game.toggle_pause(),
            KeyCommand::None => {}
        }
    }

    #[test]
    fn test_held_space_does_not_restart() {
        let mut game = game();
        let mut controls = Controls::default();
        press(&mut controls, &mut game, "Space", false);
        assert!(game.is_running());
        game.drain_events();

        for _ in 0..30 {
            game.advance(1.0 / 60.0, &controls.intent());
            press(&mut controls, &mut game, "Space", true);
        }
        let seed = game.seed();
        assert!(game.state().time > 0.4);
        assert!(game.drain_events().is_empty());

        // A fresh press while running fires instead of starting
        press(&mut controls, &mut game, "Space", false);
        assert_eq!(game.seed(), seed);
        assert!(controls.fire);
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_space_resumes_when_paused() {
        let mut game = game();
        let mut controls = Controls::default();
        game.start();
        press(&mut controls, &mut game, "KeyP", false);
        assert!(game.is_paused());

        press(&mut controls, &mut game, "Space", false);
        assert!(!game.is_paused());
        assert!(!controls.fire);
    }

    #[test]
    fn test_enter_never_fires() {
        let mut game = game();
        let mut controls = Controls::default();
        assert_eq!(controls.key_down("Enter", false, &game), KeyCommand::Start);
        game.start();
        assert_eq!(controls.key_down("Enter", false, &game), KeyCommand::None);
        assert!(!controls.fire);
    }

    #[test]
    fn test_lock_swallows_lifecycle_keys_only() {
        let mut game = game();
        game.set_input_lock(true);
        let mut controls = Controls::default();
        for code in ["Space", "Enter", "KeyP"] {
            assert_eq!(controls.key_down(code, false, &game), KeyCommand::None);
        }
        assert_eq!(controls.key_down("KeyA", false, &game), KeyCommand::None);
        assert!(controls.left);
        assert!(!controls.fire);
    }

    #[test]
    fn test_return_to_landing_holds_run() {
        let mut game = game();
        let mut controls = Controls::default();
        press(&mut controls, &mut game, "Enter", false);
        game.advance(1.0 / 60.0, &controls.intent());
        let seed = game.seed();

        // Landing menu shown over a paused run
        game.pause();
        game.set_input_lock(true);
        for code in ["Space", "Enter", "KeyP"] {
            press(&mut controls, &mut game, code, false);
        }
        assert!(game.is_paused());
        assert_eq!(game.seed(), seed);

        // "Play" from the landing menu starts over
        game.set_input_lock(false);
        assert!(game.start());
        assert_ne!(game.seed(), seed);
        assert!(!game.is_paused());
    }

    #[test]
    fn test_key_up_releases() {
        let game = game();
        let mut controls = Controls::default();
        controls.key_down("ArrowRight", false, &game);
        controls.key_down("KeyA", false, &game);
        assert!(controls.left && controls.right);
        controls.key_up("KeyD");
        controls.key_up("ArrowLeft");
        assert_eq!(controls, Controls::default());
    }

    #[test]
    fn test_pointer_hover_and_release() {
        let mut controls = Controls::default();
        controls.pointer_move(120.0);
        assert_eq!(controls.intent().pointer_x, Some(120.0));
        assert!(!controls.intent().firing());

        controls.pointer_down(200.0);
        assert!(controls.intent().firing());
        controls.pointer_release();
        assert_eq!(controls.intent().pointer_x, None);
        assert!(!controls.intent().firing());
    }

    #[test]
    fn test_pad_buttons() {
        let mut controls = Controls::default();
        controls.pad(PadButton::Left, true);
        controls.pad(PadButton::Fire, true);
        let intent = controls.intent();
        assert!(intent.left && intent.fire && intent.pointer_firing && !intent.right);

        for button in PadButton::ALL {
            controls.pad(button, false);
        }
        assert_eq!(controls, Controls::default());
        assert_eq!(PadButton::Fire.element_id(), "pad-fire");
    }

    #[test]
    fn test_scroll_keys() {
        assert!(blocks_scroll("Space"));
        assert!(blocks_scroll("PageDown"));
        assert!(!blocks_scroll("KeyP"));
    }
}
