//! Raw key events -> per-frame tick input
//!
//! Slide and reset keys are instantaneous triggers armed on key-down; roll
//! keys are held toggles tracked across press and release. OS key auto-repeat
//! is suppressed for everything, so holding an arrow key slides exactly once.

use crate::sim::tick::{SlideDir, TickInput};

/// The game controls a key event can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    SlideLeft,
    SlideRight,
    SlideUp,
    SlideDown,
    RollLeft,
    RollRight,
    RollUp,
    RollDown,
    Reset,
}

impl GameKey {
    /// Map a platform key name (browser `KeyboardEvent.key` style) to a
    /// game control
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Self::SlideLeft),
            "ArrowRight" => Some(Self::SlideRight),
            "ArrowUp" => Some(Self::SlideUp),
            "ArrowDown" => Some(Self::SlideDown),
            "a" | "A" => Some(Self::RollLeft),
            "d" | "D" => Some(Self::RollRight),
            "w" | "W" => Some(Self::RollUp),
            "s" | "S" => Some(Self::RollDown),
            "r" | "R" => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Accumulates key events between frames and hands the simulation one
/// `TickInput` per frame
#[derive(Debug, Clone, Default)]
pub struct InputTranslator {
    pending_slide: Option<SlideDir>,
    pending_reset: bool,
    roll_left: bool,
    roll_right: bool,
    roll_up: bool,
    roll_down: bool,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw key event; `repeat` is the OS auto-repeat flag
    pub fn key_event(&mut self, key: GameKey, pressed: bool, repeat: bool) {
        if repeat {
            return;
        }
        match key {
            GameKey::SlideLeft if pressed => self.pending_slide = Some(SlideDir::Left),
            GameKey::SlideRight if pressed => self.pending_slide = Some(SlideDir::Right),
            GameKey::SlideUp if pressed => self.pending_slide = Some(SlideDir::Up),
            GameKey::SlideDown if pressed => self.pending_slide = Some(SlideDir::Down),
            GameKey::Reset if pressed => self.pending_reset = true,
            GameKey::RollLeft => self.roll_left = pressed,
            GameKey::RollRight => self.roll_right = pressed,
            GameKey::RollUp => self.roll_up = pressed,
            GameKey::RollDown => self.roll_down = pressed,
            _ => {}
        }
    }

    /// Drain one frame's worth of input
    ///
    /// One-shot intents (slide, reset) are consumed here exactly once; held
    /// roll flags persist until their key releases.
    pub fn take_frame_input(&mut self) -> TickInput {
        TickInput {
            slide: self.pending_slide.take(),
            reset: std::mem::take(&mut self.pending_reset),
            roll_left: self.roll_left,
            roll_right: self.roll_right,
            roll_up: self.roll_up,
            roll_down: self.roll_down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_key_arms_one_shot_intent() {
        let mut input = InputTranslator::new();
        input.key_event(GameKey::SlideRight, true, false);

        let frame = input.take_frame_input();
        assert_eq!(frame.slide, Some(SlideDir::Right));

        // Consumed; the next frame is empty
        let frame = input.take_frame_input();
        assert_eq!(frame.slide, None);
    }

    #[test]
    fn test_auto_repeat_is_suppressed() {
        let mut input = InputTranslator::new();
        input.key_event(GameKey::SlideUp, true, true);
        input.key_event(GameKey::RollLeft, true, true);

        let frame = input.take_frame_input();
        assert_eq!(frame.slide, None);
        assert!(!frame.roll_left);
    }

    #[test]
    fn test_slide_release_is_ignored() {
        let mut input = InputTranslator::new();
        input.key_event(GameKey::SlideLeft, false, false);
        assert_eq!(input.take_frame_input().slide, None);
    }

    #[test]
    fn test_roll_keys_track_held_state() {
        let mut input = InputTranslator::new();
        input.key_event(GameKey::RollUp, true, false);

        assert!(input.take_frame_input().roll_up);
        // Still held on the next frame
        assert!(input.take_frame_input().roll_up);

        input.key_event(GameKey::RollUp, false, false);
        assert!(!input.take_frame_input().roll_up);
    }

    #[test]
    fn test_later_slide_press_wins_within_a_frame() {
        let mut input = InputTranslator::new();
        input.key_event(GameKey::SlideLeft, true, false);
        input.key_event(GameKey::SlideDown, true, false);
        assert_eq!(input.take_frame_input().slide, Some(SlideDir::Down));
    }

    #[test]
    fn test_reset_is_one_shot() {
        let mut input = InputTranslator::new();
        input.key_event(GameKey::Reset, true, false);
        assert!(input.take_frame_input().reset);
        assert!(!input.take_frame_input().reset);
    }

    #[test]
    fn test_key_name_mapping() {
        assert_eq!(GameKey::from_name("ArrowLeft"), Some(GameKey::SlideLeft));
        assert_eq!(GameKey::from_name("W"), Some(GameKey::RollUp));
        assert_eq!(GameKey::from_name("r"), Some(GameKey::Reset));
        assert_eq!(GameKey::from_name("Escape"), None);
    }
}
