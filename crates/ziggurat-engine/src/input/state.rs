use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState, Modifiers};

/// Live keyboard state for one window.
///
/// Answers "is it down right now"; the per-frame transition record lives in
/// an [`InputFrame`].
#[derive(Debug, Default)]
pub struct InputState {
    /// Modifiers as of the last event that carried them.
    pub modifiers: Modifiers,

    /// Whether the window currently has focus.
    pub focused: bool,

    /// Keys held at this instant.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Folds one translated event into the state, writing key and wheel
    /// deltas to `frame`.
    pub fn apply(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = m;
            }

            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // On focus loss, clear the "down" set. Avoids stuck keys
                    // when focus changes mid-press.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = modifiers;

                match state {
                    KeyState::Pressed => {
                        // Key-repeats fail the insert and stay out of the
                        // pressed set; `keys_down` already has them.
                        if self.keys_down.insert(key) {
                            frame.keys_pressed.insert(key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(&key) {
                            frame.keys_released.insert(key);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = modifiers;
                frame.wheel_steps += delta.steps_y();
            }
        }
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Pan axes from the held arrow keys, in screen convention
    /// (+X right, +Y down). Opposite arrows cancel.
    pub fn arrow_axes(&self) -> (f32, f32) {
        let mut x = 0.0;
        let mut y = 0.0;
        if self.is_down(Key::ArrowLeft) {
            x -= 1.0;
        }
        if self.is_down(Key::ArrowRight) {
            x += 1.0;
        }
        if self.is_down(Key::ArrowUp) {
            y -= 1.0;
        }
        if self.is_down(Key::ArrowDown) {
            y += 1.0;
        }
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn press(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    fn release(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Released,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    // ── key transitions ───────────────────────────────────────────────────

    #[test]
    fn press_records_down_and_frame_delta() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply(&mut frame, press(Key::Space));

        assert!(state.is_down(Key::Space));
        assert!(frame.key_pressed(Key::Space));
    }

    #[test]
    fn repeat_press_does_not_retrigger() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply(&mut frame, press(Key::Space));
        frame.clear();
        state.apply(&mut frame, press(Key::Space));

        assert!(state.is_down(Key::Space));
        assert!(!frame.key_pressed(Key::Space));
    }

    #[test]
    fn release_clears_down_and_records_delta() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply(&mut frame, press(Key::ArrowLeft));
        state.apply(&mut frame, release(Key::ArrowLeft));

        assert!(!state.is_down(Key::ArrowLeft));
        assert!(frame.keys_released.contains(&Key::ArrowLeft));
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply(&mut frame, press(Key::ArrowUp));
        state.apply(&mut frame, InputEvent::Focused(false));

        assert!(!state.is_down(Key::ArrowUp));
        assert!(!state.focused);
    }

    // ── arrow axes ────────────────────────────────────────────────────────

    #[test]
    fn arrow_axes_follow_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply(&mut frame, press(Key::ArrowRight));
        state.apply(&mut frame, press(Key::ArrowUp));

        assert_eq!(state.arrow_axes(), (1.0, -1.0));
    }

    #[test]
    fn opposite_arrows_cancel() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply(&mut frame, press(Key::ArrowLeft));
        state.apply(&mut frame, press(Key::ArrowRight));

        assert_eq!(state.arrow_axes(), (0.0, 0.0));
    }

    // ── wheel ─────────────────────────────────────────────────────────────

    #[test]
    fn wheel_steps_accumulate_across_events() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        let m = Modifiers::default();
        state.apply(
            &mut frame,
            InputEvent::MouseWheel {
                delta: MouseWheelDelta::Line { x: 0.0, y: 1.0 },
                modifiers: m,
            },
        );
        state.apply(
            &mut frame,
            InputEvent::MouseWheel {
                delta: MouseWheelDelta::Pixel { x: 0.0, y: 80.0 },
                modifiers: m,
            },
        );

        // One line step plus 80px normalized at 40px per line.
        assert_eq!(frame.wheel_steps, 3.0);
    }
}
