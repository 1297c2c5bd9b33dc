use std::collections::HashSet;

use super::types::Key;

/// Input transitions accumulated since the last [`clear`](Self::clear).
///
/// Complements [`super::state::InputState`]: the state answers "is it down",
/// this answers "did it change during the frame being built".
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys that went down during the frame.
    pub keys_pressed: HashSet<Key>,

    /// Keys that came up during the frame.
    pub keys_released: HashSet<Key>,

    /// Net vertical wheel motion over the frame, in wheel steps.
    pub wheel_steps: f32,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.wheel_steps = 0.0;
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
