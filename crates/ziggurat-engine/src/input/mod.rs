//! Keyboard and wheel input.
//!
//! The public surface speaks [`InputEvent`] and never winit types; the
//! `platform` submodule is the only place the two meet.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState, Modifiers, MouseWheelDelta};
