/// Keys the engine tracks by name.
///
/// Only navigation and viewer-control keys get named variants. The platform
/// layer maps everything else to `Key::Unknown(u32)` carrying the raw
/// keycode, so state tracking still works for keys without a name.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,

    Home,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Modifiers double as keys so hold-to-accelerate can poll them.
    Shift,
    Control,
    Alt,
    Meta,

    /// Anything without a named variant; payload is the platform keycode.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Snapshot of the held modifier keys. Plain bools, one per modifier, so
/// call sites read them directly.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Wheel motion as reported by the platform.
///
/// Classic wheels report whole `Line` steps; trackpads report `Pixel`
/// distances.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum MouseWheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl MouseWheelDelta {
    /// Vertical motion in wheel steps. Pixel distances normalize at 40 px
    /// per step, the conventional line height.
    pub fn steps_y(self) -> f32 {
        match self {
            MouseWheelDelta::Line { y, .. } => y,
            MouseWheelDelta::Pixel { y, .. } => y / 40.0,
        }
    }
}

/// Input events after platform translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: KeyState,
        modifiers: Modifiers,
        /// True for auto-repeat while held.
        repeat: bool,
    },

    MouseWheel {
        delta: MouseWheelDelta,
        modifiers: Modifiers,
    },

    Focused(bool),
}
