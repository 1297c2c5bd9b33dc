//! winit event translation.
//!
//! The single place where engine code reads winit input types; everything
//! downstream of this boundary speaks `InputEvent`.

use winit::dpi::LogicalPosition;
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::Window;

use crate::input::{InputEvent, InputState, Key, KeyState, Modifiers, MouseWheelDelta};

/// Turns one winit `WindowEvent` into its [`InputEvent`] counterpart, or
/// `None` for event kinds the input model leaves out.
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => Some(InputEvent::ModifiersChanged(m.state().into())),

        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),

        // winit 0.30 attaches no modifiers to wheel events; the tracked
        // state fills them in.
        WindowEvent::MouseWheel { delta, .. } => Some(InputEvent::MouseWheel {
            delta: wheel_delta(window, *delta),
            modifiers: state.modifiers,
        }),

        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: translate_key(event.physical_key),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            modifiers: state.modifiers,
            repeat: event.repeat,
        }),

        _ => None,
    }
}

fn wheel_delta(window: &Window, delta: MouseScrollDelta) -> MouseWheelDelta {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x, y },
        MouseScrollDelta::PixelDelta(pos) => {
            let logical: LogicalPosition<f64> = pos.to_logical(window.scale_factor());
            MouseWheelDelta::Pixel {
                x: logical.x as f32,
                y: logical.y as f32,
            }
        }
    }
}

impl From<ModifiersState> for Modifiers {
    fn from(m: ModifiersState) -> Self {
        Self {
            shift: m.shift_key(),
            ctrl: m.control_key(),
            alt: m.alt_key(),
            meta: m.super_key(),
        }
    }
}

fn translate_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Space => Key::Space,

            KeyCode::Home => Key::Home,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
            KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
            KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
            KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode has no stable numeric form in winit 0.30; collapse
        // to a single unknown.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
