//! Windowed GPU texture viewer engine.
//!
//! Three layers: image decoding and upload (`texture`), the wgpu device and
//! sprite renderer (`device`, `render`), and the winit runtime that drives
//! an `App` implementation (`window`, `core`).

pub mod camera;
pub mod coords;
pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod texture;
pub mod time;
pub mod window;
