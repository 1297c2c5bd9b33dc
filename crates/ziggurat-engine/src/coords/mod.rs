//! Shared geometry and color types.
//!
//! The whole engine agrees on one CPU-side space: logical pixels, origin at
//! the top-left, +X right and +Y down. Conversion to NDC happens in shaders
//! via the camera uniform.

mod color;
mod rect;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
