//! Drawing layer.
//!
//! A renderer owns its pipelines, buffers, and bind groups, and records into
//! the frame through a [`RenderCtx`] + [`RenderTarget`] pair.
//!
//! CPU-side geometry is world space in logical pixels, top-left origin with
//! +Y down. The vertex shader applies the camera transform and flips into
//! NDC.

mod ctx;
mod sprite;

pub use ctx::{RenderCtx, RenderTarget};
pub use sprite::SpriteRenderer;
