//! Runtime-facing application contracts.
//!
//! The [`App`] trait is what the window runtime drives; [`FrameCtx`] is what
//! it hands the app each frame. The rest of the engine stays behind these
//! two types.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
