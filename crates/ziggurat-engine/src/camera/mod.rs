//! 2D camera.
//!
//! Pans and zooms over world-space content laid out in logical pixels.
//! The renderer folds the camera into its NDC transform; nothing here
//! touches the GPU.

mod camera2d;

pub use camera2d::Camera2d;
