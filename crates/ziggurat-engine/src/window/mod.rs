//! Event loop ownership.
//!
//! [`Runtime`] drives winit, opens windows, and calls into the application
//! through the `core::App` trait. Each window carries its own GPU context
//! and frame clock.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
