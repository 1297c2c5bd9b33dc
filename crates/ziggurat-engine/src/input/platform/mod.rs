//! Platform-specific translation into the agnostic input model.

pub(crate) mod winit;
