//! Frame timing.
//!
//! A [`FrameClock`] lives next to each window; ticking it once per
//! presented frame yields the [`FrameTime`] the app consumes.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
