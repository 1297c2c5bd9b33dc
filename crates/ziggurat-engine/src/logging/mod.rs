//! Logger bootstrap.
//!
//! Engine and app code log through the `log` facade; this module owns the
//! one place the backend gets installed, so binaries pick a filter and
//! nothing else.

mod init;

pub use init::{init_logging, LoggingConfig};
