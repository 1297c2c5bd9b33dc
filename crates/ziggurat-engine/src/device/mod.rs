//! wgpu device and surface plumbing.
//!
//! [`Gpu`] bundles everything one window needs to draw: adapter, device,
//! queue, and the configured surface. [`GpuFrame`] is the RAII handle for
//! one acquired swapchain image.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
