/// One in-flight frame: the acquired swapchain texture, a view onto it,
/// and the encoder recording this frame's passes.
///
/// Hand it back to [`super::Gpu::submit`] the same frame it was acquired.
/// The held surface texture blocks the next acquire until released.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
