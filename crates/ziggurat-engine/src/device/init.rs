/// GPU setup parameters, consumed once by [`super::Gpu::new`].
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB surface format when the surface offers one.
    pub prefer_srgb: bool,

    /// Surface present mode. FIFO is the portable vsynced default.
    pub present_mode: wgpu::PresentMode,

    /// Alpha compositing preference. `None` takes the first mode the
    /// surface supports; an unsupported preference falls back the same way.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Features the device cannot run without. Setup fails if the adapter
    /// lacks any of these.
    pub required_features: wgpu::Features,

    /// Features worth having but not required. Enabled only where the
    /// adapter offers them; absence surfaces later as a typed error at the
    /// point of use (compressed texture upload checks
    /// `TEXTURE_COMPRESSION_BC` this way).
    pub optional_features: wgpu::Features,

    /// Device limits to request.
    pub required_limits: wgpu::Limits,

    /// Frame latency hint handed to the surface configuration.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            optional_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
