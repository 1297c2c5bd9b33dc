use winit::dpi::PhysicalSize;

use super::SurfaceErrorAction;

/// Owned half of the swapchain: the active configuration plus the drawable
/// size it was built for. The `wgpu::Surface` itself stays in `Gpu`, which
/// passes it in for every operation that reconfigures.
pub(crate) struct SurfaceState {
    pub(crate) config: wgpu::SurfaceConfiguration,
    pub(crate) size: PhysicalSize<u32>,
}

impl SurfaceState {
    /// Assembles a configuration from the surface capabilities, or `None`
    /// when the surface reports no usable format.
    pub(crate) fn build(
        caps: &wgpu::SurfaceCapabilities,
        size: PhysicalSize<u32>,
        prefer_srgb: bool,
        present_mode: wgpu::PresentMode,
        alpha_mode: Option<wgpu::CompositeAlphaMode>,
        desired_maximum_frame_latency: u32,
    ) -> Option<Self> {
        let format = pick_format(caps, prefer_srgb)?;
        let alpha_mode = pick_alpha_mode(caps, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        Some(Self { config, size })
    }

    pub(crate) fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Records the new size and reconfigures. A window collapsed to zero
    /// area only records; wgpu rejects 0x0 configurations, and the next
    /// non-empty resize picks the surface back up.
    pub(crate) fn resize(
        &mut self,
        surface: &wgpu::Surface,
        device: &wgpu::Device,
        new_size: PhysicalSize<u32>,
    ) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        self.config.width = new_size.width;
        self.config.height = new_size.height;
        surface.configure(device, &self.config);
    }

    /// Decides what an acquire failure means for the frame loop.
    pub(crate) fn error_action(
        &self,
        surface: &wgpu::Surface,
        device: &wgpu::Device,
        err: wgpu::SurfaceError,
    ) -> SurfaceErrorAction {
        match err {
            // A lost or outdated swapchain comes back after reconfiguring
            // with the current settings.
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                if self.size.width > 0 && self.size.height > 0 {
                    surface.configure(device, &self.config);
                }
                SurfaceErrorAction::Reconfigured
            }

            wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,

            // Transient acquire failures; drop this frame and try again.
            wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => {
                SurfaceErrorAction::SkipFrame
            }
        }
    }
}

fn pick_format(caps: &wgpu::SurfaceCapabilities, prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    if prefer_srgb {
        let srgb = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Rgba8UnormSrgb,
        ];
        if let Some(f) = srgb.into_iter().find(|f| caps.formats.contains(f)) {
            return Some(f);
        }
    }

    caps.formats.first().copied()
}

fn pick_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    match requested {
        Some(m) if caps.alpha_modes.contains(&m) => m,
        _ => caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto),
    }
}
