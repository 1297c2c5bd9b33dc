use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::surface::SurfaceState;
use super::{GpuFrame, GpuInit, SurfaceErrorAction};

/// Per-window GPU context: adapter, device, queue, and the presentable
/// surface. Built once per window and dropped with it.
pub struct Gpu<'w> {
    surface: wgpu::Surface<'w>,
    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,
    state: SurfaceState,
}

impl<'w> Gpu<'w> {
    /// Brings up the stack for one window: instance, surface, adapter,
    /// device, queue, and an initial surface configuration.
    ///
    /// Optional features are intersected with what the adapter offers, so a
    /// missing optional feature degrades instead of failing here.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "surface target has zero area");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("surface creation failed")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no suitable GPU adapter")?;

        let granted = init.optional_features & adapter.features();
        let missing = init.optional_features - granted;
        if !missing.is_empty() {
            log::warn!("adapter lacks optional features: {missing:?}");
        }

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ziggurat-engine device"),
                required_features: init.required_features | granted,
                required_limits: init.required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("device request failed")?;

        let caps = surface.get_capabilities(&adapter);
        let state = SurfaceState::build(
            &caps,
            size,
            init.prefer_srgb,
            init.present_mode,
            init.alpha_mode,
            init.desired_maximum_frame_latency,
        )
        .context("no supported surface formats")?;

        surface.configure(&device, &state.config);

        Ok(Self {
            surface,
            adapter,
            device,
            queue,
            state,
        })
    }

    /// Acquires the next swapchain image and opens a command encoder on it.
    pub fn begin_frame(&self) -> Result<GpuFrame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("ziggurat frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the frame's commands and presents the swapchain image.
    pub fn submit(&self, frame: GpuFrame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        frame.surface_texture.present();
    }

    /// Maps an acquire error to what the frame loop should do about it,
    /// reconfiguring the surface when that is the fix.
    pub fn handle_surface_error(&mut self, err: SurfaceError) -> SurfaceErrorAction {
        self.state.error_action(&self.surface, &self.device, err)
    }

    /// Tracks a window resize into the surface configuration.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.state.resize(&self.surface, &self.device, new_size);
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Format the surface was configured with.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.state.format()
    }

    /// Drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.state.size
    }

    /// Features live on the device: required ones plus whichever optional
    /// ones the adapter granted.
    pub fn features(&self) -> wgpu::Features {
        self.device.features()
    }

    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }
}
