//! Image viewer built on ziggurat-engine.
//!
//! Usage:
//!
//! ```text
//! ziggurat-viewer [path]
//! ```
//!
//! `path` may be any bitmap format the engine decodes (PNG, JPEG, BMP, ...)
//! or a DXT1/3/5 compressed `.dds` file. Without a path a built-in
//! checkerboard is shown.
//!
//! Controls: arrows pan (Shift accelerates), mouse wheel or PageUp/PageDown
//! zoom, Space or Home recenters, Escape quits.

use std::path::PathBuf;

use anyhow::Context;

use ziggurat_engine::camera::Camera2d;
use ziggurat_engine::coords::{ColorRgba, Rect, Vec2};
use ziggurat_engine::core::{App, AppControl, FrameCtx};
use ziggurat_engine::device::GpuInit;
use ziggurat_engine::input::Key;
use ziggurat_engine::logging::{init_logging, LoggingConfig};
use ziggurat_engine::render::SpriteRenderer;
use ziggurat_engine::texture::{self, DecodedImage, PixelFormat, Texture, TextureSource};
use ziggurat_engine::window::{Runtime, RuntimeConfig};

const CLEAR_COLOR: ColorRgba = ColorRgba::new(0.0, 0.0, 0.4, 1.0);

struct ViewerApp {
    /// Decoded but not yet uploaded. Taken on the first frame, once a device
    /// exists.
    pending: Option<TextureSource>,
    texture: Option<Texture>,
    sprite: SpriteRenderer,
    camera: Camera2d,
}

impl ViewerApp {
    fn new(source: TextureSource) -> Self {
        Self {
            pending: Some(source),
            texture: None,
            sprite: SpriteRenderer::new(),
            camera: Camera2d::new(),
        }
    }
}

impl App for ViewerApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        if let Some(source) = self.pending.take() {
            match Texture::from_source(ctx.gpu.device(), ctx.gpu.queue(), source) {
                Ok(texture) => self.texture = Some(texture),
                Err(err) => {
                    log::error!("texture upload failed: {err}");
                    return AppControl::Exit;
                }
            }
        }

        let (ax, ay) = ctx.input.arrow_axes();
        if ax != 0.0 || ay != 0.0 {
            self.camera
                .pan(Vec2::new(ax, ay), ctx.time.dt, ctx.input.modifiers.shift);
        }

        if ctx.input_frame.wheel_steps != 0.0 {
            self.camera.zoom_by(ctx.input_frame.wheel_steps);
        }
        if ctx.input_frame.key_pressed(Key::PageUp) {
            self.camera.zoom_by(1.0);
        }
        if ctx.input_frame.key_pressed(Key::PageDown) {
            self.camera.zoom_by(-1.0);
        }
        if ctx.input_frame.key_pressed(Key::Space) || ctx.input_frame.key_pressed(Key::Home) {
            self.camera.reset();
        }

        let Self {
            sprite,
            camera,
            texture,
            ..
        } = self;

        ctx.render(CLEAR_COLOR, |rctx, target| {
            if let Some(texture) = texture.as_ref() {
                let size = Vec2::new(texture.width() as f32, texture.height() as f32);
                let dest = Rect::centered_at(Vec2::zero(), size);
                sprite.draw(rctx, target, texture, dest, camera);
            }
        })
    }
}

/// Fallback image shown when no path is given.
fn checkerboard() -> DecodedImage {
    const SIZE: u32 = 256;
    const CELL: u32 = 32;

    let mut pixels = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let dark = ((x / CELL) + (y / CELL)) % 2 == 0;
            let v = if dark { 0x2e } else { 0xc8 };
            pixels.extend_from_slice(&[v, v, v, 0xff]);
        }
    }

    DecodedImage::new(SIZE, SIZE, PixelFormat::Rgba8, pixels)
        .expect("checkerboard dimensions are constant")
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    // Decode before opening a window so bad paths fail fast with a plain
    // error message instead of a flash of an empty window.
    let source = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => texture::decode(&path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => TextureSource::Uncompressed(checkerboard()),
    };

    let (width, height) = source.dimensions();
    log::info!("viewing {width}x{height} image");

    Runtime::run(
        RuntimeConfig {
            title: "ziggurat viewer".to_string(),
            ..Default::default()
        },
        GpuInit {
            optional_features: wgpu::Features::TEXTURE_COMPRESSION_BC,
            ..Default::default()
        },
        ViewerApp::new(source),
    )
}
