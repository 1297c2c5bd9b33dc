//! Device-side texture creation.
//!
//! Uploads decoded pixel data to the GPU and wraps the handles in `Texture`.
//! Device validation failures are captured with a wgpu error scope and turned
//! into `TextureError::UploadFailure` instead of surfacing through the global
//! uncaptured-error hook.

use std::sync::atomic::{AtomicU64, Ordering};

use super::bitmap::DecodedImage;
use super::dds::{BlockFormat, DdsTexture};
use super::error::TextureError;
use super::loader::TextureSource;

/// Process-unique identity for a device texture.
///
/// Renderers key bind-group caches on this rather than on pointer equality.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureId(u64);

fn next_texture_id() -> TextureId {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    TextureId(NEXT.fetch_add(1, Ordering::Relaxed))
}

/// A sampled 2D texture resident on the device.
///
/// Owns the texture, its view, and its sampler; dropping the value releases
/// all three through wgpu's normal resource lifetime handling. The sampler is
/// fixed at clamp-to-edge addressing with nearest filtering.
#[derive(Debug)]
pub struct Texture {
    id: TextureId,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads an uncompressed image as a single-level RGBA8 texture.
    ///
    /// The texture object is created with exactly one mip level, so nearest
    /// filtering never reads from undefined smaller levels.
    pub fn from_decoded(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: DecodedImage,
    ) -> Result<Self, TextureError> {
        let (width, height) = (image.width(), image.height());
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("ziggurat image texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.rgba_bytes().as_ref(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        finish_upload(device, error_scope, texture, width, height)
    }

    /// Uploads a parsed DDS texture, one submit per mip level.
    ///
    /// Requires `TEXTURE_COMPRESSION_BC` on the device; without it the upload
    /// fails with `UploadFailure` rather than tripping device validation.
    pub fn from_dds(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        dds: DdsTexture,
    ) -> Result<Self, TextureError> {
        if !device
            .features()
            .contains(wgpu::Features::TEXTURE_COMPRESSION_BC)
        {
            return Err(TextureError::UploadFailure {
                detail: format!(
                    "device lacks BC texture compression, required for {:?}",
                    dds.format()
                ),
            });
        }

        let (width, height) = (dds.width(), dds.height());
        let format = dds.format();

        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("ziggurat dds texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: dds.mip_count(),
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: block_texture_format(format),
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for level in dds.mip_levels() {
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level.level,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                &dds.data()[level.offset..level.offset + level.size],
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(level.row_pitch(format)),
                    // For block formats this counts block rows, not texel rows.
                    rows_per_image: Some(level.block_rows()),
                },
                wgpu::Extent3d {
                    width: level.width,
                    height: level.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        finish_upload(device, error_scope, texture, width, height)
    }

    /// Uploads either source kind.
    pub fn from_source(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        source: TextureSource,
    ) -> Result<Self, TextureError> {
        match source {
            TextureSource::Uncompressed(img) => Self::from_decoded(device, queue, img),
            TextureSource::Compressed(dds) => Self::from_dds(device, queue, dds),
        }
    }

    #[inline]
    pub fn id(&self) -> TextureId {
        self.id
    }

    #[inline]
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    #[inline]
    pub fn sampler(&self) -> &wgpu::Sampler {
        &self.sampler
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn mip_count(&self) -> u32 {
        self.texture.mip_level_count()
    }
}

/// Pops the validation scope opened by the upload entry points, then builds
/// the view and sampler.
fn finish_upload(
    device: &wgpu::Device,
    error_scope: wgpu::ErrorScopeGuard,
    texture: wgpu::Texture,
    width: u32,
    height: u32,
) -> Result<Texture, TextureError> {
    if let Some(err) = pollster::block_on(error_scope.pop()) {
        return Err(TextureError::UploadFailure {
            detail: err.to_string(),
        });
    }

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("ziggurat texture sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::MipmapFilterMode::Nearest,
        ..Default::default()
    });

    Ok(Texture {
        id: next_texture_id(),
        texture,
        view,
        sampler,
        width,
        height,
    })
}

fn block_texture_format(format: BlockFormat) -> wgpu::TextureFormat {
    match format {
        BlockFormat::Dxt1 => wgpu::TextureFormat::Bc1RgbaUnormSrgb,
        BlockFormat::Dxt3 => wgpu::TextureFormat::Bc2RgbaUnormSrgb,
        BlockFormat::Dxt5 => wgpu::TextureFormat::Bc3RgbaUnormSrgb,
    }
}
