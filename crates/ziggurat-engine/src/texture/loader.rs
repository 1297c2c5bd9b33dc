//! File-to-texture decoding facade.
//!
//! One entry point per container family plus a sniffing dispatcher. All
//! failures come back as `TextureError` values; nothing here exits the
//! process or panics on bad input.

use std::fs;
use std::io;
use std::path::Path;

use super::bitmap::{self, BitmapError, DecodedImage};
use super::dds::{DdsError, DdsTexture};
use super::error::TextureError;
use super::upload::Texture;

/// A decoded texture ready for upload: raw RGBA rows or DXT blocks.
#[derive(Debug, Clone)]
pub enum TextureSource {
    Uncompressed(DecodedImage),
    Compressed(DdsTexture),
}

impl TextureSource {
    /// Base-level dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            TextureSource::Uncompressed(img) => (img.width(), img.height()),
            TextureSource::Compressed(dds) => (dds.width(), dds.height()),
        }
    }
}

/// Decodes an uncompressed image file (PNG, JPEG, BMP, ...).
pub fn decode_image(path: impl AsRef<Path>) -> Result<DecodedImage, TextureError> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    bitmap::decode_bytes(&bytes).map_err(|err| map_bitmap_error(path, err))
}

/// Decodes a DDS file. Content without the DDS signature maps to
/// `UnsupportedFormat`.
pub fn decode_dds(path: impl AsRef<Path>) -> Result<DdsTexture, TextureError> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let dds = DdsTexture::parse(&bytes).map_err(|err| map_dds_error(path, err))?;
    warn_on_pitch_mismatch(path, &dds);
    Ok(dds)
}

/// Reads and decodes `path`, picking the decoder from the content: files
/// carrying the DDS signature go to the DDS parser, everything else to the
/// general image decoder.
pub fn decode(path: impl AsRef<Path>) -> Result<TextureSource, TextureError> {
    let path = path.as_ref();
    let bytes = read_file(path)?;

    if DdsTexture::sniff(&bytes) {
        let dds = DdsTexture::parse(&bytes).map_err(|err| map_dds_error(path, err))?;
        warn_on_pitch_mismatch(path, &dds);
        Ok(TextureSource::Compressed(dds))
    } else {
        let img = bitmap::decode_bytes(&bytes).map_err(|err| map_bitmap_error(path, err))?;
        Ok(TextureSource::Uncompressed(img))
    }
}

/// Decodes `path` and uploads the result in one step.
pub fn load(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: impl AsRef<Path>,
) -> Result<Texture, TextureError> {
    let path = path.as_ref();
    let source = decode(path)?;
    let texture = Texture::from_source(device, queue, source)?;
    log::info!(
        "loaded texture {} ({}x{}, {} mip levels)",
        path.display(),
        texture.width(),
        texture.height(),
        texture.mip_count(),
    );
    Ok(texture)
}

fn read_file(path: &Path) -> Result<Vec<u8>, TextureError> {
    fs::read(path).map_err(|err| {
        if err.kind() == io::ErrorKind::NotFound {
            TextureError::FileNotFound {
                path: path.to_owned(),
            }
        } else {
            TextureError::DecodeFailure {
                path: path.to_owned(),
                source: Box::new(err),
            }
        }
    })
}

fn map_dds_error(path: &Path, err: DdsError) -> TextureError {
    match err {
        // "Not ours" rather than "broken": the caller may want to fall back.
        DdsError::NotDds | DdsError::UnsupportedFourCc(_) => TextureError::UnsupportedFormat {
            path: path.to_owned(),
            reason: err.to_string(),
        },
        other => TextureError::DecodeFailure {
            path: path.to_owned(),
            source: Box::new(other),
        },
    }
}

fn map_bitmap_error(path: &Path, err: BitmapError) -> TextureError {
    match err {
        BitmapError::Decode(image::ImageError::Unsupported(inner)) => {
            TextureError::UnsupportedFormat {
                path: path.to_owned(),
                reason: inner.to_string(),
            }
        }
        other => TextureError::DecodeFailure {
            path: path.to_owned(),
            source: Box::new(other),
        },
    }
}

fn warn_on_pitch_mismatch(path: &Path, dds: &DdsTexture) {
    if let Some((declared, computed)) = dds.pitch_mismatch() {
        log::warn!(
            "{}: header linear size {declared} disagrees with computed level-0 size {computed}; trusting the computed layout",
            path.display(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::dds::{DDS_MAGIC, HEADER_LEN};
    use std::io::Cursor;
    use std::path::PathBuf;

    /// Unique scratch path for this test process.
    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ziggurat-loader-{}-{name}", std::process::id()))
    }

    /// Minimal 4x4 single-level DDS file with the given compression code.
    fn dds_bytes(fourcc: &[u8; 4], payload: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; HEADER_LEN];
        bytes[..4].copy_from_slice(DDS_MAGIC);
        bytes[12..16].copy_from_slice(&4u32.to_le_bytes()); // height
        bytes[16..20].copy_from_slice(&4u32.to_le_bytes()); // width
        bytes[28..32].copy_from_slice(&1u32.to_le_bytes()); // mip count
        bytes[84..88].copy_from_slice(fourcc);
        bytes.extend(std::iter::repeat_n(0u8, payload));
        bytes
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn missing_file_maps_to_file_not_found() {
        let path = temp_path("does-not-exist.png");
        let err = decode(&path).unwrap_err();
        match err {
            TextureError::FileNotFound { path: reported } => assert_eq!(reported, path),
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn non_dds_content_maps_to_unsupported_for_dds_entry_point() {
        let path = temp_path("actually-a-png.dds");
        fs::write(&path, png_bytes()).unwrap();

        let err = decode_dds(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, TextureError::UnsupportedFormat { .. }));
        assert!(err.to_string().contains("DDS"));
    }

    #[test]
    fn unknown_fourcc_maps_to_unsupported() {
        let path = temp_path("dxt2.dds");
        fs::write(&path, dds_bytes(b"DXT2", 16)).unwrap();

        let err = decode(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        match err {
            TextureError::UnsupportedFormat { reason, .. } => assert!(reason.contains("DXT2")),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn truncated_dds_maps_to_decode_failure() {
        let path = temp_path("truncated.dds");
        fs::write(&path, dds_bytes(b"DXT1", 4)).unwrap(); // 4x4 DXT1 needs 8

        let err = decode(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(err, TextureError::DecodeFailure { .. }));
    }

    #[test]
    fn dispatcher_picks_decoder_by_signature() {
        let dds_path = temp_path("dispatch.dds");
        fs::write(&dds_path, dds_bytes(b"DXT1", 8)).unwrap();
        let png_path = temp_path("dispatch.png");
        fs::write(&png_path, png_bytes()).unwrap();

        let dds = decode(&dds_path).unwrap();
        let png = decode(&png_path).unwrap();
        let _ = fs::remove_file(&dds_path);
        let _ = fs::remove_file(&png_path);

        assert!(matches!(dds, TextureSource::Compressed(_)));
        assert_eq!(dds.dimensions(), (4, 4));
        assert!(matches!(png, TextureSource::Uncompressed(_)));
        assert_eq!(png.dimensions(), (2, 2));
    }
}
