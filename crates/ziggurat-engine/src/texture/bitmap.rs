//! Uncompressed image decoding.
//!
//! Thin adapter over the `image` crate that pins down the engine's pixel
//! contract: tightly packed rows stored bottom-up, so row 0 is the bottom of
//! the picture. Quad UVs and the GL-style tooling this feeds both assume
//! that origin, and decoders almost universally hand rows out top-down, so
//! the flip happens exactly once, here.

use std::borrow::Cow;

use thiserror::Error;

/// Pixel layout of a decoded image.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Decode and validation failures for uncompressed images.
#[derive(Debug, Error)]
pub enum BitmapError {
    #[error(transparent)]
    Decode(#[from] image::ImageError),

    #[error("zero image dimension ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },

    #[error("pixel buffer is {actual} bytes, {width}x{height} {format:?} needs {expected}")]
    LengthMismatch {
        width: u32,
        height: u32,
        format: PixelFormat,
        expected: usize,
        actual: usize,
    },
}

/// A fully decoded image.
///
/// Invariants: dimensions are non-zero and the pixel buffer length equals
/// `width * height * bytes_per_pixel`. Rows are stored bottom-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Validating constructor.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::ZeroDimension { width, height });
        }

        let expected = (width as u64)
            .saturating_mul(height as u64)
            .saturating_mul(format.bytes_per_pixel() as u64);
        if pixels.len() as u64 != expected {
            return Err(BitmapError::LengthMismatch {
                width,
                height,
                format,
                expected: usize::try_from(expected).unwrap_or(usize::MAX),
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
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
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// One row of pixels; row 0 is the bottom of the picture.
    pub fn row(&self, row: u32) -> &[u8] {
        let stride = self.width as usize * self.format.bytes_per_pixel();
        let start = row as usize * stride;
        &self.pixels[start..start + stride]
    }

    /// Pixels as RGBA8, expanding RGB with opaque alpha when needed.
    ///
    /// Borrows when the image already is RGBA8.
    pub fn rgba_bytes(&self) -> Cow<'_, [u8]> {
        match self.format {
            PixelFormat::Rgba8 => Cow::Borrowed(&self.pixels),
            PixelFormat::Rgb8 => {
                let mut out = Vec::with_capacity(self.pixels.len() / 3 * 4);
                for rgb in self.pixels.chunks_exact(3) {
                    out.extend_from_slice(rgb);
                    out.push(0xFF);
                }
                Cow::Owned(out)
            }
        }
    }
}

/// Decodes an in-memory encoded image (PNG, JPEG, BMP, ...) into RGBA8 with
/// the bottom-up row order the engine expects.
///
/// The container format is inferred from the byte content.
pub fn decode_bytes(bytes: &[u8]) -> Result<DecodedImage, BitmapError> {
    let rgba = image::load_from_memory(bytes)?.flipv().into_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::new(width, height, PixelFormat::Rgba8, rgba.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Encodes `rows` (given top-down, one RGBA pixel per entry) as a PNG.
    fn png_from_rows(rows: &[Vec<[u8; 4]>]) -> Vec<u8> {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut img = image::RgbaImage::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, px) in row.iter().enumerate() {
                img.put_pixel(x as u32, y as u32, image::Rgba(*px));
            }
        }
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    const RED: [u8; 4] = [255, 0, 0, 255];
    const GREEN: [u8; 4] = [0, 255, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];
    const WHITE: [u8; 4] = [255, 255, 255, 255];

    // ── decoding ──────────────────────────────────────────────────────────

    #[test]
    fn decode_flips_rows_bottom_up() {
        // Top-down source rows: red, green, blue.
        let png = png_from_rows(&[vec![RED], vec![GREEN], vec![BLUE]]);
        let img = decode_bytes(&png).unwrap();

        assert_eq!((img.width(), img.height()), (1, 3));
        assert_eq!(img.format(), PixelFormat::Rgba8);
        // Row 0 of the decoded buffer is the picture's bottom row.
        assert_eq!(img.row(0), &BLUE);
        assert_eq!(img.row(1), &GREEN);
        assert_eq!(img.row(2), &RED);
    }

    #[test]
    fn checkerboard_pixels_survive_decoding() {
        let png = png_from_rows(&[vec![WHITE, RED], vec![GREEN, BLUE]]);
        let img = decode_bytes(&png).unwrap();

        // Reassemble top-down and compare with the source values.
        let mut top_down = Vec::new();
        for row in (0..img.height()).rev() {
            top_down.extend_from_slice(img.row(row));
        }
        assert_eq!(
            top_down,
            [WHITE, RED, GREEN, BLUE].concat(),
            "decode must preserve pixel values exactly"
        );
    }

    #[test]
    fn garbage_bytes_fail_decode() {
        let err = decode_bytes(&[0xDE, 0xAD, 0xBE, 0xEF, 0x00]).unwrap_err();
        assert!(matches!(err, BitmapError::Decode(_)));
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn length_mismatch_is_rejected() {
        let err = DecodedImage::new(2, 2, PixelFormat::Rgba8, vec![0; 15]).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::LengthMismatch {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let err = DecodedImage::new(0, 4, PixelFormat::Rgb8, Vec::new()).unwrap_err();
        assert!(matches!(err, BitmapError::ZeroDimension { .. }));
    }

    // ── rgba conversion ───────────────────────────────────────────────────

    #[test]
    fn rgb_expands_with_opaque_alpha() {
        let img = DecodedImage::new(1, 2, PixelFormat::Rgb8, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let rgba = img.rgba_bytes();
        assert_eq!(rgba.as_ref(), &[1, 2, 3, 255, 4, 5, 6, 255]);
        assert!(matches!(rgba, Cow::Owned(_)));
    }

    #[test]
    fn rgba_borrows_without_copying() {
        let img = DecodedImage::new(1, 1, PixelFormat::Rgba8, vec![9, 8, 7, 6]).unwrap();
        assert!(matches!(img.rgba_bytes(), Cow::Borrowed(_)));
    }
}
