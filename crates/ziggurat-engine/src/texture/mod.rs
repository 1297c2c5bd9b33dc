//! Texture subsystem.
//!
//! Three layers, file to GPU:
//! - `bitmap` / `dds`: pure decoding into validated in-memory forms
//! - `loader`: file IO, content sniffing, and the `TextureError` taxonomy
//! - `upload`: device texture creation (RAII `Texture` handles)

pub mod bitmap;
pub mod dds;
mod error;
pub mod loader;
mod upload;

pub use bitmap::{BitmapError, DecodedImage, PixelFormat};
pub use dds::{BlockFormat, DdsError, DdsTexture, FourCc, MipLevel};
pub use error::TextureError;
pub use loader::{decode, decode_dds, decode_image, load, TextureSource};
pub use upload::{Texture, TextureId};
