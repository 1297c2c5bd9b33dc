use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for the texture path.
///
/// Every variant is reported to the caller as a value; nothing in this
/// module tree terminates the process. The embedding application decides
/// whether a missing or malformed texture is fatal or substitutable.
#[derive(Debug, Error)]
pub enum TextureError {
    /// The file does not exist.
    #[error("texture file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The content was recognized as something we do not handle: wrong DDS
    /// signature where DDS was required, an unmapped compression code, or an
    /// image container the decoder has no support for.
    #[error("unsupported texture format in {}: {reason}", path.display())]
    UnsupportedFormat { path: PathBuf, reason: String },

    /// The decoder or container parser rejected the contents.
    #[error("failed to decode texture {}", path.display())]
    DecodeFailure {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The device rejected texture creation or data submission.
    #[error("device rejected texture upload: {detail}")]
    UploadFailure { detail: String },
}
