//! Error taxonomy for the sketch pipeline and its boundaries.
//!
//! Stage failures stay distinguishable internally (decode vs transform vs
//! storage and so on) for logging and tests; the HTTP boundary flattens all
//! of them into one generic error body.
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience result type used across the crate.
pub type SketchResult<T> = Result<T, SketchError>;

/// Precondition violations of the core transform.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Input raster has zero width or height.
    #[error("input image has zero width or height")]
    EmptyImage,

    /// A pixel buffer does not match the stated dimensions.
    #[error("pixel buffer holds {got} samples, expected {expected}")]
    BufferMismatch { expected: usize, got: usize },

    /// The Gaussian kernel extent must be odd and non-zero.
    #[error("kernel extent {0} is not an odd positive number")]
    BadKernelExtent(usize),
}

/// Top-level error taxonomy, one variant per pipeline stage.
#[derive(Debug, Error)]
pub enum SketchError {
    /// Upload bytes do not decode as a supported image format.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The transform rejected its input.
    #[error("transform rejected input: {0}")]
    Transform(#[from] TransformError),

    /// PNG encoding of the sketch failed.
    #[error("failed to encode sketch: {0}")]
    Encode(String),

    /// Creating a storage area or writing an artifact failed.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The multipart upload itself was unusable.
    #[error("bad upload: {0}")]
    Upload(String),

    /// Unreadable or unparsable configuration file.
    #[error("failed to load config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl SketchError {
    /// Build a [`SketchError::Storage`] value with path context.
    pub fn storage(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build a [`SketchError::Upload`] value.
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }
}
