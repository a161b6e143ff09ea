//! I/O error types
//!
//! Provides a unified error type for all image I/O operations. Errors from
//! the `image` codecs are mapped into these variants so that callers only
//! need to handle one error type.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file extension or data does not name a supported format
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The codec could not decode the data
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The codec could not encode or write the image
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core library (e.g. a zero-sized image)
    #[error("core error: {0}")]
    Core(#[from] pixfilter_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;

impl IoError {
    /// Map a codec error raised while reading.
    pub(crate) fn from_decode(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => IoError::Io(e),
            image::ImageError::Unsupported(e) => IoError::UnsupportedFormat(e.to_string()),
            other => IoError::DecodeError(other.to_string()),
        }
    }

    /// Map a codec error raised while writing.
    pub(crate) fn from_encode(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Unsupported(e) => IoError::UnsupportedFormat(e.to_string()),
            other => IoError::EncodeError(other.to_string()),
        }
    }
}
