//! I/O error types
//!
//! Provides a unified error type for container decoding, encoding and
//! file access, so that callers only need to handle one error type.

use thiserror::Error;

/// Error type for image I/O operations.
///
/// Decode failures are reported before any raster is constructed; a
/// caller never receives a partially decoded image.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is shorter than its structure requires
    #[error("truncated file: need at least {required} bytes, got {actual}")]
    TruncatedFile { required: usize, actual: usize },

    /// The container uses an encoding, depth or plane count outside the
    /// supported 8-bit, single-plane, run-length family
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The pixel stream expanded to fewer indices than the image needs
    #[error("insufficient pixel data: expected {expected} pixels, decoded {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// The header describes an impossible image
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] pcxkit_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
