//! Error types for pcxkit-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// pcxkit core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Incompatible raster sizes
    #[error("incompatible raster sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Channel layout not accepted by this operation
    #[error("unsupported channel layout: expected {expected}, got {actual} channel(s)")]
    UnsupportedChannels {
        expected: &'static str,
        actual: usize,
    },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias for pcxkit core operations
pub type Result<T> = std::result::Result<T, Error>;
