//! Error types for pcxkit-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
///
/// Every variant is raised before the first output sample is computed.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pcxkit_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Unsupported channel layout for this operation
    #[error("unsupported channels: expected {expected}, got {actual}")]
    UnsupportedChannels {
        /// Expected layout description
        expected: &'static str,
        /// Actual channel count
        actual: usize,
    },

    /// A parameter is missing, mistyped or outside its constraint
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No catalog entry has this name or key
    #[error("unknown filter: {0}")]
    UnknownFilter(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
