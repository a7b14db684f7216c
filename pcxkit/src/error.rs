//! Top-level error type

use std::path::PathBuf;
use thiserror::Error;

/// Any failure of a pcxkit run
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    /// The run configuration could not be read or parsed
    #[error("config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Reading the input or writing an output failed
    #[error("{path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] pcxkit_core::Error),

    #[error(transparent)]
    Io(#[from] pcxkit_io::IoError),

    #[error(transparent)]
    Filter(#[from] pcxkit_filter::FilterError),
}

pub type Result<T> = std::result::Result<T, Error>;
