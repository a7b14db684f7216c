//! pcxkit-filter - Spatial and point filters
//!
//! This crate provides the pixel-transform engines and the filters built
//! from them:
//!
//! - Windowed rules (convolution, median, mean) with reflect-101 borders
//! - Point transforms (threshold, negative, gamma, linear combination)
//! - Histogram equalization
//! - Smoothing, Laplacian and Sobel edge filters, blur-difference sharpening
//! - A named catalog with typed, validated parameters

pub mod border;
pub mod catalog;
pub mod edge;
pub mod enhance;
mod error;
pub mod kernel;
pub mod point;
pub mod sharpen;
pub mod smooth;
pub mod window;

pub use border::{BorderMode, map_index};
pub use catalog::{
    FilterCatalog, FilterOutput, FilterSpec, ParamKind, ParamSet, ParamSpec, ParamValue,
    ResolvedParams,
};
pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, Normalization};
pub use window::{MAX_WINDOW_SIZE, WindowRule};

// Re-export commonly used functions
pub use edge::{laplacian_sharpen, sobel_gradient};
pub use enhance::{equalize, histogram};
pub use point::{gamma, linear_combine, negative, threshold};
pub use sharpen::{highboost, unsharp_mask};
pub use smooth::{average, median};
