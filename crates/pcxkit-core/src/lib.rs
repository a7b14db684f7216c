//! pcxkit core - Basic data structures for palette raster processing
//!
//! This crate provides the fundamental data structures shared by the
//! decoder and the filter engines:
//!
//! - [`Raster`] / [`RasterMut`] - The 8-bit sample container (immutable / mutable)
//! - [`FRaster`] - Single-plane floating-point raster for intermediate math
//! - [`Palette`] - 256-entry color table for indexed rasters
//! - [`Histogram`] - 256-bin intensity histogram and its cumulative form

pub mod error;
pub mod fraster;
pub mod histogram;
pub mod palette;
pub mod raster;

pub use error::{Error, Result};
pub use fraster::FRaster;
pub use histogram::{HISTOGRAM_BINS, Histogram};
pub use palette::{PALETTE_SIZE, Palette, Rgb};
pub use raster::{Channels, Raster, RasterMut, finalize_sample};
