//! pcxkit - PCX palette image decoding and spatial filtering
//!
//! Decodes 8-bit, run-length encoded PCX images into rasters and runs a
//! catalog of classic spatial-domain filters on them: smoothing, edge
//! detection, sharpening, histogram equalization and intensity transforms.
//!
//! # Example
//!
//! ```no_run
//! use pcxkit::filter::{FilterCatalog, ParamSet};
//! use pcxkit::io::read_pcx;
//!
//! let image = read_pcx("photo.pcx").unwrap();
//! let catalog = FilterCatalog::standard();
//! let median = catalog.lookup("median").unwrap();
//! let out = median
//!     .apply(&image.raster, &ParamSet::new().with_int("kernel_size", 5))
//!     .unwrap();
//! assert_eq!(out.raster.dimensions(), image.raster.dimensions());
//! ```
//!
//! For batch use, [`config::load_config`] reads a JSON run description and
//! [`pipeline::run`] writes the decoded image, its header and every
//! configured filter output to a directory.

// Re-export core types (primary data structures used everywhere)
pub use pcxkit_core::*;

pub use pcxkit_filter as filter;
pub use pcxkit_io as io;

pub mod config;
mod error;
pub mod pipeline;

pub use config::{FilterStep, OutputFormat, RunConfig, load_config};
pub use error::{Error, Result};
pub use pipeline::{RunReport, run};
