//! pcxkit-test - Regression test framework for pcxkit
//!
//! Every `tests/*_reg.rs` file drives a [`RegParams`], records numbered
//! comparisons, and asserts on [`RegParams::cleanup`] at the end. Inputs are
//! built in memory by the [`synthetic`] module, so no image data has to be
//! checked in.
//!
//! # Usage
//!
//! ```ignore
//! use pcxkit_test::RegParams;
//!
//! let mut rp = RegParams::new("smooth");
//! rp.compare_values(128.0, out.get(0, 0, 0).unwrap() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to also write every checked raster
//!   under `tests/regout/` for visual inspection

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pcxkit-test is at crates/pcxkit-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
