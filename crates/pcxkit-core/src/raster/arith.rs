//! Per-sample arithmetic on rasters
//!
//! Every operation evaluates in `f32` and converts back to 8-bit only once,
//! through [`finalize_sample`], when the output buffer is written.

use super::{Raster, finalize_sample};
use crate::error::{Error, Result};

fn check_direct(raster: &Raster) -> Result<()> {
    if raster.is_indexed() {
        return Err(Error::InvalidParameter(
            "arithmetic on palette indices; expand the palette first".to_string(),
        ));
    }
    Ok(())
}

fn check_same_layout(a: &Raster, b: &Raster) -> Result<()> {
    if !a.sizes_equal(b) {
        return Err(Error::IncompatibleSizes(
            a.width(),
            a.height(),
            b.width(),
            b.height(),
        ));
    }
    Ok(())
}

impl Raster {
    /// Weighted sum `clamp(weight_a * a + weight_b * b)` of two rasters with
    /// the same dimensions and channel layout.
    pub fn linear_combine(a: &Raster, b: &Raster, weight_a: f32, weight_b: f32) -> Result<Raster> {
        check_direct(a)?;
        check_direct(b)?;
        check_same_layout(a, b)?;

        let data = a
            .data()
            .iter()
            .zip(b.data())
            .map(|(&va, &vb)| finalize_sample(weight_a * va as f32 + weight_b * vb as f32))
            .collect();
        Raster::from_samples(a.width(), a.height(), a.channels(), data)
    }

    /// Per-sample sum of two rasters, clamped to 255.
    pub fn add(&self, other: &Raster) -> Result<Raster> {
        Raster::linear_combine(self, other, 1.0, 1.0)
    }

    /// Multiply every sample by `factor`, clamping the result.
    pub fn scale(&self, factor: f32) -> Result<Raster> {
        check_direct(self)?;
        let data = self
            .data()
            .iter()
            .map(|&v| finalize_sample(v as f32 * factor))
            .collect();
        Raster::from_samples(self.width(), self.height(), self.channels(), data)
    }
}
