//! Histogram-based contrast adjustment

use crate::FilterResult;
use crate::point::{TrcLut, trc_map};
use log::debug;
use pcxkit_core::{Histogram, Raster};

/// 256-bin histogram of the grayscale conversion of `raster`.
pub fn histogram(raster: &Raster) -> FilterResult<Histogram> {
    Ok(Histogram::of(raster)?)
}

/// Equalization curve for a histogram.
///
/// Maps `v` to `floor((cdf[v] - cdf_min) * 255 / (cdf_max - cdf_min))`,
/// where `cdf_min` is the cumulative count at the lowest occupied bin.
/// Returns `None` when all samples share one value (or there are none),
/// since the curve is undefined there.
///
/// `cdf_min` is not `cdf[0]`. With `cdf[0]` (zero whenever
/// no sample is black) the darkest occupied value would map above 0, and
/// a constant image would not satisfy `cdf_max == cdf_min`.
pub fn equalize_trc(hist: &Histogram) -> Option<TrcLut> {
    let cdf = hist.cumulative();
    let cdf_max = cdf[255];
    let cdf_min = cdf.iter().copied().find(|&c| c > 0)?;
    if cdf_max == cdf_min {
        return None;
    }
    let span = cdf_max - cdf_min;
    Some(core::array::from_fn(|i| {
        (cdf[i].saturating_sub(cdf_min) * 255 / span) as u8
    }))
}

/// Histogram equalization of the grayscale conversion.
///
/// Returns the equalized raster together with its histogram. A constant
/// image is returned unchanged (as its grayscale conversion).
pub fn equalize(raster: &Raster) -> FilterResult<(Raster, Histogram)> {
    let gray = raster.to_grayscale()?;
    let hist = Histogram::of(&gray)?;
    let Some(lut) = equalize_trc(&hist) else {
        debug!("equalize: single-valued histogram, returning input");
        return Ok((gray, hist));
    };
    let out = trc_map(&gray, &lut)?;
    let out_hist = Histogram::of(&out)?;
    Ok((out, out_hist))
}
