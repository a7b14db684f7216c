//! Smoothing filters
//!
//! Averaging and median filtering accept gray, RGB and indexed rasters.
//! Color rasters are filtered one channel at a time and reassembled;
//! indexed rasters are expanded through their palette first.

use crate::FilterResult;
use crate::window::{WindowRule, apply};
use log::debug;
use pcxkit_core::{Channels, Raster};

/// Run `rule` over every channel of `raster`.
fn per_channel(raster: &Raster, rule: WindowRule<'_>, size: u32) -> FilterResult<Raster> {
    match (raster.channels(), raster.is_indexed()) {
        (Channels::Gray, false) => apply(raster, rule, size),
        _ => {
            let r = apply(&raster.channel(0)?, rule, size)?;
            let g = apply(&raster.channel(1)?, rule, size)?;
            let b = apply(&raster.channel(2)?, rule, size)?;
            Ok(Raster::from_channels(&[r, g, b])?)
        }
    }
}

/// Local mean over a `size x size` window.
///
/// # Errors
///
/// Returns `InvalidParameter` unless `size` is odd and `>= 3`.
pub fn average(raster: &Raster, size: u32) -> FilterResult<Raster> {
    debug!("average {size}x{size} on {:?}", raster.dimensions());
    per_channel(raster, WindowRule::Mean, size)
}

/// Median over a `size x size` window.
///
/// # Errors
///
/// Returns `InvalidParameter` unless `size` is odd and `>= 3`.
pub fn median(raster: &Raster, size: u32) -> FilterResult<Raster> {
    debug!("median {size}x{size} on {:?}", raster.dimensions());
    per_channel(raster, WindowRule::Median, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FilterError;

    #[test]
    fn test_uniform_idempotent() {
        let r = Raster::from_samples(5, 4, Channels::Gray, vec![123; 20]).unwrap();
        assert_eq!(average(&r, 3).unwrap().data(), r.data());
        assert_eq!(median(&r, 3).unwrap().data(), r.data());
    }

    #[test]
    fn test_rgb_channels_independent() {
        let data = [10u8, 200, 30].repeat(9);
        let r = Raster::from_samples(3, 3, Channels::Rgb, data).unwrap();
        let out = average(&r, 3).unwrap();
        assert_eq!(out.channels(), Channels::Rgb);
        assert_eq!(out.data(), r.data());
    }

    #[test]
    fn test_even_size_rejected_before_work() {
        let r = Raster::new(3, 3, Channels::Rgb).unwrap();
        assert!(matches!(median(&r, 4), Err(FilterError::InvalidParameter(_))));
        assert!(matches!(average(&r, 2), Err(FilterError::InvalidParameter(_))));
    }
}
