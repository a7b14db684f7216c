//! Blur-difference sharpening
//!
//! Both filters subtract a box-blurred copy from the grayscale image. The
//! blur stays in float, so the mask is never rounded before use.

use crate::edge::gray_plane;
use crate::window::{WindowRule, apply_float};
use crate::{FilterError, FilterResult};
use pcxkit_core::{FRaster, Raster};

fn blurred(src: &FRaster, size: u32) -> FilterResult<FRaster> {
    apply_float(src, WindowRule::Mean, size)
}

/// Unsharp masking with unit amplification.
///
/// `mask = original - blur(size)`, `result = original + mask`
///
/// # Errors
///
/// Returns `InvalidParameter` unless `size` is odd and `>= 3`.
pub fn unsharp_mask(raster: &Raster, size: u32) -> FilterResult<Raster> {
    let src = gray_plane(raster)?;
    let blur = blurred(&src, size)?;
    let mask = src.sub(&blur)?;
    Ok(src.add(&mask)?.to_raster()?)
}

/// Highboost filtering.
///
/// `result = boost * original - (boost - 1) * blur(size)`. A boost of 1
/// returns the grayscale image; larger values sharpen more.
///
/// # Errors
///
/// Returns `InvalidParameter` if `boost < 1` or is not finite, or unless
/// `size` is odd and `>= 3`.
pub fn highboost(raster: &Raster, boost: f32, size: u32) -> FilterResult<Raster> {
    if !boost.is_finite() || boost < 1.0 {
        return Err(FilterError::InvalidParameter(format!(
            "boost factor must be >= 1, got {boost}"
        )));
    }
    let src = gray_plane(raster)?;
    let blur = blurred(&src, size)?;
    Ok(FRaster::linear_combine(&src, &blur, boost, -(boost - 1.0))?.to_raster()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcxkit_core::Channels;

    fn step() -> Raster {
        let data = [50u8, 50, 50, 150, 150, 150].repeat(3);
        Raster::from_samples(6, 3, Channels::Gray, data).unwrap()
    }

    #[test]
    fn test_unsharp_overshoots_edge() {
        let out = unsharp_mask(&step(), 3).unwrap();
        // Dark side of the edge: blur = (50 + 50 + 150) / 3, 2*50 - 83.33
        assert_eq!(out.get(2, 1, 0), Some(17));
        // Bright side: 2*150 - (50 + 150 + 150) / 3
        assert_eq!(out.get(3, 1, 0), Some(183));
        // Flat region untouched
        assert_eq!(out.get(0, 1, 0), Some(50));
    }

    #[test]
    fn test_highboost() {
        let one = highboost(&step(), 1.0, 3).unwrap();
        assert_eq!(one.data(), step().data());
        let two = highboost(&step(), 2.0, 3).unwrap();
        assert_eq!(two.data(), unsharp_mask(&step(), 3).unwrap().data());
        let three = highboost(&step(), 3.0, 3).unwrap();
        // 3*50 - 2*83.33 = -16.7 -> 0
        assert_eq!(three.get(2, 1, 0), Some(0));
    }

    #[test]
    fn test_parameter_checks() {
        assert!(matches!(
            highboost(&step(), 0.5, 3),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(unsharp_mask(&step(), 4).is_err());
        assert!(highboost(&step(), 2.0, 1).is_err());
    }
}
