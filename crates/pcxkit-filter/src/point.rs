//! Per-pixel transforms
//!
//! Point operators look at one sample at a time. Gray-level mappings are
//! expressed as a 256-entry tone reproduction curve ([`TrcLut`]) applied to
//! the grayscale conversion of the input.

use crate::{FilterError, FilterResult};
use pcxkit_core::{Channels, Raster, finalize_sample};

/// Tone reproduction curve: output value for every input value
pub type TrcLut = [u8; 256];

/// Largest accepted gamma exponent
pub const MAX_GAMMA: f32 = 10.0;

/// Map every sample of the grayscale conversion of `raster` through `lut`.
pub fn trc_map(raster: &Raster, lut: &TrcLut) -> FilterResult<Raster> {
    let gray = raster.to_grayscale()?;
    let data = gray.data().iter().map(|&v| lut[v as usize]).collect();
    Ok(Raster::from_samples(gray.width(), gray.height(), Channels::Gray, data)?)
}

/// Curve sending values `>= t` to 255 and everything else to 0.
pub fn threshold_trc(t: i32) -> FilterResult<TrcLut> {
    if !(0..=255).contains(&t) {
        return Err(FilterError::InvalidParameter(format!(
            "threshold must be in [0, 255], got {t}"
        )));
    }
    Ok(core::array::from_fn(|i| if i as i32 >= t { 255 } else { 0 }))
}

/// Curve `255 * (v / 255) ^ g`, rounded.
///
/// `g < 1` brightens, `g > 1` darkens.
pub fn gamma_trc(g: f32) -> FilterResult<TrcLut> {
    if !g.is_finite() || g <= 0.0 || g > MAX_GAMMA {
        return Err(FilterError::InvalidParameter(format!(
            "gamma must be in (0, {MAX_GAMMA}], got {g}"
        )));
    }
    Ok(core::array::from_fn(|i| {
        finalize_sample(255.0 * (i as f32 / 255.0).powf(g))
    }))
}

/// Binarize: 255 where the gray value is `>= t`, else 0.
///
/// # Errors
///
/// Returns `InvalidParameter` if `t` is outside `[0, 255]`.
pub fn threshold(raster: &Raster, t: i32) -> FilterResult<Raster> {
    let lut = threshold_trc(t)?;
    trc_map(raster, &lut)
}

/// Photographic negative of the grayscale conversion, `255 - v`.
pub fn negative(raster: &Raster) -> FilterResult<Raster> {
    let lut: TrcLut = core::array::from_fn(|i| (255 - i) as u8);
    trc_map(raster, &lut)
}

/// Gamma correction of the grayscale conversion.
///
/// # Errors
///
/// Returns `InvalidParameter` unless `0 < g <= 10`.
pub fn gamma(raster: &Raster, g: f32) -> FilterResult<Raster> {
    let lut = gamma_trc(g)?;
    trc_map(raster, &lut)
}

/// `weight_a * a + weight_b * b`, clamped and rounded once at the end.
///
/// Both rasters must have the same size and channel layout.
pub fn linear_combine(a: &Raster, b: &Raster, weight_a: f32, weight_b: f32) -> FilterResult<Raster> {
    Ok(Raster::linear_combine(a, b, weight_a, weight_b)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Raster {
        Raster::from_samples(4, 1, Channels::Gray, vec![0, 99, 100, 255]).unwrap()
    }

    #[test]
    fn test_threshold() {
        let out = threshold(&ramp(), 100).unwrap();
        assert_eq!(out.data(), &[0, 0, 255, 255]);
        assert_eq!(threshold(&ramp(), 0).unwrap().data(), &[255; 4]);
        assert!(matches!(
            threshold(&ramp(), 300),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(threshold(&ramp(), -1).is_err());
    }

    #[test]
    fn test_negative_uses_grayscale() {
        let rgb = Raster::from_samples(1, 1, Channels::Rgb, vec![255, 0, 1]).unwrap();
        // gray 85 -> 170
        assert_eq!(negative(&rgb).unwrap().data(), &[170]);
        assert_eq!(negative(&ramp()).unwrap().data(), &[255, 156, 155, 0]);
    }

    #[test]
    fn test_gamma() {
        let id = gamma(&ramp(), 1.0).unwrap();
        assert_eq!(id.data(), ramp().data());
        let bright = gamma(&ramp(), 0.5).unwrap();
        // 255 * sqrt(100 / 255) = 159.69
        assert_eq!(bright.get(2, 0, 0), Some(160));
        let dark = gamma(&ramp(), 2.0).unwrap();
        // 255 * (100 / 255)^2 = 39.2
        assert_eq!(dark.get(2, 0, 0), Some(39));
        assert_eq!(dark.get(3, 0, 0), Some(255));
    }

    #[test]
    fn test_gamma_range() {
        assert!(gamma(&ramp(), 0.0).is_err());
        assert!(gamma(&ramp(), 10.5).is_err());
        assert!(gamma(&ramp(), f32::NAN).is_err());
        assert!(gamma(&ramp(), 10.0).is_ok());
    }

    #[test]
    fn test_linear_combine() {
        let a = ramp();
        let out = linear_combine(&a, &a, 2.0, -1.0).unwrap();
        assert_eq!(out.data(), a.data());
        let bad = Raster::new(2, 2, Channels::Gray).unwrap();
        assert!(linear_combine(&a, &bad, 1.0, 1.0).is_err());
    }
}
