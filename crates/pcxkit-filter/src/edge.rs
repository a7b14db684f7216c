//! Edge-based filters: Laplacian sharpening and Sobel gradient magnitude
//!
//! Both operate on the grayscale conversion of the input and keep all
//! intermediate values in float until the final raster is produced.

use crate::window::{WindowRule, apply_float};
use crate::{FilterResult, Kernel};
use pcxkit_core::{FRaster, Raster};

/// Grayscale conversion of any raster as a float plane.
pub(crate) fn gray_plane(raster: &Raster) -> FilterResult<FRaster> {
    let gray = raster.to_grayscale()?;
    Ok(FRaster::from_raster(&gray)?)
}

/// Sharpen by adding the 4-neighbor Laplacian response to the image.
///
/// `result = original + laplacian(original)`
pub fn laplacian_sharpen(raster: &Raster) -> FilterResult<Raster> {
    let src = gray_plane(raster)?;
    let kernel = Kernel::laplacian();
    let lap = apply_float(&src, WindowRule::Convolve(&kernel), kernel.size())?;
    Ok(src.add(&lap)?.to_raster()?)
}

/// Horizontal and vertical Sobel responses of the grayscale conversion.
pub fn sobel_components(raster: &Raster) -> FilterResult<(FRaster, FRaster)> {
    let src = gray_plane(raster)?;
    let kx = Kernel::sobel_x();
    let ky = Kernel::sobel_y();
    let gx = apply_float(&src, WindowRule::Convolve(&kx), 3)?;
    let gy = apply_float(&src, WindowRule::Convolve(&ky), 3)?;
    Ok((gx, gy))
}

/// Sobel gradient magnitude `sqrt(gx^2 + gy^2)`, clamped to 255.
pub fn sobel_gradient(raster: &Raster) -> FilterResult<Raster> {
    let (gx, gy) = sobel_components(raster)?;
    let magnitude = gx.zip_map(&gy, |x, y| (x * x + y * y).sqrt())?;
    Ok(magnitude.to_raster()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcxkit_core::Channels;

    #[test]
    fn test_sobel_uniform_is_zero() {
        let r = Raster::from_samples(4, 4, Channels::Gray, vec![180; 16]).unwrap();
        let out = sobel_gradient(&r).unwrap();
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sobel_vertical_step() {
        // Columns 0..2 dark, 2..4 bright
        let data = [0u8, 0, 100, 100].repeat(4);
        let r = Raster::from_samples(4, 4, Channels::Gray, data).unwrap();
        let (gx, gy) = sobel_components(&r).unwrap();
        assert_eq!(gx.get_pixel(1, 1).unwrap(), 400.0);
        assert_eq!(gy.get_pixel(1, 1).unwrap(), 0.0);
        let out = sobel_gradient(&r).unwrap();
        assert_eq!(out.get(1, 1, 0), Some(255));
        assert_eq!(out.get(0, 1, 0), Some(0));
    }

    #[test]
    fn test_laplacian_uniform_unchanged() {
        let r = Raster::from_samples(3, 3, Channels::Gray, vec![42; 9]).unwrap();
        assert_eq!(laplacian_sharpen(&r).unwrap().data(), r.data());
    }

    #[test]
    fn test_laplacian_boosts_peak() {
        let mut data = vec![100u8; 9];
        data[4] = 120;
        let r = Raster::from_samples(3, 3, Channels::Gray, data).unwrap();
        let out = laplacian_sharpen(&r).unwrap();
        // 120 + (4*120 - 4*100) = 200
        assert_eq!(out.get(1, 1, 0), Some(200));
        // Top neighbor sees the peak above (mirrored) and below:
        // 100 + (4*100 - 120 - 120 - 100 - 100) = 60
        assert_eq!(out.get(1, 0, 0), Some(60));
    }
}
