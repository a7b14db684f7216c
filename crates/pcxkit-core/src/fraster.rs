//! FRaster - Single-plane floating-point raster
//!
//! `FRaster` is a 2D array of `f32` values used for intermediate filter
//! results. Values are never clamped while they live in an `FRaster`;
//! clamping and rounding happen in [`FRaster::to_raster`].
//!
//! # Examples
//!
//! ```
//! use pcxkit_core::FRaster;
//!
//! let mut f = FRaster::new(4, 4).unwrap();
//! f.set_pixel(1, 2, -3.5).unwrap();
//! assert_eq!(f.get_pixel(1, 2).unwrap(), -3.5);
//! ```

use crate::error::{Error, Result};
use crate::raster::{Channels, Raster, finalize_sample};

/// Floating-point raster
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FRaster {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FRaster {
    /// Create a new FRaster with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new FRaster with all pixels set to `value`
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(FRaster {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create an FRaster from row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }
        Ok(FRaster {
            width,
            height,
            data,
        })
    }

    /// Lift a 1-channel, non-indexed raster into float.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnsupportedChannels` for RGB or indexed rasters.
    pub fn from_raster(raster: &Raster) -> Result<Self> {
        if raster.channels() != Channels::Gray || raster.is_indexed() {
            return Err(Error::UnsupportedChannels {
                expected: "1 (gray, not indexed)",
                actual: raster.channels().count(),
            });
        }
        let data = raster.data().iter().map(|&v| v as f32).collect();
        Self::from_data(raster.width(), raster.height(), data)
    }

    /// Clamp to `[0, 255]`, round, and produce a 1-channel raster.
    pub fn to_raster(&self) -> Result<Raster> {
        let data = self.data.iter().map(|&v| finalize_sample(v)).collect();
        Raster::from_samples(self.width, self.height, Channels::Gray, data)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Set the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width as usize) + (x as usize),
                len: self.data.len(),
            });
        }
        self.set_pixel_unchecked(x, y, value);
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: f32) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a row of pixel data
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = (y as usize) * (self.width as usize);
        &self.data[start..start + self.width as usize]
    }

    fn check_same_size(&self, other: &FRaster) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::IncompatibleSizes(
                self.width,
                self.height,
                other.width,
                other.height,
            ));
        }
        Ok(())
    }

    /// Add other FRaster to this one element-wise
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleSizes` if dimensions don't match.
    pub fn add(&self, other: &FRaster) -> Result<FRaster> {
        FRaster::linear_combine(self, other, 1.0, 1.0)
    }

    /// Subtract other FRaster from this one element-wise
    pub fn sub(&self, other: &FRaster) -> Result<FRaster> {
        FRaster::linear_combine(self, other, 1.0, -1.0)
    }

    /// Multiply every value by `factor`.
    pub fn scale(&self, factor: f32) -> FRaster {
        self.map(|v| v * factor)
    }

    /// `weight_a * a + weight_b * b`, element-wise, without clamping.
    pub fn linear_combine(a: &FRaster, b: &FRaster, weight_a: f32, weight_b: f32) -> Result<FRaster> {
        a.check_same_size(b)?;
        let data = a
            .data
            .iter()
            .zip(&b.data)
            .map(|(&va, &vb)| weight_a * va + weight_b * vb)
            .collect();
        Ok(FRaster {
            width: a.width,
            height: a.height,
            data,
        })
    }

    /// Apply `f` to every value.
    pub fn map(&self, f: impl Fn(f32) -> f32) -> FRaster {
        FRaster {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Combine two same-sized rasters value by value with `f`.
    pub fn zip_map(&self, other: &FRaster, f: impl Fn(f32, f32) -> f32) -> Result<FRaster> {
        self.check_same_size(other)?;
        Ok(FRaster {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// Minimum value, or `None` for NaN-only data.
    pub fn min_value(&self) -> Option<f32> {
        self.data.iter().copied().filter(|v| !v.is_nan()).reduce(f32::min)
    }

    /// Maximum value, or `None` for NaN-only data.
    pub fn max_value(&self) -> Option<f32> {
        self.data.iter().copied().filter(|v| !v.is_nan()).reduce(f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_raster() {
        let r = Raster::from_samples(2, 1, Channels::Gray, vec![12, 250]).unwrap();
        let f = FRaster::from_raster(&r).unwrap();
        assert_eq!(f.data(), &[12.0, 250.0]);
        assert_eq!(f.to_raster().unwrap().data(), r.data());
    }

    #[test]
    fn test_rgb_rejected() {
        let r = Raster::new(2, 2, Channels::Rgb).unwrap();
        assert!(FRaster::from_raster(&r).is_err());
    }

    #[test]
    fn test_no_early_clamp() {
        let a = FRaster::from_data(2, 1, vec![250.0, 10.0]).unwrap();
        let b = FRaster::from_data(2, 1, vec![100.0, 30.0]).unwrap();
        // 250 + 100 overflows 255, but subtracting 100 again must bring it back
        let sum = a.add(&b).unwrap();
        assert_eq!(sum.data(), &[350.0, 40.0]);
        let back = sum.sub(&b).unwrap();
        assert_eq!(back.to_raster().unwrap().data(), &[250, 10]);
        // Negative intermediate survives too
        let diff = b.sub(&a).unwrap();
        assert_eq!(diff.min_value(), Some(-150.0));
    }

    #[test]
    fn test_size_mismatch() {
        let a = FRaster::new(2, 2).unwrap();
        let b = FRaster::new(2, 3).unwrap();
        assert!(a.add(&b).is_err());
        assert!(a.zip_map(&b, |x, _| x).is_err());
    }

    #[test]
    fn test_to_raster_clamps_and_rounds() {
        let f = FRaster::from_data(4, 1, vec![-1.0, 0.5, 254.6, 999.0]).unwrap();
        assert_eq!(f.to_raster().unwrap().data(), &[0, 1, 255, 255]);
    }
}
