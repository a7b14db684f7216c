//! Convolution kernels
//!
//! A [`Kernel`] is an odd-sized square matrix of signed weights together
//! with a [`Normalization`] policy. The policy is applied to the weighted
//! sum after accumulation, so a box kernel normalized by its sum produces
//! exactly the arithmetic mean of the window.

use crate::{FilterError, FilterResult};

/// How the weighted sum of a window is scaled
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Normalization {
    /// Use the raw weighted sum
    #[default]
    None,
    /// Divide by the sum of the kernel weights
    Sum,
    /// Divide by an explicit scalar
    Scalar(f32),
}

/// A square convolution kernel with its center at `(size / 2, size / 2)`
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
    normalization: Normalization,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKernel` if `size` is even or zero, if `data` does not
    /// hold `size * size` values, or if the normalization divisor is zero.
    pub fn from_slice(size: u32, data: &[f32], normalization: Normalization) -> FilterResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "size must be odd and positive, got {size}"
            )));
        }
        let expected = (size * size) as usize;
        if data.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "{size}x{size} kernel needs {expected} values, got {}",
                data.len()
            )));
        }
        let kernel = Kernel {
            size,
            data: data.to_vec(),
            normalization,
        };
        let divisor = kernel.divisor();
        if divisor == 0.0 || !divisor.is_finite() {
            return Err(FilterError::InvalidKernel(format!(
                "normalization divisor {divisor} is not usable"
            )));
        }
        Ok(kernel)
    }

    /// Create a box (averaging) kernel: all ones, normalized by the sum.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let n = (size as usize).saturating_mul(size as usize);
        Self::from_slice(size, &vec![1.0; n], Normalization::Sum)
    }

    /// 4-neighbor Laplacian, positive center.
    pub fn laplacian() -> Self {
        Kernel {
            size: 3,
            data: vec![0.0, -1.0, 0.0, -1.0, 4.0, -1.0, 0.0, -1.0, 0.0],
            normalization: Normalization::None,
        }
    }

    /// Sobel kernel responding to horizontal intensity change (Gx).
    pub fn sobel_x() -> Self {
        Kernel {
            size: 3,
            data: vec![-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0],
            normalization: Normalization::None,
        }
    }

    /// Sobel kernel responding to vertical intensity change (Gy).
    pub fn sobel_y() -> Self {
        Kernel {
            size: 3,
            data: vec![-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0],
            normalization: Normalization::None,
        }
    }

    /// Side length
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Distance from the center to an edge, `size / 2`
    #[inline]
    pub fn radius(&self) -> u32 {
        self.size / 2
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Get the weight at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.data[(y * self.size + x) as usize])
    }

    /// Sum of all weights
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Value the weighted sum is divided by
    pub fn divisor(&self) -> f32 {
        match self.normalization {
            Normalization::None => 1.0,
            Normalization::Sum => self.sum(),
            Normalization::Scalar(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_kernel() {
        let k = Kernel::box_kernel(5).unwrap();
        assert_eq!(k.size(), 5);
        assert_eq!(k.radius(), 2);
        assert_eq!(k.divisor(), 25.0);
    }

    #[test]
    fn test_even_size_rejected() {
        assert!(Kernel::box_kernel(4).is_err());
        assert!(Kernel::from_slice(0, &[], Normalization::None).is_err());
    }

    #[test]
    fn test_zero_sum_normalization_rejected() {
        let lap = Kernel::laplacian();
        assert_eq!(lap.sum(), 0.0);
        assert!(Kernel::from_slice(3, lap.data(), Normalization::Sum).is_err());
        assert!(Kernel::from_slice(3, lap.data(), Normalization::Scalar(0.0)).is_err());
    }

    #[test]
    fn test_sobel_layout() {
        let gx = Kernel::sobel_x();
        assert_eq!(gx.get(0, 1), Some(-2.0));
        assert_eq!(gx.get(2, 1), Some(2.0));
        let gy = Kernel::sobel_y();
        assert_eq!(gy.get(1, 0), Some(-2.0));
        assert_eq!(gy.get(1, 2), Some(2.0));
        assert_eq!(gy.get(3, 0), None);
    }
}
