//! Sliding-window engine
//!
//! Every windowed filter is one of three rules evaluated over a square
//! `size x size` window centered on each pixel:
//!
//! - [`WindowRule::Convolve`]: weighted sum with a [`Kernel`]
//! - [`WindowRule::Median`]: median of the window
//! - [`WindowRule::Mean`]: arithmetic mean of the window
//!
//! The input is first padded by `size / 2` on every side using a
//! [`BorderMode`] (reflect-101 unless told otherwise), so edge pixels see
//! mirrored interior pixels. The direct form is used for all rules.

use crate::border::{BorderMode, pad};
use crate::{FilterError, FilterResult, Kernel};
use log::trace;
use pcxkit_core::{Channels, FRaster, Raster};

/// Largest accepted window side
pub const MAX_WINDOW_SIZE: u32 = 255;

/// Function evaluated over each window
#[derive(Debug, Clone, Copy)]
pub enum WindowRule<'a> {
    /// Weighted sum, divided by the kernel's normalization
    Convolve(&'a Kernel),
    /// Median (order statistic); size must be odd and >= 3
    Median,
    /// Arithmetic mean
    Mean,
}

impl WindowRule<'_> {
    fn name(&self) -> &'static str {
        match self {
            WindowRule::Convolve(_) => "convolve",
            WindowRule::Median => "median",
            WindowRule::Mean => "mean",
        }
    }

    fn check_size(&self, size: u32) -> FilterResult<()> {
        if size > MAX_WINDOW_SIZE {
            return Err(FilterError::InvalidParameter(format!(
                "{} window size must be <= {MAX_WINDOW_SIZE}, got {size}",
                self.name()
            )));
        }
        match self {
            WindowRule::Convolve(kernel) => {
                if kernel.size() != size {
                    return Err(FilterError::InvalidParameter(format!(
                        "window size {size} does not match {0}x{0} kernel",
                        kernel.size()
                    )));
                }
            }
            WindowRule::Median | WindowRule::Mean => {
                if size < 3 || size % 2 == 0 {
                    return Err(FilterError::InvalidParameter(format!(
                        "{} window size must be odd and >= 3, got {size}",
                        self.name()
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Ensure the raster is a single plain gray channel.
pub(crate) fn check_gray(raster: &Raster) -> FilterResult<()> {
    if raster.channels() != Channels::Gray || raster.is_indexed() {
        return Err(FilterError::UnsupportedChannels {
            expected: "1 (gray, not indexed)",
            actual: raster.channels().count(),
        });
    }
    Ok(())
}

/// Apply a window rule to a gray raster with reflect-101 borders.
///
/// # Errors
///
/// - `UnsupportedChannels` unless the raster is plain 1-channel gray
/// - `InvalidParameter` for a size the rule does not accept, including
///   any size above [`MAX_WINDOW_SIZE`]
pub fn apply(raster: &Raster, rule: WindowRule<'_>, size: u32) -> FilterResult<Raster> {
    apply_with_border(raster, rule, size, BorderMode::default())
}

/// Apply a window rule to a gray raster with an explicit border mode.
pub fn apply_with_border(
    raster: &Raster,
    rule: WindowRule<'_>,
    size: u32,
    border: BorderMode,
) -> FilterResult<Raster> {
    check_gray(raster)?;
    rule.check_size(size)?;
    let src = FRaster::from_raster(raster)?;
    let out = apply_float_with_border(&src, rule, size, border)?;
    Ok(out.to_raster()?)
}

/// Apply a window rule to a float plane with reflect-101 borders.
///
/// Results are not clamped or rounded.
pub fn apply_float(src: &FRaster, rule: WindowRule<'_>, size: u32) -> FilterResult<FRaster> {
    apply_float_with_border(src, rule, size, BorderMode::default())
}

/// Apply a window rule to a float plane with an explicit border mode.
pub fn apply_float_with_border(
    src: &FRaster,
    rule: WindowRule<'_>,
    size: u32,
    border: BorderMode,
) -> FilterResult<FRaster> {
    rule.check_size(size)?;
    let (w, h) = src.dimensions();
    trace!("window {} size {} on {}x{} ({:?})", rule.name(), size, w, h, border);

    let padded = pad(src, size / 2, border)?;
    let pw = padded.width() as usize;
    let pdata = padded.data();
    let n = size as usize;
    let count = (n * n) as f64;

    let mut out = Vec::with_capacity(w as usize * h as usize);
    let mut window = Vec::with_capacity(n * n);
    for y in 0..h as usize {
        for x in 0..w as usize {
            let value = match rule {
                WindowRule::Convolve(kernel) => {
                    let weights = kernel.data();
                    let mut sum = 0.0f64;
                    for i in 0..n {
                        let row = &pdata[(y + i) * pw + x..(y + i) * pw + x + n];
                        for (v, k) in row.iter().zip(&weights[i * n..(i + 1) * n]) {
                            sum += *v as f64 * *k as f64;
                        }
                    }
                    (sum / kernel.divisor() as f64) as f32
                }
                WindowRule::Mean => {
                    let mut sum = 0.0f64;
                    for i in 0..n {
                        let row = &pdata[(y + i) * pw + x..(y + i) * pw + x + n];
                        sum += row.iter().map(|&v| v as f64).sum::<f64>();
                    }
                    (sum / count) as f32
                }
                WindowRule::Median => {
                    window.clear();
                    for i in 0..n {
                        window.extend_from_slice(&pdata[(y + i) * pw + x..(y + i) * pw + x + n]);
                    }
                    let mid = window.len() / 2;
                    let (_, median, _) = window.select_nth_unstable_by(mid, f32::total_cmp);
                    *median
                }
            };
            out.push(value);
        }
    }
    Ok(FRaster::from_data(w, h, out)?)
}
