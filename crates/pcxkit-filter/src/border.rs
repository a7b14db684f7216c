//! Border handling for windowed filters
//!
//! Windows that reach past the image edge read from a virtual border.
//! [`map_index`] resolves a possibly out-of-range coordinate and [`pad`]
//! materializes the border around a float raster.

use crate::{FilterError, FilterResult};
use pcxkit_core::FRaster;

/// How samples outside the image are synthesized
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BorderMode {
    /// Mirror about the edge sample without repeating it:
    /// `c b | a b c d | c b`
    #[default]
    Reflect101,
    /// Repeat the edge sample: `a a | a b c d | d d`
    Replicate,
    /// Use a fixed value outside the image
    Constant(f32),
}

/// Resolve coordinate `i` along an axis of length `n`.
///
/// Returns `None` only for [`BorderMode::Constant`] when `i` is outside
/// `0..n`, or when `n` is 0.
pub fn map_index(i: i64, n: usize, mode: BorderMode) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let last = n as i64 - 1;
    if (0..=last).contains(&i) {
        return Some(i as usize);
    }
    match mode {
        BorderMode::Reflect101 => {
            if n == 1 {
                return Some(0);
            }
            // Reflection is periodic with period 2 * (n - 1)
            let period = 2 * last;
            let m = i.rem_euclid(period);
            let reflected = if m > last { period - m } else { m };
            Some(reflected as usize)
        }
        BorderMode::Replicate => Some(i.clamp(0, last) as usize),
        BorderMode::Constant(_) => None,
    }
}

/// Surround `src` with a border of `radius` samples on every side.
///
/// The result is `(w + 2r) x (h + 2r)`; sample `(x + r, y + r)` of the
/// result is sample `(x, y)` of `src`.
///
/// # Errors
///
/// Returns `InvalidParameter` if the padded dimensions overflow.
pub fn pad(src: &FRaster, radius: u32, mode: BorderMode) -> FilterResult<FRaster> {
    let (w, h) = src.dimensions();
    let grow = |n: u32| radius.checked_mul(2).and_then(|d| n.checked_add(d));
    let (Some(pw), Some(ph)) = (grow(w), grow(h)) else {
        return Err(FilterError::InvalidParameter(format!(
            "border radius {radius} too large for {w}x{h}"
        )));
    };
    if (pw as usize).checked_mul(ph as usize).is_none() {
        return Err(FilterError::InvalidParameter(format!(
            "padded size {pw}x{ph} too large"
        )));
    }
    let fill = match mode {
        BorderMode::Constant(v) => v,
        _ => 0.0,
    };
    let r = radius as i64;

    let col_map: Vec<Option<usize>> = (0..pw as i64)
        .map(|px| map_index(px - r, w as usize, mode))
        .collect();

    let mut data = Vec::with_capacity(pw as usize * ph as usize);
    for py in 0..ph as i64 {
        match map_index(py - r, h as usize, mode) {
            Some(sy) => {
                let row = src.row(sy as u32);
                data.extend(col_map.iter().map(|c| c.map_or(fill, |sx| row[sx])));
            }
            None => data.extend(std::iter::repeat_n(fill, pw as usize)),
        }
    }
    Ok(FRaster::from_data(pw, ph, data)?)
}
