//! Intensity histograms
//!
//! A [`Histogram`] counts the occurrences of each 8-bit intensity in a
//! raster. Counting always happens on the grayscale conversion unless a
//! single color component is requested with [`Histogram::of_channel`].

use crate::error::Result;
use crate::raster::{Channels, Raster};

/// Number of bins in every histogram
pub const HISTOGRAM_BINS: usize = 256;

/// 256-bin intensity histogram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u32; HISTOGRAM_BINS],
}

impl Default for Histogram {
    fn default() -> Self {
        Histogram {
            counts: [0; HISTOGRAM_BINS],
        }
    }
}

impl Histogram {
    /// Build a histogram from raw bin counts.
    pub fn from_counts(counts: [u32; HISTOGRAM_BINS]) -> Self {
        Histogram { counts }
    }

    /// Count the intensities of a raster.
    ///
    /// RGB and indexed rasters are converted to grayscale first, so the
    /// counts always sum to `width * height`.
    ///
    /// # Example
    ///
    /// ```
    /// use pcxkit_core::{Channels, Histogram, Raster};
    ///
    /// let r = Raster::from_samples(2, 2, Channels::Gray, vec![0, 0, 7, 255]).unwrap();
    /// let h = Histogram::of(&r).unwrap();
    /// assert_eq!(h.get(0), 2);
    /// assert_eq!(h.total(), 4);
    /// ```
    pub fn of(raster: &Raster) -> Result<Histogram> {
        if raster.channels() == Channels::Gray && !raster.is_indexed() {
            return Ok(Self::count_samples(raster.data()));
        }
        let gray = raster.to_grayscale()?;
        Ok(Self::count_samples(gray.data()))
    }

    /// Count the values of one color component (0 red, 1 green, 2 blue).
    pub fn of_channel(raster: &Raster, c: usize) -> Result<Histogram> {
        let plane = raster.channel(c)?;
        Ok(Self::count_samples(plane.data()))
    }

    fn count_samples(samples: &[u8]) -> Histogram {
        let mut counts = [0u32; HISTOGRAM_BINS];
        for &v in samples {
            counts[v as usize] += 1;
        }
        Histogram { counts }
    }

    #[inline]
    pub fn counts(&self) -> &[u32; HISTOGRAM_BINS] {
        &self.counts
    }

    /// Count of a single bin
    #[inline]
    pub fn get(&self, value: u8) -> u32 {
        self.counts[value as usize]
    }

    /// Total number of samples counted
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Lowest and highest occupied intensity, or `None` when empty.
    pub fn occupied_range(&self) -> Option<(u8, u8)> {
        let lo = self.counts.iter().position(|&c| c > 0)?;
        let hi = self.counts.iter().rposition(|&c| c > 0)?;
        Some((lo as u8, hi as u8))
    }

    /// Running sum of the counts; `cdf[i]` is the number of samples `<= i`.
    pub fn cumulative(&self) -> [u64; HISTOGRAM_BINS] {
        let mut cdf = [0u64; HISTOGRAM_BINS];
        let mut acc = 0u64;
        for (slot, &c) in cdf.iter_mut().zip(&self.counts) {
            acc += c as u64;
            *slot = acc;
        }
        cdf
    }

    /// Cumulative distribution scaled to `[0, 1]`.
    ///
    /// Returns all zeros for an empty histogram.
    pub fn normalized_cdf(&self) -> [f32; HISTOGRAM_BINS] {
        let cdf = self.cumulative();
        let total = cdf[HISTOGRAM_BINS - 1];
        let mut out = [0.0f32; HISTOGRAM_BINS];
        if total == 0 {
            return out;
        }
        for (o, &c) in out.iter_mut().zip(&cdf) {
            *o = c as f32 / total as f32;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Palette, Rgb};

    #[test]
    fn test_rgb_counts_grayscale() {
        let r = Raster::from_samples(2, 1, Channels::Rgb, vec![255, 0, 1, 30, 30, 30]).unwrap();
        let h = Histogram::of(&r).unwrap();
        assert_eq!(h.get(85), 1);
        assert_eq!(h.get(30), 1);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn test_indexed_resolves_palette() {
        let mut colors = vec![Rgb::default(); 256];
        colors[3] = Rgb::new(90, 90, 90);
        let pal = Palette::new(colors).unwrap();
        let r = Raster::from_indices(2, 1, vec![3, 3], pal).unwrap();
        let h = Histogram::of(&r).unwrap();
        assert_eq!(h.get(90), 2);
        assert_eq!(h.get(3), 0);
    }

    #[test]
    fn test_of_channel() {
        let r = Raster::from_samples(2, 1, Channels::Rgb, vec![10, 20, 30, 10, 40, 50]).unwrap();
        assert_eq!(Histogram::of_channel(&r, 0).unwrap().get(10), 2);
        assert_eq!(Histogram::of_channel(&r, 1).unwrap().get(40), 1);
        assert!(Histogram::of_channel(&r, 3).is_err());
    }

    #[test]
    fn test_cumulative() {
        let r = Raster::from_samples(4, 1, Channels::Gray, vec![1, 1, 3, 255]).unwrap();
        let h = Histogram::of(&r).unwrap();
        let cdf = h.cumulative();
        assert_eq!(cdf[0], 0);
        assert_eq!(cdf[1], 2);
        assert_eq!(cdf[2], 2);
        assert_eq!(cdf[3], 3);
        assert_eq!(cdf[255], 4);
        assert_eq!(h.occupied_range(), Some((1, 255)));
        assert_eq!(h.normalized_cdf()[255], 1.0);
    }

    #[test]
    fn test_empty() {
        let h = Histogram::default();
        assert_eq!(h.occupied_range(), None);
        assert_eq!(h.normalized_cdf()[255], 0.0);
    }
}
