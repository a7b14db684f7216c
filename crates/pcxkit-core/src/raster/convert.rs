//! Color layout conversions
//!
//! Palette expansion, grayscale conversion and channel splitting. All
//! conversions allocate a new raster.

use super::{Channels, Raster};
use crate::error::{Error, Result};

impl Raster {
    /// Expand to a 3-channel RGB raster.
    ///
    /// Indexed rasters substitute each index with its palette entry, plain
    /// gray rasters replicate the sample into all three channels, and RGB
    /// rasters are returned as a shared clone.
    pub fn expand_palette(&self) -> Result<Raster> {
        match (self.channels(), self.palette()) {
            (Channels::Rgb, _) => Ok(self.clone()),
            (Channels::Gray, Some(palette)) => {
                let data = self
                    .data()
                    .iter()
                    .flat_map(|&index| {
                        let c = palette.get(index);
                        [c.red, c.green, c.blue]
                    })
                    .collect();
                Raster::from_samples(self.width(), self.height(), Channels::Rgb, data)
            }
            (Channels::Gray, None) => {
                let data = self.data().iter().flat_map(|&v| [v, v, v]).collect();
                Raster::from_samples(self.width(), self.height(), Channels::Rgb, data)
            }
        }
    }

    /// Convert to a 1-channel gray raster.
    ///
    /// Luminance is the truncated arithmetic mean `(R + G + B) / 3`, not a
    /// perceptual weighting. Indexed rasters are resolved through their
    /// palette first; plain gray rasters are copied.
    pub fn to_grayscale(&self) -> Result<Raster> {
        match (self.channels(), self.palette()) {
            (Channels::Gray, None) => {
                Raster::from_samples(self.width(), self.height(), Channels::Gray, self.data().to_vec())
            }
            (Channels::Gray, Some(palette)) => {
                let data = self
                    .data()
                    .iter()
                    .map(|&index| {
                        let c = palette.get(index);
                        mean_of_three(c.red, c.green, c.blue)
                    })
                    .collect();
                Raster::from_samples(self.width(), self.height(), Channels::Gray, data)
            }
            (Channels::Rgb, _) => {
                let data = self
                    .data()
                    .chunks_exact(3)
                    .map(|px| mean_of_three(px[0], px[1], px[2]))
                    .collect();
                Raster::from_samples(self.width(), self.height(), Channels::Gray, data)
            }
        }
    }

    /// Extract one color component as a 1-channel raster.
    ///
    /// `c` is 0 for red, 1 for green, 2 for blue.
    pub fn channel(&self, c: usize) -> Result<Raster> {
        if c >= 3 {
            return Err(Error::InvalidParameter(format!(
                "channel index {c} out of range 0..3"
            )));
        }
        let rgb = self.expand_palette()?;
        let data = rgb.data().chunks_exact(3).map(|px| px[c]).collect();
        Raster::from_samples(self.width(), self.height(), Channels::Gray, data)
    }

    /// Interleave three same-sized gray planes into one RGB raster.
    ///
    /// The inverse of calling [`Raster::channel`] for 0, 1 and 2.
    pub fn from_channels(planes: &[Raster; 3]) -> Result<Raster> {
        let [r, g, b] = planes;
        for plane in planes {
            if plane.channels() != Channels::Gray || plane.is_indexed() {
                return Err(Error::UnsupportedChannels {
                    expected: "1 (gray, not indexed)",
                    actual: plane.channels().count(),
                });
            }
            if !plane.sizes_equal(r) {
                return Err(Error::IncompatibleSizes(
                    r.width(),
                    r.height(),
                    plane.width(),
                    plane.height(),
                ));
            }
        }
        let data = r
            .data()
            .iter()
            .zip(g.data())
            .zip(b.data())
            .flat_map(|((&rv, &gv), &bv)| [rv, gv, bv])
            .collect();
        Raster::from_samples(r.width(), r.height(), Channels::Rgb, data)
    }

    /// Split into red, green and blue display rasters.
    ///
    /// Each result is an RGB raster carrying one component with the other
    /// two zeroed, so it renders in its own hue.
    pub fn split_channels(&self) -> Result<[Raster; 3]> {
        let rgb = self.expand_palette()?;
        let isolate = |keep: usize| -> Result<Raster> {
            let data = rgb
                .data()
                .chunks_exact(3)
                .flat_map(|px| {
                    let mut out = [0u8; 3];
                    out[keep] = px[keep];
                    out
                })
                .collect();
            Raster::from_samples(rgb.width(), rgb.height(), Channels::Rgb, data)
        };
        Ok([isolate(0)?, isolate(1)?, isolate(2)?])
    }
}

#[inline]
fn mean_of_three(r: u8, g: u8, b: u8) -> u8 {
    ((r as u16 + g as u16 + b as u16) / 3) as u8
}
