//! Sample access functions
//!
//! Samples are interleaved per pixel, so sample `c` of pixel `(x, y)` lives
//! at `(y * width + x) * channels + c`.

use super::{Channels, Raster, RasterMut};
use crate::error::{Error, Result};

#[inline]
fn sample_index(width: u32, channels: Channels, x: u32, y: u32, c: usize) -> usize {
    ((y as usize) * (width as usize) + (x as usize)) * channels.count() + c
}

impl Raster {
    /// Get sample `c` of pixel `(x, y)`.
    ///
    /// Returns `None` if the coordinates or channel are out of range.
    pub fn get(&self, x: u32, y: u32, c: usize) -> Option<u8> {
        if x >= self.width() || y >= self.height() || c >= self.channels().count() {
            return None;
        }
        Some(self.get_unchecked(x, y, c))
    }

    /// Get a sample without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the computed index is outside the buffer.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32, c: usize) -> u8 {
        self.data()[sample_index(self.width(), self.channels(), x, y, c)]
    }

    /// Get the displayed color of pixel `(x, y)`.
    ///
    /// RGB rasters return their samples, indexed rasters resolve through
    /// the palette, and plain gray rasters return `(v, v, v)`.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        match self.channels() {
            Channels::Rgb => Some((
                self.get_unchecked(x, y, 0),
                self.get_unchecked(x, y, 1),
                self.get_unchecked(x, y, 2),
            )),
            Channels::Gray => {
                let v = self.get_unchecked(x, y, 0);
                match self.palette() {
                    Some(palette) => Some(palette.get(v).to_tuple()),
                    None => Some((v, v, v)),
                }
            }
        }
    }
}

impl RasterMut {
    /// Get sample `c` of pixel `(x, y)`.
    pub fn get(&self, x: u32, y: u32, c: usize) -> Option<u8> {
        if x >= self.width() || y >= self.height() || c >= self.channels().count() {
            return None;
        }
        Some(self.data()[sample_index(self.width(), self.channels(), x, y, c)])
    }

    /// Set sample `c` of pixel `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates or channel are out of range.
    pub fn set(&mut self, x: u32, y: u32, c: usize, val: u8) -> Result<()> {
        if x >= self.width() || y >= self.height() || c >= self.channels().count() {
            return Err(Error::IndexOutOfBounds {
                index: sample_index(self.width(), self.channels(), x, y, c),
                len: self.data().len(),
            });
        }
        self.set_unchecked(x, y, c, val);
        Ok(())
    }

    /// Set a sample without bounds checking.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, c: usize, val: u8) {
        let idx = sample_index(self.width(), self.channels(), x, y, c);
        self.data_mut()[idx] = val;
    }

    /// Set all three samples of an RGB pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] on a 1-channel raster and
    /// [`Error::IndexOutOfBounds`] for coordinates outside the raster.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.channels() != Channels::Rgb {
            return Err(Error::UnsupportedChannels {
                expected: "3 (RGB)",
                actual: self.channels().count(),
            });
        }
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: sample_index(self.width(), self.channels(), x, y, 0),
                len: self.data().len(),
            });
        }
        self.set_rgb_unchecked(x, y, r, g, b);
        Ok(())
    }

    /// Set an RGB pixel without bounds or layout checking.
    #[inline]
    pub fn set_rgb_unchecked(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) {
        let idx = sample_index(self.width(), self.channels(), x, y, 0);
        let data = self.data_mut();
        data[idx] = r;
        data[idx + 1] = g;
        data[idx + 2] = b;
    }
}

#[cfg(test)]
mod tests {
    use crate::{Channels, Palette, Raster, Rgb};

    #[test]
    fn test_get_set_gray() {
        let mut m = Raster::new(3, 2, Channels::Gray).unwrap().to_mut();
        m.set(2, 1, 0, 99).unwrap();
        assert!(m.set(3, 0, 0, 1).is_err());
        assert!(m.set(0, 0, 1, 1).is_err());
        let r: Raster = m.into();
        assert_eq!(r.get(2, 1, 0), Some(99));
        assert_eq!(r.get(0, 2, 0), None);
        assert_eq!(r.get_rgb(2, 1), Some((99, 99, 99)));
    }

    #[test]
    fn test_get_set_rgb() {
        let mut m = Raster::new(2, 2, Channels::Rgb).unwrap().to_mut();
        m.set_rgb(1, 0, 10, 20, 30).unwrap();
        let r: Raster = m.into();
        assert_eq!(r.get_rgb(1, 0), Some((10, 20, 30)));
        assert_eq!(r.get(1, 0, 2), Some(30));
        assert_eq!(&r.data()[3..6], &[10, 20, 30]);
    }

    #[test]
    fn test_set_rgb_on_gray_fails() {
        let mut m = Raster::new(2, 2, Channels::Gray).unwrap().to_mut();
        assert!(m.set_rgb(0, 0, 1, 2, 3).is_err());
    }

    #[test]
    fn test_get_rgb_indexed() {
        let mut colors = vec![Rgb::default(); 256];
        colors[5] = Rgb::new(1, 2, 3);
        let pal = Palette::new(colors).unwrap();
        let r = Raster::from_indices(1, 1, vec![5], pal).unwrap();
        assert_eq!(r.get_rgb(0, 0), Some((1, 2, 3)));
        assert_eq!(r.get(0, 0, 0), Some(5));
    }
}
