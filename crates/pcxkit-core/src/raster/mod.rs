//! Raster - The main sample container
//!
//! `Raster` holds a dense, row-major array of 8-bit samples with either one
//! channel (gray, or palette indices when a [`Palette`] is attached) or three
//! interleaved channels (RGB).
//!
//! # Ownership model
//!
//! `Raster` uses `Arc` for cheap cloning of an immutable buffer. Every
//! transform allocates a fresh buffer for its output; to build or modify
//! sample data, convert to `RasterMut` via [`Raster::try_into_mut`] or
//! [`Raster::to_mut`], then convert back with `Into<Raster>`.

mod access;
pub mod arith;
pub mod convert;

use crate::Palette;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Number of interleaved channels per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Channels {
    /// One sample per pixel (grayscale or palette index)
    Gray = 1,
    /// Three samples per pixel, in R, G, B order
    Rgb = 3,
}

impl Channels {
    /// Create `Channels` from a raw channel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] if `count` is not 1 or 3.
    pub fn from_count(count: usize) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            _ => Err(Error::UnsupportedChannels {
                expected: "1 or 3",
                actual: count,
            }),
        }
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn count(self) -> usize {
        self as usize
    }
}

/// Clamp a floating-point sample to `[0, 255]` and round it to the nearest
/// integer.
///
/// This is the only place where intermediate float math becomes an 8-bit
/// sample; filters keep `f32` precision until they hand a raster back.
#[inline]
pub fn finalize_sample(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

#[derive(Debug)]
struct RasterData {
    width: u32,
    height: u32,
    channels: Channels,
    /// Present only for indexed (1-channel) rasters
    palette: Option<Palette>,
    data: Vec<u8>,
}

impl RasterData {
    fn sample_count(width: u32, height: u32, channels: Channels) -> usize {
        (width as usize) * (height as usize) * channels.count()
    }
}

/// Immutable raster
///
/// # Examples
///
/// ```
/// use pcxkit_core::{Channels, Raster};
///
/// let raster = Raster::new(64, 48, Channels::Gray).unwrap();
/// assert_eq!(raster.width(), 64);
/// assert_eq!(raster.height(), 48);
/// assert_eq!(raster.data().len(), 64 * 48);
/// ```
#[derive(Debug, Clone)]
pub struct Raster {
    inner: Arc<RasterData>,
}

impl Raster {
    /// Create a new zero-filled raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let data = vec![0u8; RasterData::sample_count(width, height, channels)];
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                channels,
                palette: None,
                data,
            }),
        })
    }

    /// Create a raster from interleaved, row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::InvalidParameter`] if `data` does not hold exactly
    /// `width * height * channels` samples.
    pub fn from_samples(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = RasterData::sample_count(width, height, channels);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "sample count {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                channels.count(),
                expected
            )));
        }
        Ok(Raster {
            inner: Arc::new(RasterData {
                width,
                height,
                channels,
                palette: None,
                data,
            }),
        })
    }

    /// Create an indexed raster: one palette index per pixel plus the palette.
    pub fn from_indices(width: u32, height: u32, indices: Vec<u8>, palette: Palette) -> Result<Self> {
        let raster = Self::from_samples(width, height, Channels::Gray, indices)?;
        let mut raster_mut = raster.try_into_mut().unwrap_or_else(|r| r.to_mut());
        raster_mut.set_palette(Some(palette))?;
        Ok(raster_mut.into())
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.inner.width as usize) * (self.inner.height as usize)
    }

    /// Check whether this raster stores palette indices.
    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.inner.palette.is_some()
    }

    #[inline]
    pub fn palette(&self) -> Option<&Palette> {
        self.inner.palette.as_ref()
    }

    /// Get raw access to the interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of one row.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.inner.width as usize * self.inner.channels.count();
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Check if two rasters have the same width, height and channel layout.
    pub fn sizes_equal(&self, other: &Raster) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.channels == other.inner.channels
    }

    /// Try to get mutable access to the samples.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<RasterMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(RasterMut { inner: data }),
            Err(arc) => Err(Raster { inner: arc }),
        }
    }

    /// Create a mutable copy of this raster.
    pub fn to_mut(&self) -> RasterMut {
        RasterMut {
            inner: RasterData {
                width: self.inner.width,
                height: self.inner.height,
                channels: self.inner.channels,
                palette: self.inner.palette.clone(),
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Mutable raster
///
/// Convert back to an immutable [`Raster`] using `Into<Raster>`.
#[derive(Debug)]
pub struct RasterMut {
    inner: RasterData,
}

impl RasterMut {
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Attach or detach a palette.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedChannels`] when attaching a palette to a
    /// multi-channel raster.
    pub fn set_palette(&mut self, palette: Option<Palette>) -> Result<()> {
        if palette.is_some() && self.inner.channels != Channels::Gray {
            return Err(Error::UnsupportedChannels {
                expected: "1 (indexed)",
                actual: self.inner.channels.count(),
            });
        }
        self.inner.palette = palette;
        Ok(())
    }

    /// Fill every sample with `value`.
    pub fn fill(&mut self, value: u8) {
        self.inner.data.fill(value);
    }
}

impl From<RasterMut> for Raster {
    fn from(raster_mut: RasterMut) -> Self {
        Raster {
            inner: Arc::new(raster_mut.inner),
        }
    }
}
