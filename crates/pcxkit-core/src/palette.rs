//! Palette - Color table for indexed rasters
//!
//! An indexed raster stores one byte per pixel; the palette maps that
//! byte to an RGB triple. Palettes always hold exactly 256 entries.

use crate::error::{Error, Result};
use crate::raster::{Channels, Raster};

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 256;

/// Marker byte that conventionally precedes a 256-color palette trailer.
pub const DEFAULT_MARKER: u8 = 0x0C;

/// RGB color entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a gray color with all three components equal.
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    /// Get the components as a tuple.
    #[inline]
    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }
}

/// Fixed-size 256-entry palette
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
    marker: u8,
}

impl Palette {
    /// Create a palette from exactly 256 colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `colors.len() != 256`.
    pub fn new(colors: Vec<Rgb>) -> Result<Self> {
        if colors.len() != PALETTE_SIZE {
            return Err(Error::InvalidParameter(format!(
                "palette needs {} entries, got {}",
                PALETTE_SIZE,
                colors.len()
            )));
        }
        Ok(Self {
            colors,
            marker: DEFAULT_MARKER,
        })
    }

    /// Create a palette from 768 packed `r, g, b` bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PALETTE_SIZE * 3 {
            return Err(Error::InvalidParameter(format!(
                "palette needs {} bytes, got {}",
                PALETTE_SIZE * 3,
                bytes.len()
            )));
        }
        let colors = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(colors)
    }

    /// Identity gray ramp: entry `i` is `(i, i, i)`.
    pub fn grayscale() -> Self {
        Self {
            colors: (0..PALETTE_SIZE).map(|i| Rgb::gray(i as u8)).collect(),
            marker: DEFAULT_MARKER,
        }
    }

    /// Return a copy carrying the given trailer marker byte.
    pub fn with_marker(mut self, marker: u8) -> Self {
        self.marker = marker;
        self
    }

    /// The marker byte read in front of the color data.
    #[inline]
    pub fn marker(&self) -> u8 {
        self.marker
    }

    /// Look up a color. Every `u8` index is valid.
    #[inline]
    pub fn get(&self, index: u8) -> Rgb {
        self.colors[index as usize]
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Pack the palette back into 768 `r, g, b` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.colors
            .iter()
            .flat_map(|c| [c.red, c.green, c.blue])
            .collect()
    }

    /// Render the palette as a grid of square swatches.
    ///
    /// Entries are laid out left to right, `cols` per row, each as a
    /// `swatch`-pixel square outlined in mid gray.
    pub fn preview(&self, cols: u32, swatch: u32) -> Result<Raster> {
        if cols == 0 || swatch == 0 {
            return Err(Error::InvalidParameter(
                "cols and swatch must be >= 1".to_string(),
            ));
        }
        let rows = (PALETTE_SIZE as u32).div_ceil(cols).max(1);
        let width = cols * swatch;
        let height = rows * swatch;
        let outline = Rgb::gray(128);

        let mut out = Raster::new(width, height, Channels::Rgb)?.to_mut();
        out.fill(255);
        for (i, &color) in self.colors.iter().enumerate() {
            let x0 = (i as u32 % cols) * swatch;
            let y0 = (i as u32 / cols) * swatch;
            for dy in 0..swatch {
                for dx in 0..swatch {
                    let on_edge = dx == 0 || dy == 0 || dx == swatch - 1 || dy == swatch - 1;
                    let c = if on_edge { outline } else { color };
                    out.set_rgb_unchecked(x0 + dx, y0 + dy, c.red, c.green, c.blue);
                }
            }
        }
        Ok(out.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let mut bytes = vec![0u8; 768];
        bytes[3] = 10;
        bytes[4] = 20;
        bytes[5] = 30;
        let pal = Palette::from_bytes(&bytes).unwrap();
        assert_eq!(pal.get(1), Rgb::new(10, 20, 30));
        assert_eq!(pal.to_bytes(), bytes);
        assert_eq!(pal.marker(), DEFAULT_MARKER);
    }

    #[test]
    fn test_wrong_size() {
        assert!(Palette::from_bytes(&[0u8; 767]).is_err());
        assert!(Palette::new(vec![Rgb::default(); 16]).is_err());
    }

    #[test]
    fn test_grayscale() {
        let pal = Palette::grayscale();
        assert_eq!(pal.get(200), Rgb::gray(200));
    }

    #[test]
    fn test_preview_layout() {
        let pal = Palette::grayscale();
        let img = pal.preview(16, 4).unwrap();
        assert_eq!(img.dimensions(), (64, 64));
        // Interior of swatch 17 (row 1, col 1)
        assert_eq!(img.get_rgb(5, 5), Some((17, 17, 17)));
        // Outline
        assert_eq!(img.get_rgb(4, 4), Some((128, 128, 128)));
    }
}
