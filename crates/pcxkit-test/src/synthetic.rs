//! In-memory fixtures for regression tests
//!
//! Rasters with known content and hand-assembled PCX containers, so tests
//! never depend on checked-in image files.

use crate::error::{TestError, TestResult};
use pcxkit_core::{Channels, PALETTE_SIZE, Palette, Raster, Rgb};

fn fixture_err(name: &str, e: impl std::fmt::Display) -> TestError {
    TestError::Fixture {
        name: name.to_string(),
        message: e.to_string(),
    }
}

/// Gray raster where every sample equals `value`.
pub fn uniform_gray(width: u32, height: u32, value: u8) -> TestResult<Raster> {
    let data = vec![value; (width * height) as usize];
    Raster::from_samples(width, height, Channels::Gray, data).map_err(|e| fixture_err("uniform_gray", e))
}

/// RGB raster where every pixel equals `(r, g, b)`.
pub fn uniform_rgb(width: u32, height: u32, r: u8, g: u8, b: u8) -> TestResult<Raster> {
    let data = [r, g, b].repeat((width * height) as usize);
    Raster::from_samples(width, height, Channels::Rgb, data).map_err(|e| fixture_err("uniform_rgb", e))
}

/// Horizontal gray ramp from 0 at the left edge to 255 at the right edge.
pub fn gradient_gray(width: u32, height: u32) -> TestResult<Raster> {
    let span = width.saturating_sub(1).max(1);
    let mut data = Vec::with_capacity((width * height) as usize);
    for _ in 0..height {
        for x in 0..width {
            data.push((x * 255 / span) as u8);
        }
    }
    Raster::from_samples(width, height, Channels::Gray, data).map_err(|e| fixture_err("gradient_gray", e))
}

/// High-contrast gray checkerboard alternating `dark` and `light` cells.
pub fn checkerboard_gray(width: u32, height: u32, cell: u32, dark: u8, light: u8) -> TestResult<Raster> {
    if cell == 0 {
        return Err(fixture_err("checkerboard_gray", "cell size must be positive"));
    }
    let mut data = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let parity = (x / cell + y / cell) & 1;
            data.push(if parity == 0 { dark } else { light });
        }
    }
    Raster::from_samples(width, height, Channels::Gray, data)
        .map_err(|e| fixture_err("checkerboard_gray", e))
}

/// Gray raster with a single bright pixel at `(x, y)` on a dark field.
pub fn impulse_gray(width: u32, height: u32, x: u32, y: u32, background: u8, peak: u8) -> TestResult<Raster> {
    let mut data = vec![background; (width * height) as usize];
    let idx = (y * width + x) as usize;
    if idx >= data.len() {
        return Err(fixture_err("impulse_gray", "impulse outside the raster"));
    }
    data[idx] = peak;
    Raster::from_samples(width, height, Channels::Gray, data).map_err(|e| fixture_err("impulse_gray", e))
}

/// Palette whose entry `i` is `(i, 255 - i, i / 2)`.
///
/// Every entry is distinct, so index-to-color mistakes show up in tests.
pub fn ramp_palette() -> Palette {
    let colors = (0..PALETTE_SIZE)
        .map(|i| Rgb::new(i as u8, 255 - i as u8, (i / 2) as u8))
        .collect();
    // 256 entries always form a valid palette
    Palette::new(colors).unwrap_or_else(|_| Palette::grayscale())
}

/// Builder for raw PCX container bytes
///
/// Defaults describe a valid 8-bit, single-plane, RLE-encoded image with
/// an empty body. Every header field can be overridden to exercise error
/// paths.
#[derive(Debug, Clone)]
pub struct PcxFixture {
    pub manufacturer: u8,
    pub version: u8,
    pub encoding: u8,
    pub bits_per_pixel: u8,
    pub planes: u8,
    pub xmin: u16,
    pub ymin: u16,
    pub xmax: u16,
    pub ymax: u16,
    pub hdpi: u16,
    pub vdpi: u16,
    pub bytes_per_line: u16,
    pub palette_info: u16,
    pub marker: u8,
    pub body: Vec<u8>,
    pub palette: Palette,
}

impl PcxFixture {
    /// Fixture for a `width` x `height` image with the given RLE body.
    pub fn new(width: u16, height: u16, body: Vec<u8>) -> Self {
        PcxFixture {
            manufacturer: 0x0A,
            version: 5,
            encoding: 1,
            bits_per_pixel: 8,
            planes: 1,
            xmin: 0,
            ymin: 0,
            xmax: width.saturating_sub(1),
            ymax: height.saturating_sub(1),
            hdpi: 72,
            vdpi: 72,
            bytes_per_line: width,
            palette_info: 1,
            marker: 0x0C,
            body,
            palette: Palette::grayscale(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Assemble header, body and palette trailer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut h = [0u8; 128];
        h[0] = self.manufacturer;
        h[1] = self.version;
        h[2] = self.encoding;
        h[3] = self.bits_per_pixel;
        h[4..6].copy_from_slice(&self.xmin.to_le_bytes());
        h[6..8].copy_from_slice(&self.ymin.to_le_bytes());
        h[8..10].copy_from_slice(&self.xmax.to_le_bytes());
        h[10..12].copy_from_slice(&self.ymax.to_le_bytes());
        h[12..14].copy_from_slice(&self.hdpi.to_le_bytes());
        h[14..16].copy_from_slice(&self.vdpi.to_le_bytes());
        h[65] = self.planes;
        h[66..68].copy_from_slice(&self.bytes_per_line.to_le_bytes());
        h[68..70].copy_from_slice(&self.palette_info.to_le_bytes());

        let mut out = Vec::with_capacity(128 + self.body.len() + 769);
        out.extend_from_slice(&h);
        out.extend_from_slice(&self.body);
        out.push(self.marker);
        out.extend_from_slice(&self.palette.to_bytes());
        out
    }
}

/// Encode indices as RLE using only literals and single-count runs.
///
/// Values below 0xC0 are written as literals; higher values are escaped
/// as a run of one. Useful for bodies that must not depend on an encoder.
pub fn literal_body(indices: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(indices.len());
    for &v in indices {
        if v >= 0xC0 {
            body.push(0xC1);
        }
        body.push(v);
    }
    body
}
