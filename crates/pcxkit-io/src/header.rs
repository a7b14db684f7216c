//! PCX header parsing
//!
//! The header occupies the first 128 bytes of the file. All multi-byte
//! fields are little-endian.

use crate::{IoError, IoResult};
use log::warn;

/// Size of the fixed header in bytes
pub const HEADER_SIZE: usize = 128;

/// Manufacturer byte written by every ZSoft-compatible tool
pub const PCX_MANUFACTURER: u8 = 0x0A;

/// Encoding byte for run-length compression
pub const ENCODING_RLE: u8 = 1;

/// Offset of the 16-color EGA palette inside the header
const EGA_PALETTE_OFFSET: usize = 16;
const EGA_PALETTE_SIZE: usize = 48;

/// Parsed PCX header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcxHeader {
    pub manufacturer: u8,
    pub version: u8,
    pub encoding: u8,
    pub bits_per_pixel: u8,
    pub xmin: u16,
    pub ymin: u16,
    pub xmax: u16,
    pub ymax: u16,
    /// Horizontal resolution in DPI
    pub hdpi: u16,
    /// Vertical resolution in DPI
    pub vdpi: u16,
    /// Legacy 16-color palette, unused for 8-bit images
    pub ega_palette: [u8; EGA_PALETTE_SIZE],
    pub reserved: u8,
    pub planes: u8,
    pub bytes_per_line: u16,
    pub palette_info: u16,
    pub h_screen_size: u16,
    pub v_screen_size: u16,
}

#[inline]
fn le_u16(h: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([h[offset], h[offset + 1]])
}

/// Parse the 128-byte header at the start of `data`.
///
/// Only the structure is checked here: the bounding box must describe a
/// non-empty image. Encoding, depth and plane count are checked by the
/// decoder so that unsupported files can still have their header listed.
///
/// # Errors
///
/// - `TruncatedFile` if `data` is shorter than 128 bytes
/// - `InvalidHeader` if `xmax < xmin` or `ymax < ymin`
pub fn parse_header(data: &[u8]) -> IoResult<PcxHeader> {
    if data.len() < HEADER_SIZE {
        return Err(IoError::TruncatedFile {
            required: HEADER_SIZE,
            actual: data.len(),
        });
    }
    let h = &data[..HEADER_SIZE];

    let mut ega_palette = [0u8; EGA_PALETTE_SIZE];
    ega_palette.copy_from_slice(&h[EGA_PALETTE_OFFSET..EGA_PALETTE_OFFSET + EGA_PALETTE_SIZE]);

    let header = PcxHeader {
        manufacturer: h[0],
        version: h[1],
        encoding: h[2],
        bits_per_pixel: h[3],
        xmin: le_u16(h, 4),
        ymin: le_u16(h, 6),
        xmax: le_u16(h, 8),
        ymax: le_u16(h, 10),
        hdpi: le_u16(h, 12),
        vdpi: le_u16(h, 14),
        ega_palette,
        reserved: h[64],
        planes: h[65],
        bytes_per_line: le_u16(h, 66),
        palette_info: le_u16(h, 68),
        h_screen_size: le_u16(h, 70),
        v_screen_size: le_u16(h, 72),
    };

    if header.xmax < header.xmin || header.ymax < header.ymin {
        return Err(IoError::InvalidHeader(format!(
            "empty bounding box ({}, {})-({}, {})",
            header.xmin, header.ymin, header.xmax, header.ymax
        )));
    }
    if header.manufacturer != PCX_MANUFACTURER {
        warn!(
            "unexpected PCX manufacturer byte 0x{:02X}, continuing",
            header.manufacturer
        );
    }

    Ok(header)
}

impl PcxHeader {
    /// Header for an 8-bit, single-plane, RLE image anchored at (0, 0).
    ///
    /// Returns `InvalidHeader` if either dimension is 0 or exceeds 65536.
    pub fn for_indexed(width: u32, height: u32) -> IoResult<Self> {
        if width == 0 || height == 0 || width > 0x1_0000 || height > 0x1_0000 {
            return Err(IoError::InvalidHeader(format!(
                "cannot describe a {width}x{height} image"
            )));
        }
        Ok(PcxHeader {
            manufacturer: PCX_MANUFACTURER,
            version: 5,
            encoding: ENCODING_RLE,
            bits_per_pixel: 8,
            xmin: 0,
            ymin: 0,
            xmax: (width - 1) as u16,
            ymax: (height - 1) as u16,
            hdpi: 72,
            vdpi: 72,
            ega_palette: [0; EGA_PALETTE_SIZE],
            reserved: 0,
            planes: 1,
            // Scanlines are written back to back without padding
            bytes_per_line: width.min(u16::MAX as u32) as u16,
            palette_info: 1,
            h_screen_size: 0,
            v_screen_size: 0,
        })
    }

    /// Image width, `xmax - xmin + 1`
    pub fn width(&self) -> u32 {
        self.xmax as u32 - self.xmin as u32 + 1
    }

    /// Image height, `ymax - ymin + 1`
    pub fn height(&self) -> u32 {
        self.ymax as u32 - self.ymin as u32 + 1
    }

    /// Number of pixels the index stream must supply
    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Reject anything outside the 8-bit, single-plane, RLE family.
    pub fn check_supported(&self) -> IoResult<()> {
        if self.encoding != ENCODING_RLE {
            return Err(IoError::UnsupportedFormat(format!(
                "encoding {} (only run-length encoding 1 is supported)",
                self.encoding
            )));
        }
        if self.bits_per_pixel != 8 {
            return Err(IoError::UnsupportedFormat(format!(
                "{} bits per pixel (only 8 is supported)",
                self.bits_per_pixel
            )));
        }
        if self.planes != 1 {
            return Err(IoError::UnsupportedFormat(format!(
                "{} planes (only 1 is supported)",
                self.planes
            )));
        }
        Ok(())
    }

    /// Ordered key-value listing for display.
    pub fn fields(&self) -> Vec<(&'static str, u32)> {
        vec![
            ("Manufacturer", self.manufacturer as u32),
            ("Version", self.version as u32),
            ("Encoding", self.encoding as u32),
            ("BitsPerPixel", self.bits_per_pixel as u32),
            ("Xmin", self.xmin as u32),
            ("Ymin", self.ymin as u32),
            ("Xmax", self.xmax as u32),
            ("Ymax", self.ymax as u32),
            ("HDPI", self.hdpi as u32),
            ("VDPI", self.vdpi as u32),
            ("NPlanes", self.planes as u32),
            ("BytesPerLine", self.bytes_per_line as u32),
            ("PaletteInfo", self.palette_info as u32),
            ("HScreenSize", self.h_screen_size as u32),
            ("VScreenSize", self.v_screen_size as u32),
            ("Width", self.width()),
            ("Height", self.height()),
        ]
    }

    /// Serialize back to the 128-byte on-disk layout.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut h = [0u8; HEADER_SIZE];
        h[0] = self.manufacturer;
        h[1] = self.version;
        h[2] = self.encoding;
        h[3] = self.bits_per_pixel;
        for (offset, value) in [
            (4, self.xmin),
            (6, self.ymin),
            (8, self.xmax),
            (10, self.ymax),
            (12, self.hdpi),
            (14, self.vdpi),
            (66, self.bytes_per_line),
            (68, self.palette_info),
            (70, self.h_screen_size),
            (72, self.v_screen_size),
        ] {
            h[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        }
        h[EGA_PALETTE_OFFSET..EGA_PALETTE_OFFSET + EGA_PALETTE_SIZE]
            .copy_from_slice(&self.ega_palette);
        h[64] = self.reserved;
        h[65] = self.planes;
        h
    }
}
