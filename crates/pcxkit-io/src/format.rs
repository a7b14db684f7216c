//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Formats understood by pcxkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// ZSoft PCX, 8-bit single-plane with 256-color palette trailer
    Pcx,
    /// Binary PGM (P5) or PPM (P6)
    Pnm,
}

impl ImageFormat {
    /// Conventional file extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Pcx => "pcx",
            ImageFormat::Pnm => "pnm",
        }
    }

    /// Guess the format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pcx" => Some(ImageFormat::Pcx),
            "pnm" | "pgm" | "ppm" => Some(ImageFormat::Pnm),
            _ => None,
        }
    }

    /// Guess the format from the extension of `path`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Magic numbers for image format detection
mod magic {
    /// PCX: ZSoft manufacturer byte
    pub const PCX_MANUFACTURER: u8 = 0x0A;

    /// PNM binary formats
    pub const PGM_BINARY: &[u8] = b"P5";
    pub const PPM_BINARY: &[u8] = b"P6";
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path).map_err(IoError::Io)?;
    let mut header = [0u8; 4];
    let bytes_read = file.read(&mut header).map_err(IoError::Io)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::TruncatedFile {
            required: 2,
            actual: data.len(),
        });
    }

    let first_two = &data[..2];
    if first_two == magic::PGM_BINARY || first_two == magic::PPM_BINARY {
        return Ok(ImageFormat::Pnm);
    }

    // Version byte of every released PCX revision is 0..=5
    if data[0] == magic::PCX_MANUFACTURER && data[1] <= 5 {
        return Ok(ImageFormat::Pcx);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_pcx() {
        let data = [0x0A, 0x05, 0x01, 0x08];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Pcx);
    }

    #[test]
    fn test_detect_pnm() {
        assert_eq!(
            detect_format_from_bytes(b"P5\n100 100\n255\n").unwrap(),
            ImageFormat::Pnm
        );
        assert_eq!(
            detect_format_from_bytes(b"P6\n100 100\n255\n").unwrap(),
            ImageFormat::Pnm
        );
    }

    #[test]
    fn test_detect_unknown() {
        assert!(detect_format_from_bytes(b"UNKNOWN_FORMAT").is_err());
        assert!(detect_format_from_bytes(&[0x0A, 0x40]).is_err());
        assert!(detect_format_from_bytes(&[0x0A]).is_err());
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ImageFormat::from_extension("PCX"), Some(ImageFormat::Pcx));
        assert_eq!(ImageFormat::from_path("a/b.ppm"), Some(ImageFormat::Pnm));
        assert_eq!(ImageFormat::from_path("a/b.bmp"), None);
    }
}
