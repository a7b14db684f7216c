//! PNM (Portable Any Map) format support
//!
//! Reads and writes binary PGM (P5) and PPM (P6) with a maxval of 255.
//! Indexed rasters are expanded through their palette and written as P6.

use crate::{IoError, IoResult};
use pcxkit_core::{Channels, Raster};
use std::io::{Read, Write};

/// Write a raster as binary PNM.
///
/// Chooses P5 for plain gray rasters and P6 for RGB or indexed rasters.
pub fn write_pnm<W: Write>(raster: &Raster, mut writer: W) -> IoResult<()> {
    let (magic, raster) = match (raster.channels(), raster.is_indexed()) {
        (Channels::Gray, false) => ("P5", raster.clone()),
        _ => ("P6", raster.expand_palette()?),
    };
    write!(writer, "{}\n{} {}\n255\n", magic, raster.width(), raster.height())
        .map_err(IoError::Io)?;
    writer.write_all(raster.data()).map_err(IoError::Io)?;
    writer.flush().map_err(IoError::Io)?;
    Ok(())
}

/// Cursor over the ASCII part of a PNM header
struct HeaderReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl HeaderReader<'_> {
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&b) = self.data.get(self.pos) {
            if b == b'#' {
                while self.data.get(self.pos).is_some_and(|&c| c != b'\n') {
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn next_number(&mut self) -> IoResult<u32> {
        self.skip_whitespace_and_comments();
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidHeader(format!("expected a number at offset {start}")))
    }
}

/// Read a binary PGM (P5) or PPM (P6) image.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Raster> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(IoError::Io)?;
    if data.len() < 2 {
        return Err(IoError::TruncatedFile {
            required: 2,
            actual: data.len(),
        });
    }

    let channels = match &data[..2] {
        b"P5" => Channels::Gray,
        b"P6" => Channels::Rgb,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {}",
                String::from_utf8_lossy(other)
            )));
        }
    };

    let mut header = HeaderReader { data: &data, pos: 2 };
    let width = header.next_number()?;
    let height = header.next_number()?;
    let maxval = header.next_number()?;
    if maxval != 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "maxval {maxval} (only 255 is supported)"
        )));
    }
    // Exactly one whitespace byte separates the header from the samples
    let start = header.pos + 1;

    let needed = width as usize * height as usize * channels.count();
    if data.len() < start + needed {
        return Err(IoError::TruncatedFile {
            required: start + needed,
            actual: data.len(),
        });
    }
    let samples = data[start..start + needed].to_vec();
    Ok(Raster::from_samples(width, height, channels, samples)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_roundtrip() {
        let r = Raster::from_samples(3, 2, Channels::Gray, vec![0, 10, 20, 30, 40, 255]).unwrap();
        let mut buf = Vec::new();
        write_pnm(&r, &mut buf).unwrap();
        assert!(buf.starts_with(b"P5\n3 2\n255\n"));
        let back = read_pnm(buf.as_slice()).unwrap();
        assert_eq!(back.data(), r.data());
        assert_eq!(back.channels(), Channels::Gray);
    }

    #[test]
    fn test_comment_in_header() {
        let mut data = b"P6\n# made by hand\n1 1\n255\n".to_vec();
        data.extend_from_slice(&[1, 2, 3]);
        let r = read_pnm(data.as_slice()).unwrap();
        assert_eq!(r.get_rgb(0, 0), Some((1, 2, 3)));
    }

    #[test]
    fn test_rejects_ascii_and_short() {
        assert!(matches!(
            read_pnm(&b"P2\n1 1\n255\n0"[..]),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(&b"P5\n4 4\n255\n\x00"[..]),
            Err(IoError::TruncatedFile { .. })
        ));
    }
}
