//! PCX container decoding and encoding
//!
//! Layout of a supported file:
//!
//! ```text
//! 0        128                        len-769  len-768          len
//! | header | run-length index stream | marker | 256 x (R, G, B) |
//! ```
//!
//! The index stream is one palette index per pixel, scanlines back to back.
//! A byte `b >= 0xC0` is a run marker repeating the next byte `b & 0x3F`
//! times; any other byte is a single literal index.

use crate::header::{HEADER_SIZE, PcxHeader, parse_header};
use crate::{IoError, IoResult};
use log::{debug, trace, warn};
use pcxkit_core::{Channels, PALETTE_SIZE, Palette, Raster, Rgb};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Size of the palette trailer: one marker byte and 768 color bytes
pub const PALETTE_TRAILER_SIZE: usize = 1 + 3 * PALETTE_SIZE;

/// Smallest file that can hold a header and a palette trailer
pub const MIN_FILE_SIZE: usize = HEADER_SIZE + PALETTE_TRAILER_SIZE;

/// Expected value of the byte preceding the palette
pub const PALETTE_MARKER: u8 = 0x0C;

/// Bytes at or above this value are run markers
const RUN_FLAG: u8 = 0xC0;

/// Longest run a single marker can express
const MAX_RUN: usize = 0x3F;

/// Decoder settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Treat a run marker without its data byte as `TruncatedFile`
    /// instead of the end of the stream.
    pub strict_runs: bool,
}

/// A decoded container
#[derive(Debug, Clone)]
pub struct PcxImage {
    pub header: PcxHeader,
    pub palette: Palette,
    /// RGB for [`decode_pcx`], indexed for [`decode_pcx_indexed`]
    pub raster: Raster,
}

fn check_min_size(data: &[u8]) -> IoResult<()> {
    if data.len() < MIN_FILE_SIZE {
        return Err(IoError::TruncatedFile {
            required: MIN_FILE_SIZE,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read the 256-color palette from the last 769 bytes of `data`.
///
/// A marker other than 0x0C is logged and kept on the palette.
pub fn read_palette(data: &[u8]) -> IoResult<Palette> {
    if data.len() < PALETTE_TRAILER_SIZE {
        return Err(IoError::TruncatedFile {
            required: PALETTE_TRAILER_SIZE,
            actual: data.len(),
        });
    }
    let trailer = &data[data.len() - PALETTE_TRAILER_SIZE..];
    let marker = trailer[0];
    if marker != PALETTE_MARKER {
        warn!("palette marker is 0x{marker:02X}, expected 0x{PALETTE_MARKER:02X}");
    }
    Ok(Palette::from_bytes(&trailer[1..])?.with_marker(marker))
}

/// Expand a run-length index stream.
///
/// `stream` is exactly the bytes between the header and the palette
/// trailer. A run marker in the last position has no data byte; by
/// default this ends the stream, with `strict_runs` it is an error.
pub fn decompress_rle(stream: &[u8], options: DecodeOptions) -> IoResult<Vec<u8>> {
    let mut out = Vec::with_capacity(stream.len() * 2);
    let mut pos = 0;
    while pos < stream.len() {
        let b = stream[pos];
        pos += 1;
        if b < RUN_FLAG {
            out.push(b);
            continue;
        }
        let Some(&value) = stream.get(pos) else {
            if options.strict_runs {
                return Err(IoError::TruncatedFile {
                    required: HEADER_SIZE + pos + 1 + PALETTE_TRAILER_SIZE,
                    actual: HEADER_SIZE + stream.len() + PALETTE_TRAILER_SIZE,
                });
            }
            warn!("run marker 0x{b:02X} at stream end has no data byte, ignoring");
            break;
        };
        pos += 1;
        let count = (b & 0x3F) as usize;
        out.resize(out.len() + count, value);
    }
    trace!("expanded {} stream bytes into {} indices", stream.len(), out.len());
    Ok(out)
}

/// Decode a container into an indexed raster carrying its palette.
pub fn decode_pcx_indexed(data: &[u8]) -> IoResult<PcxImage> {
    decode_indexed_with(data, DecodeOptions::default())
}

fn decode_indexed_with(data: &[u8], options: DecodeOptions) -> IoResult<PcxImage> {
    check_min_size(data)?;
    let header = parse_header(data)?;
    header.check_supported()?;
    let palette = read_palette(data)?;

    let width = header.width();
    let height = header.height();
    let expected = header.pixel_count();
    debug!(
        "decoding {}x{} PCX v{}, {} bytes",
        width,
        height,
        header.version,
        data.len()
    );

    let stream = &data[HEADER_SIZE..data.len() - PALETTE_TRAILER_SIZE];
    let mut indices = decompress_rle(stream, options)?;
    if indices.len() < expected {
        return Err(IoError::InsufficientData {
            expected,
            actual: indices.len(),
        });
    }
    if indices.len() > expected {
        trace!("dropping {} excess indices", indices.len() - expected);
        indices.truncate(expected);
    }

    let raster = Raster::from_indices(width, height, indices, palette.clone())?;
    Ok(PcxImage {
        header,
        palette,
        raster,
    })
}

/// Decode a container into an RGB raster.
///
/// Equivalent to [`decode_pcx_with`] with default options.
///
/// # Errors
///
/// - `TruncatedFile` if the file cannot hold a header and palette trailer
/// - `InvalidHeader` for an empty bounding box
/// - `UnsupportedFormat` for anything but 8-bit, 1-plane, RLE data
/// - `InsufficientData` if the stream holds fewer than width*height indices
pub fn decode_pcx(data: &[u8]) -> IoResult<PcxImage> {
    decode_pcx_with(data, DecodeOptions::default())
}

/// Decode a container into an RGB raster with explicit options.
pub fn decode_pcx_with(data: &[u8], options: DecodeOptions) -> IoResult<PcxImage> {
    let indexed = decode_indexed_with(data, options)?;
    let raster = indexed.raster.expand_palette()?;
    Ok(PcxImage { raster, ..indexed })
}

/// Read and decode a PCX file into an RGB raster.
///
/// The whole file is read up front; no handle is kept afterwards.
pub fn read_pcx<P: AsRef<Path>>(path: P) -> IoResult<PcxImage> {
    let data = fs::read(path.as_ref()).map_err(IoError::Io)?;
    decode_pcx(&data)
}

/// Run-length encode one scanline, appending to `out`.
fn encode_scanline(line: &[u8], out: &mut Vec<u8>) {
    let mut i = 0;
    while i < line.len() {
        let value = line[i];
        let mut run = 1;
        while run < MAX_RUN && i + run < line.len() && line[i + run] == value {
            run += 1;
        }
        if run > 1 || value >= RUN_FLAG {
            out.push(RUN_FLAG | run as u8);
        }
        out.push(value);
        i += run;
    }
}

/// Derive a palette and index plane for an RGB raster.
///
/// Colors are assigned palette slots in first-seen order; unused slots
/// are black.
fn index_rgb(raster: &Raster) -> IoResult<(Vec<u8>, Palette)> {
    let mut slots: HashMap<(u8, u8, u8), u8> = HashMap::new();
    let mut colors = Vec::new();
    let mut indices = Vec::with_capacity(raster.pixel_count());
    for px in raster.data().chunks_exact(3) {
        let key = (px[0], px[1], px[2]);
        let index = match slots.get(&key) {
            Some(&i) => i,
            None => {
                if colors.len() == PALETTE_SIZE {
                    return Err(IoError::UnsupportedFormat(format!(
                        "image has more than {PALETTE_SIZE} distinct colors"
                    )));
                }
                let i = colors.len() as u8;
                colors.push(Rgb::new(px[0], px[1], px[2]));
                slots.insert(key, i);
                i
            }
        };
        indices.push(index);
    }
    colors.resize(PALETTE_SIZE, Rgb::default());
    Ok((indices, Palette::new(colors)?))
}

/// Encode a raster as an 8-bit, single-plane PCX container.
///
/// Indexed rasters keep their palette, plain gray rasters get a grayscale
/// palette, and RGB rasters are indexed by distinct color.
///
/// # Errors
///
/// Returns `UnsupportedFormat` for an RGB raster with more than 256
/// distinct colors, or `InvalidHeader` if a dimension exceeds 65536.
pub fn encode_pcx(raster: &Raster) -> IoResult<Vec<u8>> {
    let header = PcxHeader::for_indexed(raster.width(), raster.height())?;
    let (indices, palette) = match (raster.channels(), raster.palette()) {
        (Channels::Gray, Some(palette)) => (raster.data().to_vec(), palette.clone()),
        (Channels::Gray, None) => (raster.data().to_vec(), Palette::grayscale()),
        (Channels::Rgb, _) => index_rgb(raster)?,
    };

    let mut out = Vec::with_capacity(MIN_FILE_SIZE + indices.len());
    out.extend_from_slice(&header.to_bytes());
    for line in indices.chunks(raster.width() as usize) {
        encode_scanline(line, &mut out);
    }
    out.push(PALETTE_MARKER);
    out.extend_from_slice(&palette.to_bytes());
    debug!(
        "encoded {}x{} raster into {} bytes",
        raster.width(),
        raster.height(),
        out.len()
    );
    Ok(out)
}

/// Encode a raster and write it to `path`.
pub fn write_pcx<P: AsRef<Path>>(raster: &Raster, path: P) -> IoResult<()> {
    let bytes = encode_pcx(raster)?;
    let mut file = fs::File::create(path.as_ref()).map_err(IoError::Io)?;
    file.write_all(&bytes).map_err(IoError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcxkit_test::synthetic::{PcxFixture, literal_body, ramp_palette};

    #[test]
    fn test_run_marker() {
        let out = decompress_rle(&[0xC3, 0x05], DecodeOptions::default()).unwrap();
        assert_eq!(out, vec![5, 5, 5]);
    }

    #[test]
    fn test_literal() {
        let out = decompress_rle(&[0x10], DecodeOptions::default()).unwrap();
        assert_eq!(out, vec![0x10]);
    }

    #[test]
    fn test_zero_length_run() {
        let out = decompress_rle(&[0xC0, 0x07, 0x01], DecodeOptions::default()).unwrap();
        assert_eq!(out, vec![1]);
    }

    #[test]
    fn test_truncated_run_policy() {
        let lenient = decompress_rle(&[0x01, 0xC4], DecodeOptions::default()).unwrap();
        assert_eq!(lenient, vec![1]);

        let strict = decompress_rle(&[0x01, 0xC4], DecodeOptions { strict_runs: true });
        assert!(matches!(strict, Err(IoError::TruncatedFile { .. })));
    }

    #[test]
    fn test_short_file() {
        let data = vec![0x0A; MIN_FILE_SIZE - 1];
        assert!(matches!(
            decode_pcx(&data),
            Err(IoError::TruncatedFile { required: 897, .. })
        ));
    }

    #[test]
    fn test_encoding_must_be_rle() {
        let mut fx = PcxFixture::new(2, 2, vec![0, 1, 2, 3]);
        fx.encoding = 0;
        assert!(matches!(
            decode_pcx(&fx.to_bytes()),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_insufficient_and_excess() {
        let short = PcxFixture::new(2, 2, vec![0, 1, 2]).to_bytes();
        assert!(matches!(
            decode_pcx(&short),
            Err(IoError::InsufficientData { expected: 4, actual: 3 })
        ));

        let long = PcxFixture::new(2, 2, vec![0xC6, 9]).to_bytes();
        let img = decode_pcx_indexed(&long).unwrap();
        assert_eq!(img.raster.data(), &[9, 9, 9, 9]);
    }

    #[test]
    fn test_marker_kept() {
        let mut fx = PcxFixture::new(1, 1, vec![0]);
        fx.marker = 0x00;
        let img = decode_pcx(&fx.to_bytes()).unwrap();
        assert_eq!(img.palette.marker(), 0x00);
    }

    #[test]
    fn test_scanline_encoding() {
        let mut out = Vec::new();
        encode_scanline(&[7, 7, 7, 0xC8, 1], &mut out);
        assert_eq!(out, vec![0xC3, 7, 0xC1, 0xC8, 1]);

        let mut out = Vec::new();
        encode_scanline(&[4; 70], &mut out);
        assert_eq!(out, vec![0xFF, 4, 0xC7, 4]);
    }

    #[test]
    fn test_encode_roundtrip_indexed() {
        let indices: Vec<u8> = (0..=255).collect();
        let body = literal_body(&indices);
        let bytes = PcxFixture::new(16, 16, body)
            .with_palette(ramp_palette())
            .to_bytes();
        let img = decode_pcx_indexed(&bytes).unwrap();
        let again = decode_pcx_indexed(&encode_pcx(&img.raster).unwrap()).unwrap();
        assert_eq!(again.raster.data(), img.raster.data());
        assert_eq!(again.palette, img.palette);
    }

    #[test]
    fn test_encode_rgb_too_many_colors() {
        let data: Vec<u8> = (0..300u32)
            .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0])
            .collect();
        let r = Raster::from_samples(300, 1, Channels::Rgb, data).unwrap();
        assert!(matches!(encode_pcx(&r), Err(IoError::UnsupportedFormat(_))));
    }
}
