//! pcxkit-io - Container decoding and image output
//!
//! Reads 8-bit, single-plane, run-length encoded PCX files into
//! [`pcxkit_core::Raster`]s and writes rasters back as PCX or binary PNM.
//!
//! # Example
//!
//! ```no_run
//! use pcxkit_io::read_pcx;
//!
//! let image = read_pcx("photo.pcx").unwrap();
//! for (key, value) in image.header.fields() {
//!     println!("{key}: {value}");
//! }
//! ```

mod error;
pub mod format;
pub mod header;
pub mod pcx;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use header::{HEADER_SIZE, PcxHeader, parse_header};
pub use pcx::{
    DecodeOptions, MIN_FILE_SIZE, PALETTE_TRAILER_SIZE, PcxImage, decode_pcx, decode_pcx_indexed,
    decode_pcx_with, decompress_rle, encode_pcx, read_palette, read_pcx, write_pcx,
};
pub use pnm::{read_pnm, write_pnm};

use pcxkit_core::Raster;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read any supported image file, sniffing the format from its content.
///
/// PCX files are returned as RGB rasters.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let data = std::fs::read(path.as_ref()).map_err(IoError::Io)?;
    match detect_format_from_bytes(&data)? {
        ImageFormat::Pcx => Ok(decode_pcx(&data)?.raster),
        ImageFormat::Pnm => read_pnm(BufReader::new(data.as_slice())),
    }
}

/// Write a raster to `path` in the given format.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P, format: ImageFormat) -> IoResult<()> {
    match format {
        ImageFormat::Pcx => write_pcx(raster, path),
        ImageFormat::Pnm => {
            let file = File::create(path.as_ref()).map_err(IoError::Io)?;
            write_pnm(raster, BufWriter::new(file))
        }
    }
}
