//! Decode a PCX file and write every configured view of it.
//!
//! Output layout inside `output_dir`:
//!
//! | file                         | content                                   |
//! |------------------------------|-------------------------------------------|
//! | `header.txt`                 | header fields as `Key: value` lines       |
//! | `decoded.<ext>`              | palette-expanded RGB image                |
//! | `grayscale.<ext>`            | `(R + G + B) / 3` conversion              |
//! | `palette.<ext>`              | 16x16 grid of palette swatches            |
//! | `<n>_<key>.<ext>`            | output of the n-th configured filter      |
//! | `<n>_<key>_histogram.txt`    | `value count` lines, when the filter has one |

use crate::config::RunConfig;
use crate::error::{Error, Result};
use log::{debug, info};
use pcxkit_core::{Histogram, Raster};
use pcxkit_filter::{FilterCatalog, FilterSpec, ParamSet};
use pcxkit_io::{ImageFormat, PcxHeader, decode_pcx_with, write_image};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const PREVIEW_COLUMNS: u32 = 16;
const PREVIEW_SWATCH: u32 = 20;

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub header: PcxHeader,
    /// Every written file, in write order
    pub outputs: Vec<PathBuf>,
}

/// Render header fields, one `Key: value` per line.
pub fn header_text(header: &PcxHeader) -> String {
    let mut text = String::new();
    for (key, value) in header.fields() {
        // infallible for String
        let _ = writeln!(text, "{key}: {value}");
    }
    text
}

/// Render a histogram, one `value count` per line.
pub fn histogram_text(histogram: &Histogram) -> String {
    let mut text = String::new();
    for (value, count) in histogram.counts().iter().enumerate() {
        let _ = writeln!(text, "{value} {count}");
    }
    text
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).map_err(|source| Error::File {
        path: path.to_path_buf(),
        source,
    })
}

struct Writer<'a> {
    dir: &'a Path,
    format: ImageFormat,
    outputs: Vec<PathBuf>,
}

impl Writer<'_> {
    fn raster(&mut self, raster: &Raster, stem: &str) -> Result<()> {
        let path = self
            .dir
            .join(format!("{stem}.{}", self.format.extension()));
        write_image(raster, &path, self.format)?;
        debug!("wrote {}", path.display());
        self.outputs.push(path);
        Ok(())
    }

    fn text(&mut self, text: &str, name: &str) -> Result<()> {
        let path = self.dir.join(name);
        write_text(&path, text)?;
        debug!("wrote {}", path.display());
        self.outputs.push(path);
        Ok(())
    }
}

/// Execute a run.
///
/// Filter names and parameters are validated before the input is read,
/// so a bad configuration writes nothing.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let catalog = FilterCatalog::standard();
    let steps = config
        .filters
        .iter()
        .map(|step| {
            let spec = catalog.lookup(&step.name)?;
            spec.resolve(&step.params)?;
            Ok((spec, &step.params))
        })
        .collect::<Result<Vec<(&FilterSpec, &ParamSet)>>>()?;

    let data = fs::read(&config.input).map_err(|source| Error::File {
        path: config.input.clone(),
        source,
    })?;
    let image = decode_pcx_with(&data, config.decode_options())?;
    info!(
        "decoded {} ({}x{}, version {})",
        config.input.display(),
        image.header.width(),
        image.header.height(),
        image.header.version
    );

    fs::create_dir_all(&config.output_dir).map_err(|source| Error::File {
        path: config.output_dir.clone(),
        source,
    })?;
    let mut out = Writer {
        dir: &config.output_dir,
        format: config.format.into(),
        outputs: Vec::new(),
    };

    out.text(&header_text(&image.header), "header.txt")?;
    out.raster(&image.raster, "decoded")?;
    let gray = image.raster.to_grayscale()?;
    out.raster(&gray, "grayscale")?;
    let preview = image.palette.preview(PREVIEW_COLUMNS, PREVIEW_SWATCH)?;
    out.raster(&preview, "palette")?;

    for (i, (spec, params)) in steps.into_iter().enumerate() {
        let n = i + 1;
        info!("filter {n}: {}", spec.name);
        let output = spec.apply(&image.raster, params)?;
        let stem = format!("{n}_{}", spec.key);
        out.raster(&output.raster, &stem)?;
        if let Some(histogram) = &output.histogram {
            out.text(&histogram_text(histogram), &format!("{stem}_histogram.txt"))?;
        }
    }

    info!(
        "wrote {} file(s) to {}",
        out.outputs.len(),
        config.output_dir.display()
    );
    Ok(RunReport {
        header: image.header,
        outputs: out.outputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_text() {
        let header = PcxHeader::for_indexed(4, 3).unwrap();
        let text = header_text(&header);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), header.fields().len());
        assert!(lines.contains(&"Xmax: 3"));
        assert!(lines.contains(&"Ymax: 2"));
    }

    #[test]
    fn test_histogram_text() {
        let mut counts = [0u32; 256];
        counts[7] = 3;
        let text = histogram_text(&Histogram::from_counts(counts));
        assert_eq!(text.lines().count(), 256);
        assert_eq!(text.lines().nth(7), Some("7 3"));
        assert_eq!(text.lines().next(), Some("0 0"));
    }
}
