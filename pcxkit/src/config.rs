//! JSON run configuration
//!
//! ```json
//! {
//!   "input": "image.pcx",
//!   "output_dir": "out",
//!   "format": "pnm",
//!   "strict_runs": false,
//!   "filters": [
//!     { "name": "median", "params": { "kernel_size": 5 } },
//!     { "name": "Histogram Equalization" }
//!   ]
//! }
//! ```

use crate::error::{Error, Result};
use pcxkit_filter::ParamSet;
use pcxkit_io::{DecodeOptions, ImageFormat};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File format for written rasters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pnm,
    Pcx,
}

impl From<OutputFormat> for ImageFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Pnm => ImageFormat::Pnm,
            OutputFormat::Pcx => ImageFormat::Pcx,
        }
    }
}

/// One filter invocation
#[derive(Debug, Clone, Deserialize)]
pub struct FilterStep {
    /// Display name or key, case-insensitive
    pub name: String,
    #[serde(default)]
    pub params: ParamSet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
    /// Reject a run marker that has no data byte
    #[serde(default)]
    pub strict_runs: bool,
    #[serde(default)]
    pub filters: Vec<FilterStep>,
}

impl RunConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            strict_runs: self.strict_runs,
        }
    }
}

/// Read and parse a configuration file.
///
/// A relative `input` or `output_dir` is resolved against the directory
/// holding the configuration file.
pub fn load_config(path: &Path) -> Result<RunConfig> {
    let text = fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: format!("failed to read: {e}"),
    })?;
    let mut config = RunConfig::from_json(&text).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        message: format!("failed to parse: {e}"),
    })?;
    if let Some(base) = path.parent() {
        if config.input.is_relative() {
            config.input = base.join(&config.input);
        }
        if config.output_dir.is_relative() {
            config.output_dir = base.join(&config.output_dir);
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcxkit_filter::ParamValue;

    #[test]
    fn test_parse_full() {
        let cfg = RunConfig::from_json(
            r#"{
                "input": "a.pcx",
                "output_dir": "out",
                "format": "pcx",
                "strict_runs": true,
                "filters": [
                    {"name": "median", "params": {"kernel_size": 5}},
                    {"name": "Gamma", "params": {"gamma": 0.5}},
                    {"name": "sobel"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.format, OutputFormat::Pcx);
        assert!(cfg.decode_options().strict_runs);
        assert_eq!(cfg.filters.len(), 3);
        assert_eq!(cfg.filters[0].params.get("kernel_size"), Some(ParamValue::Int(5)));
        assert_eq!(cfg.filters[1].params.get("gamma"), Some(ParamValue::Float(0.5)));
        assert!(cfg.filters[2].params.is_empty());
    }

    #[test]
    fn test_defaults() {
        let cfg = RunConfig::from_json(r#"{"input": "a.pcx", "output_dir": "o"}"#).unwrap();
        assert_eq!(cfg.format, OutputFormat::Pnm);
        assert!(!cfg.strict_runs);
        assert!(cfg.filters.is_empty());
    }

    #[test]
    fn test_bad_format() {
        assert!(RunConfig::from_json(r#"{"input": "a", "output_dir": "o", "format": "gif"}"#).is_err());
    }
}
