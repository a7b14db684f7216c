//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use pcxkit_core::Raster;
use pcxkit_io::ImageFormat;
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare only (default)
    #[default]
    Compare,
    /// Compare and also write checked rasters to the regout directory
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the running comparison index, the mode and
/// whether every comparison so far has passed.
pub struct RegParams {
    /// Name of the test (e.g., "decode")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        if mode == RegTestMode::Display {
            let _ = fs::create_dir_all(regout_dir());
        }

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Compare two rasters for exact equality of layout and samples
    pub fn compare_raster(&mut self, expected: &Raster, actual: &Raster) -> bool {
        self.index += 1;

        if expected.dimensions() != actual.dimensions()
            || expected.channels() != actual.channels()
        {
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - layout mismatch \
                 ({:?} {:?} vs {:?} {:?})",
                self.test_name,
                self.index,
                expected.dimensions(),
                expected.channels(),
                actual.dimensions(),
                actual.channels()
            );
            self.fail(msg);
            return false;
        }

        let channels = expected.channels().count();
        let width = expected.width() as usize;
        if let Some(pos) = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b)
        {
            let pixel = pos / channels;
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - sample mismatch at ({}, {}) \
                 channel {}: expected {}, got {}",
                self.test_name,
                self.index,
                pixel % width,
                pixel / width,
                pos % channels,
                expected.data()[pos],
                actual.data()[pos]
            );
            self.fail(msg);
            return false;
        }

        true
    }

    /// Compare two byte arrays
    pub fn compare_bytes(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.index += 1;

        if expected != actual {
            let first = expected
                .iter()
                .zip(actual)
                .position(|(a, b)| a != b)
                .unwrap_or(expected.len().min(actual.len()));
            let msg = format!(
                "Failure in {}_reg: byte comparison for index {}\n\
                 sizes: {} vs {}, first difference at offset {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len(),
                first
            );
            self.fail(msg);
            false
        } else {
            true
        }
    }

    /// Record the outcome of a boolean check
    pub fn compare_true(&mut self, cond: bool, what: &str) -> bool {
        self.index += 1;
        if !cond {
            let msg = format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            );
            self.fail(msg);
        }
        cond
    }

    /// Write a raster as PNM to the regout directory in display mode
    ///
    /// Does nothing in compare mode. The file is named
    /// `<test_name>.<index>.<tag>.pnm`.
    pub fn write_raster(&self, raster: &Raster, tag: &str) -> TestResult<()> {
        if !self.display() {
            return Ok(());
        }
        let path = format!(
            "{}/{}.{:02}.{}.pnm",
            regout_dir(),
            self.test_name,
            self.index,
            tag
        );
        pcxkit_io::write_image(raster, &path, ImageFormat::Pnm).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        eprintln!("Wrote: {}", path);
        Ok(())
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all comparisons passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcxkit_core::Channels;

    #[test]
    fn test_mode_from_env() {
        let mode = RegTestMode::from_env();
        assert!(matches!(mode, RegTestMode::Compare | RegTestMode::Display));
    }

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.0, 0.0));
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
    }

    #[test]
    fn test_compare_raster() {
        let a = Raster::from_samples(2, 1, Channels::Gray, vec![1, 2]).unwrap();
        let b = Raster::from_samples(2, 1, Channels::Gray, vec![1, 3]).unwrap();
        let c = Raster::from_samples(1, 2, Channels::Gray, vec![1, 2]).unwrap();
        let mut rp = RegParams::new("test");
        assert!(rp.compare_raster(&a, &a.clone()));
        assert!(!rp.compare_raster(&a, &b));
        assert!(!rp.compare_raster(&a, &c));
        assert_eq!(rp.index(), 3);
        assert!(!rp.cleanup());
    }

    #[test]
    fn test_compare_bytes() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_bytes(b"abc", b"abc"));
        assert!(!rp.compare_bytes(b"abc", b"ab"));
    }
}
