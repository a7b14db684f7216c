//! Named filter catalog
//!
//! Each [`FilterSpec`] pairs a display name and a short key with a typed
//! parameter list and the function that runs the filter. Callers look a
//! filter up by either name, fill a [`ParamSet`], and call
//! [`FilterSpec::apply`], which validates every parameter before the
//! filter touches any pixel.
//!
//! # Example
//!
//! ```
//! use pcxkit_core::{Channels, Raster};
//! use pcxkit_filter::{FilterCatalog, ParamSet};
//!
//! let catalog = FilterCatalog::standard();
//! let median = catalog.lookup("Median").unwrap();
//! let raster = Raster::from_samples(3, 3, Channels::Gray, vec![9; 9]).unwrap();
//! let params = ParamSet::new().with_int("kernel_size", 3);
//! let out = median.apply(&raster, &params).unwrap();
//! assert_eq!(out.raster.data(), raster.data());
//! ```

use crate::window::MAX_WINDOW_SIZE;
use crate::{FilterError, FilterResult, edge, enhance, point, sharpen, smooth};
use log::debug;
use pcxkit_core::{Histogram, Raster};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Type of a filter parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Float,
}

/// A parameter value as supplied by a caller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
}

impl ParamValue {
    fn as_f64(self) -> f64 {
        match self {
            ParamValue::Int(i) => i as f64,
            ParamValue::Float(f) => f,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Declaration of one user-adjustable parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    /// `None` means the caller must supply a value
    pub default: Option<ParamValue>,
    /// Inclusive lower bound
    pub min: Option<f64>,
    /// Lower bound is exclusive rather than inclusive
    pub min_exclusive: bool,
    /// Inclusive upper bound
    pub max: Option<f64>,
    /// Integer value must be odd
    pub odd: bool,
}

impl ParamSpec {
    const fn kernel_size() -> Self {
        ParamSpec {
            name: "kernel_size",
            kind: ParamKind::Int,
            default: Some(ParamValue::Int(3)),
            min: Some(3.0),
            min_exclusive: false,
            max: Some(MAX_WINDOW_SIZE as f64),
            odd: true,
        }
    }

    /// Resolve the value for this parameter from `params`, applying the
    /// default and checking every constraint.
    pub fn resolve(&self, params: &ParamSet) -> FilterResult<ParamValue> {
        let value = match (params.get(self.name), self.default) {
            (Some(v), _) => v,
            (None, Some(d)) => d,
            (None, None) => {
                return Err(FilterError::InvalidParameter(format!(
                    "missing required parameter '{}'",
                    self.name
                )));
            }
        };

        let value = match (self.kind, value) {
            (ParamKind::Float, v) => ParamValue::Float(v.as_f64()),
            (ParamKind::Int, ParamValue::Int(i)) => ParamValue::Int(i),
            (ParamKind::Int, ParamValue::Float(f)) if f.fract() == 0.0 && f.is_finite() => {
                ParamValue::Int(f as i64)
            }
            (ParamKind::Int, ParamValue::Float(f)) => {
                return Err(FilterError::InvalidParameter(format!(
                    "'{}' must be an integer, got {f}",
                    self.name
                )));
            }
        };

        let x = value.as_f64();
        if !x.is_finite() {
            return Err(FilterError::InvalidParameter(format!(
                "'{}' must be finite",
                self.name
            )));
        }
        if let Some(min) = self.min {
            let below = if self.min_exclusive { x <= min } else { x < min };
            if below {
                let op = if self.min_exclusive { ">" } else { ">=" };
                return Err(FilterError::InvalidParameter(format!(
                    "'{}' must be {op} {min}, got {x}",
                    self.name
                )));
            }
        }
        if let Some(max) = self.max {
            if x > max {
                return Err(FilterError::InvalidParameter(format!(
                    "'{}' must be <= {max}, got {x}",
                    self.name
                )));
            }
        }
        if let (true, ParamValue::Int(i)) = (self.odd, value) {
            if i % 2 == 0 {
                return Err(FilterError::InvalidParameter(format!(
                    "'{}' must be odd, got {i}",
                    self.name
                )));
            }
        }
        Ok(value)
    }
}

/// Parameter values keyed by parameter name
///
/// Deserializes from a plain JSON object such as `{"kernel_size": 5}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamSet(BTreeMap<String, ParamValue>);

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: ParamValue) {
        self.0.insert(name.to_string(), value);
    }

    /// Builder-style integer insert
    pub fn with_int(mut self, name: &str, value: i64) -> Self {
        self.insert(name, ParamValue::Int(value));
        self
    }

    /// Builder-style float insert
    pub fn with_float(mut self, name: &str, value: f64) -> Self {
        self.insert(name, ParamValue::Float(value));
        self
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.0.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of running a catalog filter
#[derive(Debug, Clone)]
pub struct FilterOutput {
    pub raster: Raster,
    /// Histogram of the output, for filters that compute one
    pub histogram: Option<Histogram>,
}

impl From<Raster> for FilterOutput {
    fn from(raster: Raster) -> Self {
        FilterOutput {
            raster,
            histogram: None,
        }
    }
}

/// Function signature shared by every catalog entry
pub type FilterFn = fn(&Raster, &ResolvedParams) -> FilterResult<FilterOutput>;

/// Validated parameter values, in declaration order
#[derive(Debug, Clone)]
pub struct ResolvedParams {
    values: Vec<(&'static str, ParamValue)>,
}

impl ResolvedParams {
    fn value(&self, name: &str) -> FilterResult<ParamValue> {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, v)| v)
            .ok_or_else(|| FilterError::InvalidParameter(format!("no parameter '{name}'")))
    }

    pub fn int(&self, name: &str) -> FilterResult<i64> {
        match self.value(name)? {
            ParamValue::Int(i) => Ok(i),
            ParamValue::Float(f) => Err(FilterError::InvalidParameter(format!(
                "'{name}' is not an integer: {f}"
            ))),
        }
    }

    pub fn float(&self, name: &str) -> FilterResult<f64> {
        Ok(self.value(name)?.as_f64())
    }

    /// Integer parameter narrowed to `u32`
    pub fn size(&self, name: &str) -> FilterResult<u32> {
        let i = self.int(name)?;
        u32::try_from(i)
            .map_err(|_| FilterError::InvalidParameter(format!("'{name}' out of range: {i}")))
    }
}

/// A named, user-facing filter
#[derive(Debug, Clone)]
pub struct FilterSpec {
    /// Display name, e.g. "Gradient (Sobel)"
    pub name: &'static str,
    /// Short identifier, e.g. "sobel"
    pub key: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub func: FilterFn,
}

impl FilterSpec {
    /// Validate `params` against the declared specs.
    ///
    /// Unknown parameter names are rejected.
    pub fn resolve(&self, params: &ParamSet) -> FilterResult<ResolvedParams> {
        if let Some(unknown) = params
            .names()
            .find(|n| !self.params.iter().any(|p| p.name == *n))
        {
            return Err(FilterError::InvalidParameter(format!(
                "'{}' does not take a parameter '{unknown}'",
                self.name
            )));
        }
        let values = self
            .params
            .iter()
            .map(|spec| Ok((spec.name, spec.resolve(params)?)))
            .collect::<FilterResult<Vec<_>>>()?;
        Ok(ResolvedParams { values })
    }

    /// Validate `params` and run the filter.
    pub fn apply(&self, raster: &Raster, params: &ParamSet) -> FilterResult<FilterOutput> {
        let resolved = self.resolve(params)?;
        debug!("running '{}' with {:?}", self.name, resolved.values);
        (self.func)(raster, &resolved)
    }
}

const KERNEL_SIZE: &[ParamSpec] = &[ParamSpec::kernel_size()];

const HIGHBOOST: &[ParamSpec] = &[
    ParamSpec {
        name: "boost_factor",
        kind: ParamKind::Float,
        default: Some(ParamValue::Float(2.0)),
        min: Some(1.0),
        min_exclusive: false,
        max: None,
        odd: false,
    },
    ParamSpec::kernel_size(),
];

const THRESHOLD: &[ParamSpec] = &[ParamSpec {
    name: "threshold",
    kind: ParamKind::Int,
    default: None,
    min: Some(0.0),
    min_exclusive: false,
    max: Some(255.0),
    odd: false,
}];

const GAMMA: &[ParamSpec] = &[ParamSpec {
    name: "gamma",
    kind: ParamKind::Float,
    default: Some(ParamValue::Float(1.0)),
    min: Some(0.0),
    min_exclusive: true,
    max: Some(point::MAX_GAMMA as f64),
    odd: false,
}];

fn run_average(r: &Raster, p: &ResolvedParams) -> FilterResult<FilterOutput> {
    smooth::average(r, p.size("kernel_size")?).map(Into::into)
}

fn run_median(r: &Raster, p: &ResolvedParams) -> FilterResult<FilterOutput> {
    smooth::median(r, p.size("kernel_size")?).map(Into::into)
}

fn run_laplacian(r: &Raster, _: &ResolvedParams) -> FilterResult<FilterOutput> {
    edge::laplacian_sharpen(r).map(Into::into)
}

fn run_unsharp(r: &Raster, p: &ResolvedParams) -> FilterResult<FilterOutput> {
    sharpen::unsharp_mask(r, p.size("kernel_size")?).map(Into::into)
}

fn run_highboost(r: &Raster, p: &ResolvedParams) -> FilterResult<FilterOutput> {
    let boost = p.float("boost_factor")? as f32;
    sharpen::highboost(r, boost, p.size("kernel_size")?).map(Into::into)
}

fn run_sobel(r: &Raster, _: &ResolvedParams) -> FilterResult<FilterOutput> {
    edge::sobel_gradient(r).map(Into::into)
}

fn run_equalize(r: &Raster, _: &ResolvedParams) -> FilterResult<FilterOutput> {
    let (raster, histogram) = enhance::equalize(r)?;
    Ok(FilterOutput {
        raster,
        histogram: Some(histogram),
    })
}

fn run_threshold(r: &Raster, p: &ResolvedParams) -> FilterResult<FilterOutput> {
    let t = i32::try_from(p.int("threshold")?)
        .map_err(|_| FilterError::InvalidParameter("threshold out of range".to_string()))?;
    point::threshold(r, t).map(Into::into)
}

fn run_gamma(r: &Raster, p: &ResolvedParams) -> FilterResult<FilterOutput> {
    point::gamma(r, p.float("gamma")? as f32).map(Into::into)
}

fn run_negative(r: &Raster, _: &ResolvedParams) -> FilterResult<FilterOutput> {
    point::negative(r).map(Into::into)
}

fn run_grayscale(r: &Raster, _: &ResolvedParams) -> FilterResult<FilterOutput> {
    Ok(r.to_grayscale()?.into())
}

/// The set of filters offered to callers
#[derive(Debug, Clone)]
pub struct FilterCatalog {
    filters: Vec<FilterSpec>,
}

impl FilterCatalog {
    /// Catalog with every built-in filter.
    pub fn standard() -> Self {
        let filters = vec![
            FilterSpec {
                name: "Averaging",
                key: "average",
                description: "Local mean over a square window, per channel",
                params: KERNEL_SIZE,
                func: run_average,
            },
            FilterSpec {
                name: "Median",
                key: "median",
                description: "Local median over a square window, per channel",
                params: KERNEL_SIZE,
                func: run_median,
            },
            FilterSpec {
                name: "Laplacian (Highpass)",
                key: "laplacian",
                description: "Adds the 4-neighbor Laplacian to the grayscale image",
                params: &[],
                func: run_laplacian,
            },
            FilterSpec {
                name: "Unsharp Masking",
                key: "unsharp",
                description: "Adds the difference from a box blur",
                params: KERNEL_SIZE,
                func: run_unsharp,
            },
            FilterSpec {
                name: "Highboost",
                key: "highboost",
                description: "boost * image - (boost - 1) * box blur",
                params: HIGHBOOST,
                func: run_highboost,
            },
            FilterSpec {
                name: "Gradient (Sobel)",
                key: "sobel",
                description: "Sobel gradient magnitude",
                params: &[],
                func: run_sobel,
            },
            FilterSpec {
                name: "Histogram Equalization",
                key: "equalize",
                description: "Remaps intensities through the cumulative histogram",
                params: &[],
                func: run_equalize,
            },
            FilterSpec {
                name: "Threshold",
                key: "threshold",
                description: "255 where gray >= threshold, else 0",
                params: THRESHOLD,
                func: run_threshold,
            },
            FilterSpec {
                name: "Gamma",
                key: "gamma",
                description: "255 * (v / 255) ^ gamma",
                params: GAMMA,
                func: run_gamma,
            },
            FilterSpec {
                name: "Negative",
                key: "negative",
                description: "255 - gray",
                params: &[],
                func: run_negative,
            },
            FilterSpec {
                name: "Grayscale",
                key: "grayscale",
                description: "(R + G + B) / 3, truncated",
                params: &[],
                func: run_grayscale,
            },
        ];
        FilterCatalog { filters }
    }

    /// Find a filter by display name or key, ignoring ASCII case.
    pub fn lookup(&self, name: &str) -> FilterResult<&FilterSpec> {
        self.filters
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name) || f.key.eq_ignore_ascii_case(name))
            .ok_or_else(|| FilterError::UnknownFilter(name.to_string()))
    }

    /// Display names in catalog order
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterSpec> {
        self.filters.iter()
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
