#![forbid(unsafe_code)]

//! Pipeline configuration.
//!
//! [`FieldConfig`] is the single immutable parameter block handed to the
//! pipeline. Validation collects every violation instead of stopping at the
//! first, so a caller can report the full list before any computation runs.

use std::fmt;

/// The golden ratio, `(1 + √5) / 2`.
///
/// Used to derive pairwise-distinct phase offsets; its irrationality is what
/// keeps the interference pattern quasiperiodic rather than periodic.
pub const GOLDEN_RATIO: f64 = 1.618033988749894848204586834365638118;

/// Default shared spatial frequency of all superposed waves.
pub const DEFAULT_CARRIER: f64 = 432.0;

/// Default number of evenly-spaced wave directions (dodecagonal symmetry).
pub const DEFAULT_DIRECTIONS: usize = 12;

/// Default spatial half-extent of the sample grid.
pub const DEFAULT_EXTENT: f64 = 10.0;

/// Default clipping threshold applied to the summed field.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Immutable configuration for one field computation.
///
/// Construct with [`FieldConfig::default`] and override fields, then call
/// [`FieldConfig::validate`] before feeding it to the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Grid width in samples.
    pub width: usize,
    /// Grid height in samples.
    pub height: usize,
    /// Spatial half-extent; the grid covers `[-extent, extent]` per axis.
    pub extent: f64,
    /// Shared spatial frequency of all waves.
    pub carrier: f64,
    /// Number of evenly-spaced wave directions.
    pub directions: usize,
    /// Clipping threshold; 0 collapses the field to a constant.
    pub threshold: f64,
    /// Box-average factor applied between superposition and thresholding.
    /// 1 disables downsampling.
    pub downsample: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            extent: DEFAULT_EXTENT,
            carrier: DEFAULT_CARRIER,
            directions: DEFAULT_DIRECTIONS,
            threshold: DEFAULT_THRESHOLD,
            downsample: 1,
        }
    }
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl fmt::Display, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl FieldConfig {
    /// Validate all constraints and return every violation.
    ///
    /// A valid configuration is required before any pipeline stage runs; the
    /// grid and wave constructors assume it.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.width == 0 {
            errors.push(ConfigError::new("width", self.width, "must be positive"));
        }
        if self.height == 0 {
            errors.push(ConfigError::new("height", self.height, "must be positive"));
        }
        if !self.extent.is_finite() || self.extent <= 0.0 {
            errors.push(ConfigError::new(
                "extent",
                self.extent,
                "must be positive and finite",
            ));
        }
        if !self.carrier.is_finite() {
            errors.push(ConfigError::new("carrier", self.carrier, "must be finite"));
        }
        if self.directions < 1 {
            errors.push(ConfigError::new(
                "directions",
                self.directions,
                "must be at least 1",
            ));
        }
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            errors.push(ConfigError::new(
                "threshold",
                self.threshold,
                "must be non-negative and finite",
            ));
        }
        if self.downsample == 0 {
            errors.push(ConfigError::new(
                "downsample",
                self.downsample,
                "must be at least 1",
            ));
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
