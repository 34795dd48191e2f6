#![forbid(unsafe_code)]

//! Run reports.
//!
//! One JSON object per run, appended as a single line so repeated runs into
//! the same report file form a JSONL log.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Summary record of one completed pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Generator name, always `"quasigram"`.
    pub generator: String,
    /// Configured grid width.
    pub width: usize,
    /// Configured grid height.
    pub height: usize,
    pub extent: f64,
    pub carrier: f64,
    pub directions: usize,
    pub threshold: f64,
    pub downsample: usize,
    pub palette: String,
    pub gamma: f64,
    /// Output image width (differs from `width` when downsampling).
    pub image_width: usize,
    /// Output image height.
    pub image_height: usize,
    pub field_min: f64,
    pub field_max: f64,
    /// Samples with magnitude above 1e-12 in the sharpened field.
    pub nonzero: usize,
    /// Fraction of near-zero samples.
    pub sparsity: f64,
    pub output: String,
    pub elapsed_ms: u64,
}

/// Append the report as one JSON line, creating the file if needed.
pub fn append_jsonl(path: &Path, report: &RunReport) -> io::Result<()> {
    let line = serde_json::to_string(report).map_err(io::Error::other)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}
