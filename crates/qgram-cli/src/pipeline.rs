#![forbid(unsafe_code)]

//! Pipeline composition.
//!
//! Runs the forward flow grid → superpose → (downsample) → sharpen →
//! render → write, with configuration validated up front so no partial
//! output is produced on bad input.

use crate::cli::Opts;
use crate::report::RunReport;
use qgram_field::threshold::sharpen;
use qgram_field::{ConfigError, Grid, WaveTable};
use qgram_raster::{RenderError, RenderOptions, render, write_png};
use std::fmt;
use std::time::Instant;
use tracing::info;

/// Magnitudes at or below this count as zero for the report statistics.
const ZERO_EPS: f64 = 1e-12;

/// Pipeline failure.
#[derive(Debug)]
pub enum PipelineError {
    /// One or more configuration violations; nothing was computed.
    Config(Vec<ConfigError>),
    /// Rendering or output write failed after computation succeeded.
    Render(RenderError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(errors) => {
                write!(f, "invalid configuration: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{err}")?;
                }
                Ok(())
            }
            Self::Render(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(_) => None,
            Self::Render(err) => Some(err),
        }
    }
}

/// Validate options, run the full pipeline, and write the output image.
///
/// Returns the run record on success. Fails fast on configuration errors
/// (before any computation) and propagates render/write failures without
/// leaving partial output behind.
pub fn run(opts: &Opts) -> Result<RunReport, PipelineError> {
    let config = opts.to_field_config();
    let mut errors = config.validate().err().unwrap_or_default();
    if !opts.gamma.is_finite() || opts.gamma <= 0.0 {
        errors.push(ConfigError {
            field: "gamma",
            value: opts.gamma.to_string(),
            message: "must be positive and finite".into(),
        });
    }
    if !errors.is_empty() {
        return Err(PipelineError::Config(errors));
    }

    let started = Instant::now();
    let grid = Grid::new(config.width, config.height, config.extent);
    let table = WaveTable::golden(config.directions, config.carrier);
    info!(
        width = config.width,
        height = config.height,
        extent = config.extent,
        carrier = config.carrier,
        directions = config.directions,
        "superposing wave field"
    );
    let mut field = table.superpose(&grid);

    if config.downsample > 1 {
        field = field.downsample(config.downsample);
        info!(
            factor = config.downsample,
            width = field.width(),
            height = field.height(),
            "downsampled field"
        );
    }

    let sharp = sharpen(&field, config.threshold);
    let (field_min, field_max) = sharp.min_max();
    let nonzero = sharp.count_above(ZERO_EPS);
    let sparsity = sharp.sparsity(ZERO_EPS);

    let buf = render(
        &sharp,
        &RenderOptions {
            palette: opts.palette,
            gamma: opts.gamma,
        },
    );
    write_png(&buf, &opts.output).map_err(PipelineError::Render)?;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    info!(
        path = %opts.output.display(),
        elapsed_ms,
        nonzero,
        "pipeline complete"
    );

    Ok(RunReport {
        generator: "quasigram".into(),
        width: config.width,
        height: config.height,
        extent: config.extent,
        carrier: config.carrier,
        directions: config.directions,
        threshold: config.threshold,
        downsample: config.downsample,
        palette: opts.palette.to_string(),
        gamma: opts.gamma,
        image_width: buf.width(),
        image_height: buf.height(),
        field_min,
        field_max,
        nonzero,
        sparsity,
        output: opts.output.display().to_string(),
        elapsed_ms,
    })
}
