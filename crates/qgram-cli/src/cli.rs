#![forbid(unsafe_code)]

//! Command-line argument parsing for qgram.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `QGRAM_*` prefix; explicit
//! flags win over the environment.

use qgram_field::FieldConfig;
use qgram_raster::Palette;
use std::env;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
qgram — dodecagonal golden-ratio interference image generator

Superposes N evenly-spaced plane waves with golden-ratio phase offsets,
sharpens the constructive-interference peaks, and writes a PNG.

USAGE:
    qgram [OPTIONS]

OPTIONS:
    --size=WxH          Grid resolution (default: 512x512)
    --extent=R          Spatial half-width; grid covers [-R, R]² (default: 10)
    --carrier=F         Shared spatial frequency of all waves (default: 432)
    --threshold=T       Clipping threshold; 0 collapses the field (default: 0.8)
    --directions=N      Number of wave directions (default: 12)
    --downsample=K      Box-average factor before thresholding (default: 1)
    --palette=NAME      grayscale|ember|glacier|solar|spectrum (default: grayscale)
    --gamma=G           Gamma on normalized intensity, must be > 0 (default: 1.0)
    --output=PATH       Output PNG path (default: quasigram.png)
    --report-jsonl=PATH Append a JSON run record to PATH
    --help, -h          Show this help message
    --version, -V       Show version

ENVIRONMENT VARIABLES:
    QGRAM_SIZE          Override --size (e.g. 256x256)
    QGRAM_EXTENT        Override --extent
    QGRAM_CARRIER       Override --carrier
    QGRAM_THRESHOLD     Override --threshold
    QGRAM_DIRECTIONS    Override --directions
    QGRAM_DOWNSAMPLE    Override --downsample
    QGRAM_PALETTE       Override --palette
    QGRAM_GAMMA         Override --gamma
    QGRAM_OUTPUT        Override --output
    QGRAM_REPORT_JSONL  Override --report-jsonl
    RUST_LOG            Log filter (tracing), e.g. RUST_LOG=qgram=debug";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    /// Grid width in samples.
    pub width: usize,
    /// Grid height in samples.
    pub height: usize,
    /// Spatial half-extent.
    pub extent: f64,
    /// Shared carrier frequency.
    pub carrier: f64,
    /// Clipping threshold.
    pub threshold: f64,
    /// Number of wave directions.
    pub directions: usize,
    /// Box-average factor (1 = off).
    pub downsample: usize,
    /// Gradient palette.
    pub palette: Palette,
    /// Gamma on normalized intensity.
    pub gamma: f64,
    /// Output PNG path.
    pub output: PathBuf,
    /// Optional JSONL run-report path.
    pub report_jsonl: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Default for Opts {
    fn default() -> Self {
        let cfg = FieldConfig::default();
        Self {
            width: cfg.width,
            height: cfg.height,
            extent: cfg.extent,
            carrier: cfg.carrier,
            threshold: cfg.threshold,
            directions: cfg.directions,
            downsample: cfg.downsample,
            palette: Palette::default(),
            gamma: 1.0,
            output: PathBuf::from("quasigram.png"),
            report_jsonl: None,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("qgram {VERSION}");
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {flag} value: {value}");
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// The field-pipeline slice of the options.
    #[must_use]
    pub fn to_field_config(&self) -> FieldConfig {
        FieldConfig {
            width: self.width,
            height: self.height,
            extent: self.extent,
            carrier: self.carrier,
            directions: self.directions,
            threshold: self.threshold,
            downsample: self.downsample,
        }
    }

    fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = get_env("QGRAM_SIZE")
            && let Some((w, h)) = parse_size(&val)
        {
            opts.width = w;
            opts.height = h;
        }
        if let Some(val) = get_env("QGRAM_EXTENT")
            && let Ok(n) = val.parse()
        {
            opts.extent = n;
        }
        if let Some(val) = get_env("QGRAM_CARRIER")
            && let Ok(n) = val.parse()
        {
            opts.carrier = n;
        }
        if let Some(val) = get_env("QGRAM_THRESHOLD")
            && let Ok(n) = val.parse()
        {
            opts.threshold = n;
        }
        if let Some(val) = get_env("QGRAM_DIRECTIONS")
            && let Ok(n) = val.parse()
        {
            opts.directions = n;
        }
        if let Some(val) = get_env("QGRAM_DOWNSAMPLE")
            && let Ok(n) = val.parse()
        {
            opts.downsample = n;
        }
        if let Some(val) = get_env("QGRAM_PALETTE")
            && let Ok(p) = val.parse()
        {
            opts.palette = p;
        }
        if let Some(val) = get_env("QGRAM_GAMMA")
            && let Ok(n) = val.parse()
        {
            opts.gamma = n;
        }
        if let Some(val) = get_env("QGRAM_OUTPUT")
            && !val.trim().is_empty()
        {
            opts.output = PathBuf::from(val);
        }
        if let Some(val) = get_env("QGRAM_REPORT_JSONL")
            && !val.trim().is_empty()
        {
            opts.report_jsonl = Some(PathBuf::from(val));
        }

        // Parse command-line args (override env vars)
        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                other => {
                    if let Some(val) = other.strip_prefix("--size=") {
                        match parse_size(val) {
                            Some((w, h)) => {
                                opts.width = w;
                                opts.height = h;
                            }
                            None => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--size",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--extent=") {
                        match val.parse() {
                            Ok(n) => opts.extent = n,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--extent",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--carrier=") {
                        match val.parse() {
                            Ok(n) => opts.carrier = n,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--carrier",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--threshold=") {
                        match val.parse() {
                            Ok(n) => opts.threshold = n,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--threshold",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--directions=") {
                        match val.parse() {
                            Ok(n) => opts.directions = n,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--directions",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--downsample=") {
                        match val.parse() {
                            Ok(n) => opts.downsample = n,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--downsample",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--palette=") {
                        match val.parse() {
                            Ok(p) => opts.palette = p,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--palette",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--gamma=") {
                        match val.parse() {
                            Ok(n) => opts.gamma = n,
                            Err(_) => {
                                return Err(ParseError::InvalidValue {
                                    flag: "--gamma",
                                    value: val.to_string(),
                                });
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--output=") {
                        if val.trim().is_empty() {
                            return Err(ParseError::InvalidValue {
                                flag: "--output",
                                value: val.to_string(),
                            });
                        }
                        opts.output = PathBuf::from(val);
                    } else if let Some(val) = other.strip_prefix("--report-jsonl=") {
                        if !val.trim().is_empty() {
                            opts.report_jsonl = Some(PathBuf::from(val));
                        }
                    } else {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    }
                }
            }
        }

        Ok(opts)
    }
}

fn parse_size(raw: &str) -> Option<(usize, usize)> {
    let trimmed = raw.trim();
    let mut parts = trimmed.split(['x', 'X']);
    let w: usize = parts.next()?.parse().ok()?;
    let h: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((w, h))
}
