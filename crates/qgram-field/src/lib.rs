#![forbid(unsafe_code)]

//! Core numerics for quasigram.
//!
//! Computes two-dimensional quasiperiodic interference fields by superposing
//! evenly-spaced plane waves with golden-ratio phase offsets. The pipeline is
//! a strict forward flow:
//!
//! 1. [`Grid`] — centered sample lattice over `[-R, R] × [-R, R]`
//! 2. [`WaveTable::superpose`] — summed plane-wave field, normalized to
//!    roughly `[-1, 1]`
//! 3. [`threshold::sharpen`] — clip-and-rescale that emphasizes
//!    constructive-interference peaks
//!
//! Every stage is deterministic: identical configuration produces
//! bit-identical [`Field`] data.

pub mod config;
pub mod field;
pub mod grid;
pub mod threshold;
pub mod wave;

pub use config::{
    ConfigError, DEFAULT_CARRIER, DEFAULT_DIRECTIONS, DEFAULT_EXTENT, DEFAULT_THRESHOLD,
    FieldConfig, GOLDEN_RATIO,
};
pub use field::Field;
pub use grid::Grid;
pub use wave::{Wave, WaveTable};
