#![forbid(unsafe_code)]

//! Plane-wave direction set and superposition.
//!
//! A [`WaveTable`] holds the ordered `(direction, phase)` pairs for one run:
//! unit vectors at exact per-index angles `k · 2π/N`, and golden-ratio phase
//! offsets `k · 2π/φ`. Directions are computed from the exact angle list,
//! never by accumulated increments, so the N-fold symmetry of the set is not
//! eroded by rounding.

use crate::config::GOLDEN_RATIO;
use crate::field::Field;
use crate::grid::Grid;
use std::f64::consts::TAU;
use std::time::Instant;

/// One plane wave: unit propagation direction plus phase offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    /// Direction x component (unit length together with `uy`).
    pub ux: f64,
    /// Direction y component.
    pub uy: f64,
    /// Phase offset in radians.
    pub phase: f64,
}

/// Ordered set of plane waves sharing one carrier frequency.
///
/// The wave at index `k` contributes `cos(carrier · (u_k · p) + phase_k)` at
/// sample position `p`; [`WaveTable::superpose`] sums all contributions and
/// divides by the wave count, bounding the result to `[-1, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveTable {
    carrier: f64,
    waves: Vec<Wave>,
}

impl WaveTable {
    /// Build `directions` waves with golden-ratio phase offsets.
    ///
    /// Phase formula: `phase_k = k · 2π/φ`. Because φ is irrational the
    /// offsets are pairwise distinct mod 2π, which breaks translational
    /// periodicity and produces quasiperiodic structure.
    ///
    /// # Panics
    ///
    /// Panics if `directions` is zero.
    #[must_use]
    pub fn golden(directions: usize, carrier: f64) -> Self {
        Self::with_phases(directions, carrier, |k| k as f64 * TAU / GOLDEN_RATIO)
    }

    /// Build `directions` waves with a uniform zero phase.
    ///
    /// The resulting field is pointwise invariant under rotation by `2π/N`;
    /// used by the symmetry tests as the exact-invariance baseline.
    ///
    /// # Panics
    ///
    /// Panics if `directions` is zero.
    #[must_use]
    pub fn uniform(directions: usize, carrier: f64) -> Self {
        Self::with_phases(directions, carrier, |_| 0.0)
    }

    fn with_phases(directions: usize, carrier: f64, phase: impl Fn(usize) -> f64) -> Self {
        assert!(directions > 0, "direction count must be positive");
        let n = directions as f64;
        let waves = (0..directions)
            .map(|k| {
                let angle = k as f64 * TAU / n;
                let (uy, ux) = angle.sin_cos();
                Wave {
                    ux,
                    uy,
                    phase: phase(k),
                }
            })
            .collect();
        Self { carrier, waves }
    }

    /// Shared carrier frequency.
    #[inline]
    #[must_use]
    pub fn carrier(&self) -> f64 {
        self.carrier
    }

    /// Number of waves.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    /// True if the table holds no waves. Never the case for tables built by
    /// the public constructors.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// The ordered `(direction, phase)` pairs.
    #[inline]
    #[must_use]
    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    /// A table with the phase assignment cyclically shifted by `steps`.
    ///
    /// Wave `k` of the result carries the phase of wave `(k + steps) mod N`
    /// while keeping its own direction. Rotating sample coordinates by
    /// `steps · 2π/N` is exactly equivalent to superposing with the shifted
    /// table; the property tests rely on this identity.
    #[must_use]
    pub fn shifted(&self, steps: usize) -> Self {
        let n = self.waves.len();
        let waves = (0..n)
            .map(|k| Wave {
                phase: self.waves[(k + steps) % n].phase,
                ..self.waves[k]
            })
            .collect();
        Self {
            carrier: self.carrier,
            waves,
        }
    }

    /// Evaluate the normalized superposition at a single point.
    ///
    /// Reference implementation for the vectorized [`superpose`] path; the
    /// two must agree within 1e-9 on any grid sample.
    ///
    /// [`superpose`]: WaveTable::superpose
    #[must_use]
    pub fn sample_at(&self, x: f64, y: f64) -> f64 {
        let sum: f64 = self
            .waves
            .iter()
            .map(|w| (self.carrier * (w.ux * x + w.uy * y) + w.phase).cos())
            .sum();
        sum / self.waves.len() as f64
    }

    /// Superpose all waves over the grid into a scalar field.
    ///
    /// Per wave, the plane-wave argument splits into a per-column part
    /// `A = carrier·ux·x` and a per-row part `B = carrier·uy·y + phase`, and
    /// `cos(A + B) = cos A · cos B − sin A · sin B` turns the inner loop into
    /// multiply-adds over precomputed per-column sin/cos bases, with no
    /// per-cell trigonometry.
    ///
    /// # Determinism
    ///
    /// Accumulation order is fixed (wave-major, then row-major), so identical
    /// inputs produce bit-identical fields.
    #[must_use]
    pub fn superpose(&self, grid: &Grid) -> Field {
        let started = Instant::now();
        let w = grid.width();
        let h = grid.height();
        let xs = grid.xs();
        let ys = grid.ys();

        let mut data = vec![0.0f64; w * h];
        let mut col_sin = vec![0.0f64; w];
        let mut col_cos = vec![0.0f64; w];

        for wave in &self.waves {
            let kx = self.carrier * wave.ux;
            let ky = self.carrier * wave.uy;
            for (i, &x) in xs.iter().enumerate() {
                let (s, c) = (kx * x).sin_cos();
                col_sin[i] = s;
                col_cos[i] = c;
            }
            for (j, &y) in ys.iter().enumerate() {
                let (row_sin, row_cos) = (ky * y + wave.phase).sin_cos();
                let row = &mut data[j * w..(j + 1) * w];
                for i in 0..w {
                    row[i] += col_cos[i] * row_cos - col_sin[i] * row_sin;
                }
            }
        }

        let inv = 1.0 / self.waves.len() as f64;
        for v in &mut data {
            *v *= inv;
        }

        tracing::debug!(
            waves = self.waves.len(),
            width = w,
            height = h,
            elapsed_us = started.elapsed().as_micros() as u64,
            "superposed wave field"
        );
        Field::from_raw(w, h, data)
    }
}
