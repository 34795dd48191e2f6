#![forbid(unsafe_code)]

//! Peak sharpening.
//!
//! The summed field varies smoothly in `[-1, 1]`; clipping it to
//! `[-t, t]` and rescaling saturates constructive-interference peaks at ±1
//! while stretching the low-magnitude background, which is what makes the
//! Bragg-peak structure visible after rendering.

use crate::field::Field;

/// Clip a single sample to `[-t, t]` and rescale to `[-1, 1]`.
///
/// Values with `|v| >= t` saturate to exactly ±1, so a value exactly at the
/// threshold always lands on the saturated side. `t = 0` maps everything to
/// 0 (fully clipped). Monotonic non-decreasing in `v` for any fixed `t >= 0`.
#[inline]
#[must_use]
pub fn sharpen_value(v: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if v >= t {
        1.0
    } else if v <= -t {
        -1.0
    } else {
        v / t
    }
}

/// Apply [`sharpen_value`] to every sample.
#[must_use]
pub fn sharpen(field: &Field, t: f64) -> Field {
    let data = field.data().iter().map(|&v| sharpen_value(v, t)).collect();
    Field::from_raw(field.width(), field.height(), data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_values_rescale_linearly() {
        assert_eq!(sharpen_value(0.4, 0.8), 0.5);
        assert_eq!(sharpen_value(-0.2, 0.8), -0.25);
        assert_eq!(sharpen_value(0.0, 0.8), 0.0);
    }

    #[test]
    fn boundary_saturates_consistently() {
        // Exactly at the threshold counts as saturated on both signs.
        assert_eq!(sharpen_value(0.8, 0.8), 1.0);
        assert_eq!(sharpen_value(-0.8, 0.8), -1.0);
        assert_eq!(sharpen_value(0.9, 0.8), 1.0);
        assert_eq!(sharpen_value(-1.0, 0.8), -1.0);
    }

    #[test]
    fn zero_threshold_collapses_to_constant() {
        let field = Field::from_raw(2, 2, vec![-1.0, -0.3, 0.4, 1.0]);
        let out = sharpen(&field, 0.0);
        assert!(out.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn monotone_in_input() {
        let t = 0.6;
        let samples: Vec<f64> = (-20..=20).map(|i| i as f64 / 20.0).collect();
        for pair in samples.windows(2) {
            assert!(sharpen_value(pair[0], t) <= sharpen_value(pair[1], t));
        }
    }

    #[test]
    fn output_bounded_for_any_threshold() {
        for &t in &[0.0, 0.1, 0.5, 0.8, 1.0, 2.0] {
            for i in -10..=10 {
                let v = i as f64 / 10.0;
                let out = sharpen_value(v, t);
                assert!((-1.0..=1.0).contains(&out), "sharpen({v}, {t}) = {out}");
            }
        }
    }

    #[test]
    fn field_shape_preserved() {
        let field = Field::from_raw(3, 2, vec![0.1; 6]);
        let out = sharpen(&field, 0.8);
        assert_eq!(out.width(), 3);
        assert_eq!(out.height(), 2);
    }
}
