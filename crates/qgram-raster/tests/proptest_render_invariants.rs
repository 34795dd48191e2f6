//! Property-based invariant tests for rendering.
//!
//! 1. Luminance monotonicity — higher field values never render darker
//!    (grayscale, any gamma)
//! 2. Shape — pixel buffer dimensions always match the field
//! 3. Determinism — identical inputs produce identical buffers

use proptest::prelude::*;
use qgram_field::Field;
use qgram_raster::{Palette, RenderOptions, render};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn grayscale_luminance_is_monotone(
        a in -1.0f64..1.0,
        b in -1.0f64..1.0,
        gamma in 0.2f64..4.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let field = Field::from_raw(2, 1, vec![lo, hi]);
        let opts = RenderOptions { palette: Palette::Grayscale, gamma };
        let buf = render(&field, &opts);
        prop_assert!(buf.pixel(0, 0).r() <= buf.pixel(1, 0).r());
    }

    #[test]
    fn buffer_shape_matches_field(
        width in 1usize..32,
        height in 1usize..32,
    ) {
        let field = Field::from_raw(width, height, vec![0.25; width * height]);
        let buf = render(&field, &RenderOptions::default());
        prop_assert_eq!(buf.width(), width);
        prop_assert_eq!(buf.height(), height);
        prop_assert_eq!(buf.data().len(), width * height * 3);
    }

    #[test]
    fn render_deterministic_across_palettes(
        v in -1.0f64..1.0,
        palette_index in 0usize..5,
    ) {
        let palette = qgram_raster::palette::ALL_PALETTES[palette_index];
        let field = Field::from_raw(3, 3, vec![v; 9]);
        let opts = RenderOptions { palette, gamma: 1.0 };
        prop_assert_eq!(render(&field, &opts), render(&field, &opts));
    }
}
