#![forbid(unsafe_code)]

//! Gradient palettes.
//!
//! Each palette maps a normalized intensity `t ∈ [0, 1]` to a color through
//! a small set of stops with linear interpolation between them. All mappings
//! are deterministic and monotone along the gradient, so peak ordering in
//! the field survives into the image.

use crate::color::Rgb8;
use std::fmt;
use std::str::FromStr;

/// Palette presets for field rendering.
///
/// `Grayscale` is the default and the reference mapping for intensity tests;
/// the fixed gradients are tuned for diffraction-style imagery: a dark
/// background with peaks saturating toward white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Palette {
    /// Black to white, luminance only.
    #[default]
    Grayscale,
    /// Near-black through deep red and orange to pale yellow.
    Ember,
    /// Deep navy through blue and cyan to white.
    Glacier,
    /// Indigo through magenta and orange to warm white.
    Solar,
    /// HSV hue sweep (blue → red) at full saturation.
    Spectrum,
}

/// All palettes, in help/list order.
pub const ALL_PALETTES: [Palette; 5] = [
    Palette::Grayscale,
    Palette::Ember,
    Palette::Glacier,
    Palette::Solar,
    Palette::Spectrum,
];

impl Palette {
    /// Map a normalized intensity `[0, 1]` to a color.
    ///
    /// Out-of-range inputs are clamped.
    #[inline]
    #[must_use]
    pub fn color_at(self, t: f64) -> Rgb8 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Grayscale => Rgb8::lerp(Rgb8::BLACK, Rgb8::WHITE, t),
            Self::Ember => Self::ember(t),
            Self::Glacier => Self::glacier(t),
            Self::Solar => Self::solar(t),
            Self::Spectrum => Rgb8::hsv(250.0 - t * 250.0, 0.85, 0.2 + 0.8 * t),
        }
    }

    /// Number of color stops in the gradient.
    #[inline]
    #[must_use]
    pub const fn stop_count(self) -> usize {
        match self {
            Self::Grayscale => 2,
            Self::Ember => 4,
            Self::Glacier => 4,
            Self::Solar => 4,
            Self::Spectrum => 6, // HSV cycle segments
        }
    }

    /// Canonical lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::Ember => "ember",
            Self::Glacier => "glacier",
            Self::Solar => "solar",
            Self::Spectrum => "spectrum",
        }
    }

    fn ember(t: f64) -> Rgb8 {
        if t < 0.33 {
            Rgb8::lerp(Rgb8::rgb(8, 4, 2), Rgb8::rgb(112, 18, 8), t / 0.33)
        } else if t < 0.66 {
            Rgb8::lerp(
                Rgb8::rgb(112, 18, 8),
                Rgb8::rgb(228, 110, 20),
                (t - 0.33) / 0.33,
            )
        } else {
            Rgb8::lerp(
                Rgb8::rgb(228, 110, 20),
                Rgb8::rgb(255, 236, 178),
                (t - 0.66) / 0.34,
            )
        }
    }

    fn glacier(t: f64) -> Rgb8 {
        if t < 0.33 {
            Rgb8::lerp(Rgb8::rgb(3, 8, 34), Rgb8::rgb(22, 90, 170), t / 0.33)
        } else if t < 0.66 {
            Rgb8::lerp(
                Rgb8::rgb(22, 90, 170),
                Rgb8::rgb(110, 200, 232),
                (t - 0.33) / 0.33,
            )
        } else {
            Rgb8::lerp(
                Rgb8::rgb(110, 200, 232),
                Rgb8::rgb(240, 252, 255),
                (t - 0.66) / 0.34,
            )
        }
    }

    fn solar(t: f64) -> Rgb8 {
        if t < 0.33 {
            Rgb8::lerp(Rgb8::rgb(20, 8, 52), Rgb8::rgb(168, 36, 110), t / 0.33)
        } else if t < 0.66 {
            Rgb8::lerp(
                Rgb8::rgb(168, 36, 110),
                Rgb8::rgb(250, 140, 46),
                (t - 0.33) / 0.33,
            )
        } else {
            Rgb8::lerp(
                Rgb8::rgb(250, 140, 46),
                Rgb8::rgb(255, 246, 214),
                (t - 0.66) / 0.34,
            )
        }
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for unrecognized palette names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPalette(pub String);

impl fmt::Display for UnknownPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown palette: {}", self.0)
    }
}

impl std::error::Error for UnknownPalette {}

impl FromStr for Palette {
    type Err = UnknownPalette;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Self::Grayscale),
            "ember" => Ok(Self::Ember),
            "glacier" => Ok(Self::Glacier),
            "solar" => Ok(Self::Solar),
            "spectrum" => Ok(Self::Spectrum),
            other => Err(UnknownPalette(other.to_string())),
        }
    }
}
