#![forbid(unsafe_code)]

//! Field-to-image rendering and atomic PNG export.

use crate::color::Rgb8;
use crate::palette::Palette;
use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use qgram_field::Field;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Gradient palette.
    pub palette: Palette,
    /// Gamma applied to the normalized intensity; 1.0 is linear.
    pub gamma: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            gamma: 1.0,
        }
    }
}

/// Row-major RGB8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuf {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuf {
    /// Image width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw interleaved RGB bytes (`3 · width · height`).
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb8 {
        assert!(x < self.width && y < self.height, "pixel index out of range");
        let i = (y * self.width + x) * 3;
        Rgb8::rgb(self.data[i], self.data[i + 1], self.data[i + 2])
    }
}

/// Rendering/export error.
#[derive(Debug)]
pub enum RenderError {
    /// The field has zero samples; nothing to encode.
    EmptyImage,
    /// PNG encoding failed.
    Encode(image::ImageError),
    /// Filesystem failure, with the path that was being written.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyImage => write!(f, "cannot encode an empty image"),
            Self::Encode(err) => write!(f, "png encoding failed: {err}"),
            Self::Io { path, source } => {
                write!(f, "cannot write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyImage => None,
            Self::Encode(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Map a thresholded field (range `[-1, 1]`) to pixels.
///
/// Intensity mapping is `t = (v + 1) / 2` followed by `t^gamma`; both steps
/// are monotone, so the ordering of field values is preserved in luminance.
///
/// # Panics
///
/// Panics if `opts.gamma` is not positive and finite; the CLI validates this
/// before the pipeline runs.
#[must_use]
pub fn render(field: &Field, opts: &RenderOptions) -> PixelBuf {
    assert!(
        opts.gamma.is_finite() && opts.gamma > 0.0,
        "gamma must be positive"
    );
    let started = Instant::now();
    let w = field.width();
    let linear = (opts.gamma - 1.0).abs() < f64::EPSILON;

    let mut data = Vec::with_capacity(field.len() * 3);
    for row in field.rows() {
        for &v in row {
            let mut t = ((v + 1.0) / 2.0).clamp(0.0, 1.0);
            if !linear {
                t = t.powf(opts.gamma);
            }
            data.extend_from_slice(&opts.palette.color_at(t).channels());
        }
    }

    tracing::debug!(
        width = w,
        height = field.height(),
        palette = %opts.palette,
        gamma = opts.gamma,
        elapsed_us = started.elapsed().as_micros() as u64,
        "rendered field to pixels"
    );
    PixelBuf {
        width: w,
        height: field.height(),
        data,
    }
}

/// Write the pixel buffer as a PNG, all-or-nothing.
///
/// The image is encoded fully in memory, written to `<path>.tmp`, then
/// renamed into place. On any failure the destination is left untouched and
/// the temporary file is removed.
pub fn write_png(buf: &PixelBuf, path: &Path) -> Result<(), RenderError> {
    if buf.width == 0 || buf.height == 0 {
        return Err(RenderError::EmptyImage);
    }

    let mut encoded = Vec::new();
    PngEncoder::new(&mut encoded)
        .write_image(
            &buf.data,
            buf.width as u32,
            buf.height as u32,
            ExtendedColorType::Rgb8,
        )
        .map_err(RenderError::Encode)?;

    let tmp = tmp_path(path);
    fs::write(&tmp, &encoded).map_err(|source| RenderError::Io {
        path: tmp.clone(),
        source,
    })?;
    if let Err(source) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(RenderError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::info!(path = %path.display(), bytes = encoded.len(), "wrote png");
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qgram_field::Field;
    use std::env;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    fn test_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("qgram-raster-{}-{name}", std::process::id()));
        fs::create_dir_all(&dir).expect("create test dir");
        dir
    }

    fn small_field() -> Field {
        Field::from_raw(2, 2, vec![-1.0, -0.5, 0.5, 1.0])
    }

    #[test]
    fn grayscale_maps_extremes_to_black_and_white() {
        let buf = render(&small_field(), &RenderOptions::default());
        assert_eq!(buf.pixel(0, 0), Rgb8::BLACK);
        assert_eq!(buf.pixel(1, 1), Rgb8::WHITE);
    }

    #[test]
    fn render_is_deterministic() {
        let field = small_field();
        let opts = RenderOptions {
            palette: Palette::Glacier,
            gamma: 0.8,
        };
        assert_eq!(render(&field, &opts), render(&field, &opts));
    }

    #[test]
    fn gamma_darkens_midtones() {
        let field = Field::from_raw(1, 1, vec![0.0]);
        let linear = render(&field, &RenderOptions::default());
        let dark = render(
            &field,
            &RenderOptions {
                palette: Palette::Grayscale,
                gamma: 2.2,
            },
        );
        assert!(dark.pixel(0, 0).r() < linear.pixel(0, 0).r());
    }

    #[test]
    fn buffer_matches_field_shape() {
        let field = Field::from_raw(5, 3, vec![0.0; 15]);
        let buf = render(&field, &RenderOptions::default());
        assert_eq!(buf.width(), 5);
        assert_eq!(buf.height(), 3);
        assert_eq!(buf.data().len(), 5 * 3 * 3);
    }

    #[test]
    fn write_png_produces_valid_file_and_no_tmp() {
        let dir = test_dir("write-ok");
        let path = dir.join("out.png");
        let buf = render(&small_field(), &RenderOptions::default());
        write_png(&buf, &path).expect("write png");

        let bytes = fs::read(&path).expect("read back");
        assert_eq!(&bytes[..8], &PNG_MAGIC);
        assert!(!tmp_path(&path).exists(), "tmp file left behind");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_png_unwritable_path_fails_without_artifacts() {
        let dir = test_dir("write-fail");
        let path = dir.join("missing").join("out.png");
        let buf = render(&small_field(), &RenderOptions::default());
        let err = write_png(&buf, &path).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }), "got {err:?}");
        assert!(!path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_png_rejects_empty_image() {
        let buf = PixelBuf {
            width: 0,
            height: 0,
            data: Vec::new(),
        };
        let err = write_png(&buf, Path::new("unused.png")).unwrap_err();
        assert!(matches!(err, RenderError::EmptyImage));
    }

    #[test]
    fn error_display_includes_path() {
        let err = RenderError::Io {
            path: PathBuf::from("/nope/out.png"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let text = err.to_string();
        assert!(text.contains("/nope/out.png"));
    }
}
