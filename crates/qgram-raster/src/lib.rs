#![forbid(unsafe_code)]

//! Rendering for quasigram fields.
//!
//! Maps a thresholded scalar field (range `[-1, 1]`) to an RGB pixel buffer
//! through a gradient palette and writes it out as a PNG. The file write is
//! all-or-nothing: the image is encoded fully in memory, written to a
//! temporary sibling path, and renamed into place, so no partial or corrupt
//! image ever lands at the destination.

pub mod color;
pub mod palette;
pub mod render;

pub use color::Rgb8;
pub use palette::Palette;
pub use render::{PixelBuf, RenderError, RenderOptions, render, write_png};
