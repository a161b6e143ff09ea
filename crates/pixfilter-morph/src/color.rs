//! Colour morphological primitives
//!
//! Dilation and erosion on RGB images, each channel handled independently.
//!
//! # Algorithm
//!
//! For every output pixel the active cells of the [`Sel`] are laid over the
//! source, centred on the pixel, and sampled with clamp-to-edge:
//! - **Dilation**: per-channel maximum, starting from 0
//! - **Erosion**: per-channel minimum, starting from 255
//!
//! Opening, closing and the difference operators are built on top of these
//! two in [`crate::sequence`].

use crate::Sel;
use pixfilter_core::{PixelGrid, Rgb};
use tracing::debug;

/// Dilated colour of the pixel at (x, y).
pub fn dilate_pixel(src: &PixelGrid, sel: &Sel, x: u32, y: u32) -> Rgb {
    sel.hit_offsets().fold(Rgb::BLACK, |acc, (dx, dy)| {
        acc.max(src.get(x as i64 + dx as i64, y as i64 + dy as i64))
    })
}

/// Eroded colour of the pixel at (x, y).
pub fn erode_pixel(src: &PixelGrid, sel: &Sel, x: u32, y: u32) -> Rgb {
    sel.hit_offsets().fold(Rgb::WHITE, |acc, (dx, dy)| {
        acc.min(src.get(x as i64 + dx as i64, y as i64 + dy as i64))
    })
}

/// Dilate an RGB image.
///
/// Expands bright regions and shrinks dark ones. With a sel that contains
/// its origin the result is never darker than the source.
pub fn dilate(pix: &PixelGrid, sel: &Sel) -> PixelGrid {
    debug!(
        width = pix.width(),
        height = pix.height(),
        sel = sel.size(),
        "dilate"
    );
    pix.map_pixels(|x, y| dilate_pixel(pix, sel, x, y))
}

/// Erode an RGB image.
///
/// Shrinks bright regions and expands dark ones. With a sel that contains
/// its origin the result is never brighter than the source.
pub fn erode(pix: &PixelGrid, sel: &Sel) -> PixelGrid {
    debug!(
        width = pix.width(),
        height = pix.height(),
        sel = sel.size(),
        "erode"
    );
    pix.map_pixels(|x, y| erode_pixel(pix, sel, x, y))
}
