//! Point filters
//!
//! Each output pixel depends only on the source pixel at the same position.

use pixfilter_core::color::clamp_channel_i32;
use pixfilter_core::{PixelGrid, Rgb};
use tracing::debug;

/// Offset added to every channel by [`brighten`].
pub const BRIGHT_OFFSET: i32 = 20;

/// Sepia depth `k`: red gets `+2k`, green `+k/2`, blue `-k`.
pub const SEPIA_DEPTH: i32 = 10;

/// `255 - c` on every channel.
#[inline]
pub fn invert_pixel(c: Rgb) -> Rgb {
    c.map(|v| 255 - v)
}

/// Luma, truncated, in all three channels.
#[inline]
pub fn grayscale_pixel(c: Rgb) -> Rgb {
    Rgb::gray(c.luma_level())
}

#[inline]
pub fn sepia_pixel(c: Rgb) -> Rgb {
    let i = c.luma_level() as i32;
    Rgb::new(
        clamp_channel_i32(i + 2 * SEPIA_DEPTH),
        clamp_channel_i32(i + SEPIA_DEPTH / 2),
        clamp_channel_i32(i - SEPIA_DEPTH),
    )
}

/// `c + 20` on every channel, clamped at 255.
#[inline]
pub fn brighten_pixel(c: Rgb) -> Rgb {
    c.map(|v| clamp_channel_i32(v as i32 + BRIGHT_OFFSET))
}

/// Linear correction `c * 255 / 10000` in integer arithmetic.
#[inline]
pub fn correct_pixel(c: Rgb) -> Rgb {
    c.map(|v| clamp_channel_i32(v as i32 * 255 / 10000))
}

fn apply(pix: &PixelGrid, name: &str, f: fn(Rgb) -> Rgb) -> PixelGrid {
    debug!(filter = name, width = pix.width(), height = pix.height(), "point filter");
    pix.map_colors(f)
}

/// Invert every channel.
pub fn invert(pix: &PixelGrid) -> PixelGrid {
    apply(pix, "invert", invert_pixel)
}

/// Convert to gray using `0.299R + 0.587G + 0.114B`.
pub fn grayscale(pix: &PixelGrid) -> PixelGrid {
    apply(pix, "gray", grayscale_pixel)
}

/// Sepia toning.
pub fn sepia(pix: &PixelGrid) -> PixelGrid {
    apply(pix, "sepia", sepia_pixel)
}

/// Brighten by a fixed offset.
pub fn brighten(pix: &PixelGrid) -> PixelGrid {
    apply(pix, "bright", brighten_pixel)
}

/// Linear correction.
pub fn correct(pix: &PixelGrid) -> PixelGrid {
    apply(pix, "correction", correct_pixel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invert_pixel() {
        assert_eq!(invert_pixel(Rgb::new(0, 128, 255)), Rgb::new(255, 127, 0));
    }

    #[test]
    fn test_grayscale_pixel_truncates() {
        // 0.299*100 + 0.587*150 + 0.114*200 = 140.75
        assert_eq!(grayscale_pixel(Rgb::new(100, 150, 200)), Rgb::gray(140));
        assert_eq!(grayscale_pixel(Rgb::WHITE), Rgb::WHITE);
    }

    #[test]
    fn test_sepia_pixel() {
        assert_eq!(sepia_pixel(Rgb::BLACK), Rgb::new(20, 5, 0));
        assert_eq!(sepia_pixel(Rgb::WHITE), Rgb::new(255, 255, 245));
        assert_eq!(sepia_pixel(Rgb::gray(100)), Rgb::new(120, 105, 90));
    }

    #[test]
    fn test_brighten_pixel_clamps() {
        assert_eq!(brighten_pixel(Rgb::new(245, 0, 0)), Rgb::new(255, 20, 20));
        assert_eq!(brighten_pixel(Rgb::new(235, 236, 255)), Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_correct_pixel() {
        assert_eq!(correct_pixel(Rgb::WHITE), Rgb::gray(6));
        assert_eq!(correct_pixel(Rgb::new(39, 40, 0)), Rgb::new(0, 1, 0));
    }
}
