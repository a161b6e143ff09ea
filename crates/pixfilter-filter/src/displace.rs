//! Displacement filters
//!
//! Each output pixel copies a source pixel from a displaced position. The
//! displaced coordinate is truncated toward zero; when it falls outside the
//! image the pixel keeps its own colour instead of reading the edge.
//!
//! - **Waves**: horizontal sine displacement, `x' = x + 20 sin(2πx / 60)`
//! - **Glass**: jitter of ±2.5 pixels on both axes, driven by a seeded
//!   generator so that results are reproducible

use pixfilter_core::{PixelGrid, Rgb};
use std::f64::consts::PI;
use tracing::debug;

/// Amplitude of the wave displacement in pixels.
pub const WAVE_AMPLITUDE: f64 = 20.0;
/// Period of the wave displacement in pixels.
pub const WAVE_PERIOD: f64 = 60.0;
/// Spread of the glass jitter in pixels.
pub const GLASS_SPREAD: f64 = 5.0;

/// Source pixel at the displaced position, or the pixel itself when the
/// position is outside the image.
fn displaced(src: &PixelGrid, x: u32, y: u32, sx: f64, sy: f64) -> Rgb {
    let (sx, sy) = (sx as i64, sy as i64);
    if sx < 0 || sy < 0 {
        return src.pixel_unchecked(x, y);
    }
    src.pixel(sx as u32, sy as u32)
        .unwrap_or_else(|| src.pixel_unchecked(x, y))
}

/// Wave-displaced colour of the pixel at (x, y).
pub fn waves_pixel(src: &PixelGrid, x: u32, y: u32) -> Rgb {
    let xf = x as f64;
    let sx = xf + WAVE_AMPLITUDE * (2.0 * PI * xf / WAVE_PERIOD).sin();
    displaced(src, x, y, sx, y as f64)
}

/// Glass-displaced colour of the pixel at (x, y).
pub fn glass_pixel(src: &PixelGrid, seed: u64, x: u32, y: u32) -> Rgb {
    let mut rng = SimpleRng::for_pixel(seed, x, y);
    let bx = rng.next_bit() as f64;
    let by = rng.next_bit() as f64;
    let sx = x as f64 - (bx - 0.5) * GLASS_SPREAD;
    let sy = y as f64 - (by - 0.5) * GLASS_SPREAD;
    displaced(src, x, y, sx, sy)
}

/// Apply the wave displacement.
pub fn waves(pix: &PixelGrid) -> PixelGrid {
    debug!(width = pix.width(), height = pix.height(), "waves");
    pix.map_pixels(|x, y| waves_pixel(pix, x, y))
}

/// Apply the glass displacement.
pub fn glass(pix: &PixelGrid, seed: u64) -> PixelGrid {
    debug!(seed, width = pix.width(), height = pix.height(), "glass");
    pix.map_pixels(|x, y| glass_pixel(pix, seed, x, y))
}

/// Simple linear congruential generator for reproducible randomness
///
/// Seeded per pixel, so the output does not depend on the order in which
/// rows are processed.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn for_pixel(seed: u64, x: u32, y: u32) -> Self {
        let mut rng = Self::new(seed ^ (((y as u64) << 32) | x as u64));
        // Warm up so neighbouring pixels diverge
        rng.next();
        rng.next();
        rng
    }

    fn next(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.state
    }

    /// High bit of the next state (the low bits of an LCG are weak).
    fn next_bit(&mut self) -> u8 {
        (self.next() >> 63) as u8
    }
}
