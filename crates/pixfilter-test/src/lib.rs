//! pixfilter-test - Regression test framework for pixfilter
//!
//! Supports two modes:
//!
//! - **Compare**: Check values and images, and verify that written images
//!   read back unchanged (default)
//! - **Display**: Write every image to the regout directory for visual
//!   inspection and skip the read-back check
//!
//! The workspace ships no binary test data, so tests build their inputs with
//! the synthetic image generators below.
//!
//! # Usage
//!
//! ```ignore
//! use pixfilter_test::{RegParams, gradient_image};
//!
//! let mut rp = RegParams::new("convolve");
//! let pix = gradient_image(64, 48);
//! rp.compare_values(64.0, pix.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use pixfilter_core::{PixelGrid, Rgb};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pixfilter-test is at crates/pixfilter-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Smooth colour ramp: red grows left to right, green top to bottom, and
/// blue is their mean.
///
/// # Panics
///
/// Panics if either dimension is 0.
pub fn gradient_image(width: u32, height: u32) -> PixelGrid {
    let wd = (width.max(2) - 1) as f64;
    let hd = (height.max(2) - 1) as f64;
    PixelGrid::from_fn(width, height, |x, y| {
        let r = (x as f64 * 255.0 / wd) as u8;
        let g = (y as f64 * 255.0 / hd) as u8;
        Rgb::new(r, g, ((r as u16 + g as u16) / 2) as u8)
    })
    .expect("gradient_image: non-zero dimensions")
}

/// Checkerboard of `cell x cell` squares alternating between `a` and `b`.
pub fn checker_image(width: u32, height: u32, cell: u32, a: Rgb, b: Rgb) -> PixelGrid {
    let cell = cell.max(1);
    PixelGrid::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 { a } else { b }
    })
    .expect("checker_image: non-zero dimensions")
}

/// Deterministic noise, every channel uniformly distributed over `[0, 255]`.
pub fn noise_image(width: u32, height: u32, seed: u64) -> PixelGrid {
    let mut state = seed;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for _ in 0..width as usize * height as usize {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let bits = (state >> 32) as u32;
        pixels.push(Rgb::new(bits as u8, (bits >> 8) as u8, (bits >> 16) as u8));
    }
    PixelGrid::from_pixels(width, height, pixels).expect("noise_image: non-zero dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_corners() {
        let pix = gradient_image(11, 6);
        assert_eq!(pix.pixel(0, 0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(pix.pixel(10, 5), Some(Rgb::new(255, 255, 255)));
    }

    #[test]
    fn test_checker_alternates() {
        let pix = checker_image(4, 4, 2, Rgb::BLACK, Rgb::WHITE);
        assert_eq!(pix.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(pix.pixel(2, 0), Some(Rgb::WHITE));
        assert_eq!(pix.pixel(2, 2), Some(Rgb::BLACK));
    }

    #[test]
    fn test_noise_deterministic() {
        let a = noise_image(8, 8, 42);
        let b = noise_image(8, 8, 42);
        let c = noise_image(8, 8, 43);
        assert!(a.equals(&b));
        assert!(!a.equals(&c));
    }
}
