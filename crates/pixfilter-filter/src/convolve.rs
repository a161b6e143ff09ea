//! Convolution operations
//!
//! Every kernel-driven filter (blur, Gaussian, Sobel, emboss, sharpen,
//! motion blur) shares one rule and differs only in its [`Kernel`]:
//!
//! ```text
//! out.c(x, y) = Σ weight(j, i) · src.get(x + j, y + i).c     i, j ∈ [-r, r]
//! ```
//!
//! Uses replicate (clamp) border handling: taps outside the image read the
//! nearest edge pixel. Each channel sum is clamped to `[0, 255]` and then
//! truncated.

use crate::{FilterResult, Kernel};
use pixfilter_core::color::clamp_channel;
use pixfilter_core::{PixelGrid, Rgb};
use tracing::debug;

/// Added to every channel sum, whatever the kernel, before truncation.
/// Absorbs f32 roundoff in normalised weights.
const ROUNDOFF: f64 = 1e-3;

/// Convolved colour of the pixel at (x, y).
pub fn convolve_pixel(src: &PixelGrid, kernel: &Kernel, x: u32, y: u32) -> Rgb {
    let r = kernel.radius() as i32;
    let (x, y) = (x as i64, y as i64);
    let mut sum = [0.0f64; 3];

    for i in -r..=r {
        for j in -r..=r {
            let w = kernel.weight(j, i) as f64;
            if w == 0.0 {
                continue;
            }
            let c = src.get(x + j as i64, y + i as i64);
            sum[0] += w * c.r as f64;
            sum[1] += w * c.g as f64;
            sum[2] += w * c.b as f64;
        }
    }

    Rgb::new(
        clamp_channel(sum[0] + ROUNDOFF),
        clamp_channel(sum[1] + ROUNDOFF),
        clamp_channel(sum[2] + ROUNDOFF),
    )
}

/// Convolve an RGB image with a kernel.
pub fn convolve(pix: &PixelGrid, kernel: &Kernel) -> PixelGrid {
    debug!(
        kernel = kernel.name().unwrap_or("custom"),
        size = kernel.size(),
        width = pix.width(),
        height = pix.height(),
        "convolve"
    );
    pix.map_pixels(|x, y| convolve_pixel(pix, kernel, x, y))
}

/// Box blur with a `(2r+1) x (2r+1)` averaging kernel.
pub fn box_blur(pix: &PixelGrid, radius: u32) -> PixelGrid {
    convolve(pix, &Kernel::box_blur(radius))
}

/// Gaussian blur.
///
/// # Errors
///
/// Returns an error if `sigma` is not finite and positive.
pub fn gaussian_blur(pix: &PixelGrid, radius: u32, sigma: f32) -> FilterResult<PixelGrid> {
    Ok(convolve(pix, &Kernel::gaussian(radius, sigma)?))
}

/// Sobel edge filter (row gradient only).
pub fn sobel_edge(pix: &PixelGrid) -> PixelGrid {
    convolve(pix, &Kernel::sobel())
}

/// Emboss.
pub fn emboss(pix: &PixelGrid) -> PixelGrid {
    convolve(pix, &Kernel::emboss())
}

/// Sharpen.
pub fn sharpen(pix: &PixelGrid) -> PixelGrid {
    convolve(pix, &Kernel::sharpen())
}

/// Diagonal motion blur.
///
/// # Errors
///
/// Returns an error if `length` is 0.
pub fn motion_blur(pix: &PixelGrid, length: u32, radius: u32) -> FilterResult<PixelGrid> {
    Ok(convolve(pix, &Kernel::motion_blur(length, radius)?))
}
