//! Rank filtering operations
//!
//! Median over a square `(2r+1) x (2r+1)` neighborhood, computed per
//! channel. Taps outside the image read the nearest edge pixel.
//!
//! The three sample buffers belong to a single pixel computation and are
//! dropped when it returns.

use pixfilter_core::{PixelGrid, Rgb};
use tracing::debug;

/// Median colour of the neighborhood of (x, y).
///
/// Each channel is sorted on its own and the element at index
/// `(n - 1) / 2` is taken, where `n = (2r+1)²` is odd.
pub fn median_pixel(src: &PixelGrid, radius: u32, x: u32, y: u32) -> Rgb {
    let r = radius as i64;
    let n = ((2 * radius + 1) * (2 * radius + 1)) as usize;
    let mut rs = Vec::with_capacity(n);
    let mut gs = Vec::with_capacity(n);
    let mut bs = Vec::with_capacity(n);

    for dy in -r..=r {
        for dx in -r..=r {
            let c = src.get(x as i64 + dx, y as i64 + dy);
            rs.push(c.r);
            gs.push(c.g);
            bs.push(c.b);
        }
    }

    let mid = (n - 1) / 2;
    Rgb::new(
        *rs.select_nth_unstable(mid).1,
        *gs.select_nth_unstable(mid).1,
        *bs.select_nth_unstable(mid).1,
    )
}

/// Apply a median filter.
///
/// Radius 0 returns a copy of the source.
pub fn median_filter(pix: &PixelGrid, radius: u32) -> PixelGrid {
    debug!(radius, width = pix.width(), height = pix.height(), "median filter");
    pix.map_pixels(|x, y| median_pixel(pix, radius, x, y))
}
