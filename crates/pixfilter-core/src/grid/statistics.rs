//! Whole-image statistics

use super::PixelGrid;
use crate::color::Rgb;

/// Per-channel mean intensity over a whole image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelMeans {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl ChannelMeans {
    /// Average of the three channel means.
    pub fn mean(&self) -> f64 {
        (self.r + self.g + self.b) / 3.0
    }

    /// Means as an array in R, G, B order.
    pub fn as_array(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl PixelGrid {
    /// Compute the mean of each channel over all pixels.
    pub fn channel_means(&self) -> ChannelMeans {
        let (r, g, b) = self.pixels().iter().fold(
            (0u64, 0u64, 0u64),
            |(r, g, b), &Rgb { r: pr, g: pg, b: pb }| {
                (r + pr as u64, g + pg as u64, b + pb as u64)
            },
        );
        let n = self.len() as f64;
        ChannelMeans {
            r: r as f64 / n,
            g: g as f64 / n,
            b: b as f64 / n,
        }
    }

    /// Apply `f` to every pixel and return the (min, max) of the results.
    pub fn value_range(&self, f: impl Fn(Rgb) -> f64) -> (f64, f64) {
        self.pixels()
            .iter()
            .map(|&p| f(p))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }
}
