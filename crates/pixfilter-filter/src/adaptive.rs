//! Adaptive two-pass filters
//!
//! Both filters first gather statistics over the whole source image and only
//! then map each pixel through a rule parameterised by those statistics.
//!
//! - **Grey world** balances colour by scaling each channel so that its mean
//!   matches the mean of all three channel means.
//! - **Histogram stretch** spreads the intensity range of the image over
//!   `[0, 255]` and writes the result as gray.

use pixfilter_core::color::{clamp_channel, weighted_sum};
use pixfilter_core::{ChannelMeans, PixelGrid, Rgb};
use tracing::{debug, warn};

/// Intensity weights used by the histogram stretch.
pub const STRETCH_WEIGHTS: [f64; 3] = [0.3, 0.59, 0.11];

/// Statistics for the grey-world colour balance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreyWorldStats {
    /// Per-channel means of the source
    pub means: ChannelMeans,
    /// Mean of the three channel means
    pub avg: f64,
}

impl GreyWorldStats {
    /// Gather statistics over the whole image.
    pub fn compute(src: &PixelGrid) -> Self {
        let means = src.channel_means();
        let stats = GreyWorldStats {
            means,
            avg: means.mean(),
        };
        debug!(
            r = means.r,
            g = means.g,
            b = means.b,
            avg = stats.avg,
            "grey world statistics"
        );
        if means.as_array().contains(&0.0) {
            warn!("grey world: a channel has zero mean and will stay 0");
        }
        stats
    }

    /// Rebalance one colour: `c' = avg * c / mean_c`.
    ///
    /// A channel whose mean is 0 maps to 0.
    pub fn apply(&self, c: Rgb) -> Rgb {
        let means = self.means.as_array();
        let ch = c.channels();
        Rgb::from_channels(std::array::from_fn(|i| {
            if means[i] == 0.0 {
                0
            } else {
                clamp_channel(self.avg * ch[i] as f64 / means[i])
            }
        }))
    }
}

/// Intensity range for the histogram stretch.
///
/// The scan starts both bounds at 0, so `min` is always 0 and only `max`
/// tracks the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityRange {
    pub min: f64,
    pub max: f64,
}

/// Stretch intensity `0.3R + 0.59G + 0.11B`, unrounded.
#[inline]
pub fn stretch_intensity(c: Rgb) -> f64 {
    weighted_sum(c, STRETCH_WEIGHTS)
}

impl IntensityRange {
    /// Gather the range over the whole image.
    pub fn compute(src: &PixelGrid) -> Self {
        let (lo, hi) = src.value_range(stretch_intensity);
        // The scan starts from 0 at both ends, so min never exceeds 0.
        let (min, max) = (lo.min(0.0), hi.max(0.0));
        let range = IntensityRange { min, max };
        debug!(min, max, "histogram intensity range");
        if range.is_degenerate() {
            warn!("histogram stretch: empty intensity range, writing intensity unstretched");
        }
        range
    }

    /// `max - min` is not positive.
    pub fn is_degenerate(&self) -> bool {
        self.max - self.min <= 0.0
    }

    /// Map one colour to its stretched gray level.
    pub fn apply(&self, c: Rgb) -> Rgb {
        let i = stretch_intensity(c);
        let v = if self.is_degenerate() {
            i
        } else {
            (i - self.min) * 255.0 / (self.max - self.min)
        };
        Rgb::gray(clamp_channel(v))
    }
}

/// Grey-world colour balance.
pub fn grey_world(pix: &PixelGrid) -> PixelGrid {
    let stats = GreyWorldStats::compute(pix);
    pix.map_colors(|c| stats.apply(c))
}

/// Histogram (intensity) stretch to gray.
pub fn histogram_stretch(pix: &PixelGrid) -> PixelGrid {
    let range = IntensityRange::compute(pix);
    pix.map_colors(|c| range.apply(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grey_world_balances_means() {
        let pix = PixelGrid::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb::new(100, 50, 30)
            } else {
                Rgb::new(60, 30, 30)
            }
        })
        .unwrap();
        // means (80, 40, 30), avg 50
        let stats = GreyWorldStats::compute(&pix);
        assert_eq!(stats.avg, 50.0);
        let out = grey_world(&pix);
        assert_eq!(out.pixel(0, 0), Some(Rgb::new(62, 62, 50)));
        assert_eq!(out.pixel(1, 0), Some(Rgb::new(37, 37, 50)));
    }

    #[test]
    fn test_grey_world_gray_image_unchanged() {
        let pix = PixelGrid::from_fn(4, 4, |x, y| Rgb::gray((x * 16 + y * 4) as u8)).unwrap();
        // All channel means are equal, so every scale factor is exactly 1.
        assert!(grey_world(&pix).equals(&pix));
    }

    #[test]
    fn test_grey_world_zero_mean_channel() {
        let pix = PixelGrid::filled(2, 2, Rgb::new(90, 0, 30)).unwrap();
        let out = grey_world(&pix);
        assert_eq!(out.pixel(0, 0), Some(Rgb::new(40, 0, 40)));
    }

    #[test]
    fn test_range_min_starts_at_zero() {
        let pix = PixelGrid::filled(2, 2, Rgb::gray(100)).unwrap();
        let range = IntensityRange::compute(&pix);
        assert_eq!(range.min, 0.0);
        assert!((range.max - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_stretch_to_full_range() {
        let pix = PixelGrid::from_fn(2, 1, |x, _| Rgb::gray(if x == 0 { 0 } else { 100 })).unwrap();
        let out = histogram_stretch(&pix);
        assert_eq!(out.pixel(0, 0), Some(Rgb::BLACK));
        assert!(out.pixel(1, 0).unwrap().r >= 254);
    }

    #[test]
    fn test_histogram_all_black_is_black() {
        let pix = PixelGrid::new(3, 3).unwrap();
        let range = IntensityRange::compute(&pix);
        assert!(range.is_degenerate());
        assert!(histogram_stretch(&pix).equals(&pix));
    }

    #[test]
    fn test_histogram_output_is_gray() {
        let pix = PixelGrid::from_fn(5, 5, |x, y| Rgb::new(x as u8 * 50, y as u8 * 40, 90)).unwrap();
        let out = histogram_stretch(&pix);
        assert!(out.pixels().iter().all(|p| p.r == p.g && p.g == p.b));
    }
}
