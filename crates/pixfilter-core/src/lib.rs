//! pixfilter-core - Basic data structures for image filtering
//!
//! This crate provides the fundamental data structures used throughout
//! the pixfilter workspace:
//!
//! - [`PixelGrid`] / [`PixelGridMut`] - The RGB image container (immutable / mutable)
//! - [`Rgb`] - An 8-bit-per-channel colour value
//! - [`color`] - Channel clamping and luma helpers
//!
//! Every filter in the workspace reads from an immutable [`PixelGrid`] and
//! writes into a freshly allocated one. Neighborhood reads go through
//! [`PixelGrid::get`], which clamps coordinates to the image (clamp-to-edge).

pub mod error;
pub mod grid;
mod maybe_rayon;

pub use error::{Error, Result};
pub use grid::{ChannelMeans, PixelGrid, PixelGridMut};

pub use color::Rgb;

/// Colour values and channel helpers for 8-bit RGB pixels.
///
/// All arithmetic that can leave `[0, 255]` is done in a wider type and
/// brought back with [`clamp_channel`] / [`clamp_channel_i32`] before it is
/// stored.
pub mod color {
    /// Luma weights used by grayscale and sepia (ITU-R BT.601).
    pub const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

    /// A single RGB pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Rgb {
        pub r: u8,
        pub g: u8,
        pub b: u8,
    }

    impl Rgb {
        pub const BLACK: Rgb = Rgb::new(0, 0, 0);
        pub const WHITE: Rgb = Rgb::new(255, 255, 255);

        /// Create a colour from its channels.
        #[inline]
        pub const fn new(r: u8, g: u8, b: u8) -> Self {
            Self { r, g, b }
        }

        /// Create a gray colour (all channels equal).
        #[inline]
        pub const fn gray(v: u8) -> Self {
            Self { r: v, g: v, b: v }
        }

        /// Channels as an array, in R, G, B order.
        #[inline]
        pub const fn channels(self) -> [u8; 3] {
            [self.r, self.g, self.b]
        }

        /// Build a colour from an array in R, G, B order.
        #[inline]
        pub const fn from_channels(c: [u8; 3]) -> Self {
            Self::new(c[0], c[1], c[2])
        }

        /// Apply `f` to each channel.
        #[inline]
        pub fn map(self, mut f: impl FnMut(u8) -> u8) -> Self {
            Self::new(f(self.r), f(self.g), f(self.b))
        }

        /// Perceptual luma `0.299R + 0.587G + 0.114B`, unrounded.
        #[inline]
        pub fn luma(self) -> f64 {
            weighted_sum(self, LUMA_WEIGHTS)
        }

        /// Luma truncated to an integer level.
        ///
        /// Computed in fixed point, so exact gray inputs map to themselves
        /// (white stays 255).
        #[inline]
        pub fn luma_level(self) -> u8 {
            let sum = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
            (sum / 1000) as u8
        }

        /// Per-channel `self - other`, floored at 0.
        #[inline]
        pub fn saturating_sub(self, other: Rgb) -> Rgb {
            Rgb::new(
                self.r.saturating_sub(other.r),
                self.g.saturating_sub(other.g),
                self.b.saturating_sub(other.b),
            )
        }

        /// Per-channel maximum.
        #[inline]
        pub fn max(self, other: Rgb) -> Rgb {
            Rgb::new(
                self.r.max(other.r),
                self.g.max(other.g),
                self.b.max(other.b),
            )
        }

        /// Per-channel minimum.
        #[inline]
        pub fn min(self, other: Rgb) -> Rgb {
            Rgb::new(
                self.r.min(other.r),
                self.g.min(other.g),
                self.b.min(other.b),
            )
        }
    }

    impl From<(u8, u8, u8)> for Rgb {
        fn from((r, g, b): (u8, u8, u8)) -> Self {
            Rgb::new(r, g, b)
        }
    }

    impl From<Rgb> for (u8, u8, u8) {
        fn from(c: Rgb) -> Self {
            (c.r, c.g, c.b)
        }
    }

    /// Weighted sum of the three channels.
    #[inline]
    pub fn weighted_sum(c: Rgb, w: [f64; 3]) -> f64 {
        w[0] * c.r as f64 + w[1] * c.g as f64 + w[2] * c.b as f64
    }

    /// Clamp a floating-point channel value to `[0, 255]` and truncate it.
    ///
    /// NaN maps to 0.
    #[inline]
    pub fn clamp_channel(v: f64) -> u8 {
        if v.is_nan() {
            return 0;
        }
        v.clamp(0.0, 255.0) as u8
    }

    /// Clamp an integer channel value to `[0, 255]`.
    #[inline]
    pub fn clamp_channel_i32(v: i32) -> u8 {
        v.clamp(0, 255) as u8
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_clamp_channel_truncates() {
            assert_eq!(clamp_channel(127.9), 127);
            assert_eq!(clamp_channel(-3.0), 0);
            assert_eq!(clamp_channel(300.5), 255);
            assert_eq!(clamp_channel(f64::NAN), 0);
            assert_eq!(clamp_channel(f64::INFINITY), 255);
        }

        #[test]
        fn test_clamp_channel_i32() {
            assert_eq!(clamp_channel_i32(265), 255);
            assert_eq!(clamp_channel_i32(-1), 0);
            assert_eq!(clamp_channel_i32(42), 42);
        }

        #[test]
        fn test_luma_white_and_black() {
            assert!((Rgb::WHITE.luma() - 255.0).abs() < 1e-9);
            assert_eq!(Rgb::BLACK.luma(), 0.0);
        }

        #[test]
        fn test_luma_level() {
            assert_eq!(Rgb::WHITE.luma_level(), 255);
            assert_eq!(Rgb::gray(100).luma_level(), 100);
            // 0.299*100 + 0.587*150 + 0.114*200 = 140.75
            assert_eq!(Rgb::new(100, 150, 200).luma_level(), 140);
            assert_eq!(Rgb::new(0, 0, 8).luma_level(), 0);
        }

        #[test]
        fn test_saturating_sub() {
            let a = Rgb::new(10, 200, 50);
            let b = Rgb::new(20, 100, 50);
            assert_eq!(a.saturating_sub(b), Rgb::new(0, 100, 0));
        }

        #[test]
        fn test_min_max() {
            let a = Rgb::new(10, 200, 50);
            let b = Rgb::new(20, 100, 50);
            assert_eq!(a.max(b), Rgb::new(20, 200, 50));
            assert_eq!(a.min(b), Rgb::new(10, 100, 50));
        }
    }
}
