//! The `Filter` abstraction
//!
//! [`Filter`] is a closed set of variants, each carrying its parameters.
//! [`Filter::pixel_color`] is the single per-pixel rule. [`Filter::process`]
//! is the whole-image driver: for single-pass variants it maps the rule over
//! every pixel, while the two-pass and composed variants gather their
//! statistics or run their stages once per image first.
//!
//! # Examples
//!
//! ```
//! use pixfilter_core::{PixelGrid, Rgb};
//! use pixfilter_filter::Filter;
//!
//! let pix = PixelGrid::filled(3, 3, Rgb::gray(128)).unwrap();
//! let out = Filter::blur().process(&pix).unwrap();
//! assert!(out.equals(&pix));
//! assert_eq!(Filter::blur().name(), "blur");
//! ```

use crate::adaptive::{GreyWorldStats, IntensityRange};
use crate::kernel::DEFAULT_BLUR_RADIUS;
use crate::{FilterResult, Kernel, convolve, displace, point, rank};
use pixfilter_core::{PixelGrid, Rgb};
use pixfilter_morph::{MorphOp, Sel};
use tracing::debug;

/// A morphological operator with its structuring element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphFilter {
    pub op: MorphOp,
    pub sel: Sel,
}

impl MorphFilter {
    /// Operator with the default 3x3 cross.
    ///
    /// # Errors
    ///
    /// Fails only if the cross kernel cannot be turned into a sel.
    pub fn new(op: MorphOp) -> FilterResult<Self> {
        Ok(MorphFilter {
            op,
            sel: Kernel::structuring_cross().to_sel()?,
        })
    }

    /// Operator with a custom structuring element.
    pub fn with_sel(op: MorphOp, sel: Sel) -> Self {
        MorphFilter { op, sel }
    }
}

/// An image filter
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `255 - c`
    Invert,
    /// Luma into all channels
    Grayscale,
    /// Sepia toning
    Sepia,
    /// `c + 20`, clamped
    Bright,
    /// Integer linear correction `c * 255 / 10000`
    Correction,
    /// Convolution with a kernel
    Convolve(Kernel),
    /// Per-channel median over a square neighborhood
    Median { radius: u32 },
    /// Morphological operator
    Morph(MorphFilter),
    /// Grey-world colour balance (two-pass)
    ///
    /// [`Filter::pixel_color`] rescans the whole image on every call, so
    /// driving it pixel by pixel is quadratic; use [`Filter::process`].
    GreyWorld,
    /// Histogram intensity stretch (two-pass)
    ///
    /// Same cost caveat as [`Filter::GreyWorld`].
    Histogram,
    /// Horizontal sine displacement
    Waves,
    /// Seeded random jitter
    Glass { seed: u64 },
}

impl Filter {
    /// Box blur with the default radius (1).
    pub fn blur() -> Self {
        Self::blur_with(DEFAULT_BLUR_RADIUS)
    }

    /// Box blur with a custom radius.
    pub fn blur_with(radius: u32) -> Self {
        Filter::Convolve(Kernel::box_blur(radius))
    }

    /// Gaussian blur with the default radius (3) and sigma (2.0).
    pub fn gaussian() -> Self {
        Filter::Convolve(Kernel::default_gaussian())
    }

    /// Gaussian blur with custom parameters.
    pub fn gaussian_with(radius: u32, sigma: f32) -> FilterResult<Self> {
        Ok(Filter::Convolve(Kernel::gaussian(radius, sigma)?))
    }

    /// Sobel edge filter.
    pub fn sobel() -> Self {
        Filter::Convolve(Kernel::sobel())
    }

    /// Emboss.
    pub fn emboss() -> Self {
        Filter::Convolve(Kernel::emboss())
    }

    /// Sharpen.
    pub fn sharpen() -> Self {
        Filter::Convolve(Kernel::sharpen())
    }

    /// Diagonal motion blur with the default length (3) and radius (1).
    pub fn motion_blur() -> Self {
        Filter::Convolve(Kernel::default_motion_blur())
    }

    /// Motion blur with custom parameters.
    pub fn motion_blur_with(length: u32, radius: u32) -> FilterResult<Self> {
        Ok(Filter::Convolve(Kernel::motion_blur(length, radius)?))
    }

    /// Median filter. The radius has no default.
    pub fn median(radius: u32) -> Self {
        Filter::Median { radius }
    }

    /// Morphological operator with the default cross.
    pub fn morph(op: MorphOp) -> Self {
        Filter::Morph(MorphFilter::with_sel(op, Sel::cross()))
    }

    /// Glass jitter with a seed.
    pub fn glass(seed: u64) -> Self {
        Filter::Glass { seed }
    }

    /// Short name used for output files.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Invert => "invert",
            Filter::Grayscale => "gray",
            Filter::Sepia => "sepia",
            Filter::Bright => "bright",
            Filter::Correction => "correction",
            Filter::Convolve(k) => k.name().unwrap_or("convolve"),
            Filter::Median { .. } => "median",
            Filter::Morph(m) => m.op.name(),
            Filter::GreyWorld => "greyworld",
            Filter::Histogram => "histogram",
            Filter::Waves => "waves",
            Filter::Glass { .. } => "glass",
        }
    }

    /// Whether the variant needs whole-image work before its per-pixel rule.
    pub fn is_multi_pass(&self) -> bool {
        match self {
            Filter::GreyWorld | Filter::Histogram => true,
            Filter::Morph(m) => !matches!(m.op, MorphOp::Dilate | MorphOp::Erode),
            _ => false,
        }
    }

    /// Output colour of the pixel at (x, y).
    ///
    /// Reads only from `src`. For the two-pass variants the statistics are
    /// gathered over `src` on every call (O(width * height) per pixel), and
    /// composed morphology is evaluated through its stages locally; use
    /// [`Filter::process`] for whole images.
    pub fn pixel_color(&self, src: &PixelGrid, x: u32, y: u32) -> Rgb {
        match self {
            Filter::Invert => point::invert_pixel(src.pixel_unchecked(x, y)),
            Filter::Grayscale => point::grayscale_pixel(src.pixel_unchecked(x, y)),
            Filter::Sepia => point::sepia_pixel(src.pixel_unchecked(x, y)),
            Filter::Bright => point::brighten_pixel(src.pixel_unchecked(x, y)),
            Filter::Correction => point::correct_pixel(src.pixel_unchecked(x, y)),
            Filter::Convolve(kernel) => convolve::convolve_pixel(src, kernel, x, y),
            Filter::Median { radius } => rank::median_pixel(src, *radius, x, y),
            Filter::Morph(m) => m.op.apply_at(src, &m.sel, x, y),
            Filter::GreyWorld => GreyWorldStats::compute(src).apply(src.pixel_unchecked(x, y)),
            Filter::Histogram => IntensityRange::compute(src).apply(src.pixel_unchecked(x, y)),
            Filter::Waves => displace::waves_pixel(src, x, y),
            Filter::Glass { seed } => displace::glass_pixel(src, *seed, x, y),
        }
    }

    /// Apply the filter to a whole image.
    ///
    /// The source is left untouched; the result is a new image of the same
    /// size.
    pub fn process(&self, src: &PixelGrid) -> FilterResult<PixelGrid> {
        debug!(
            filter = self.name(),
            width = src.width(),
            height = src.height(),
            "process"
        );
        let out = match self {
            Filter::GreyWorld => {
                let stats = GreyWorldStats::compute(src);
                src.map_colors(|c| stats.apply(c))
            }
            Filter::Histogram => {
                let range = IntensityRange::compute(src);
                src.map_colors(|c| range.apply(c))
            }
            Filter::Morph(m) => m.op.apply(src, &m.sel)?,
            _ => src.map_pixels(|x, y| self.pixel_color(src, x, y)),
        };
        Ok(out)
    }
}
