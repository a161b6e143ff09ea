//! pixfilter-filter - Image filtering operations
//!
//! This crate provides:
//!
//! - [`Kernel`] and its factories (box, Gaussian, Sobel, emboss, sharpen,
//!   motion blur, structuring cross)
//! - Point filters: invert, grayscale, sepia, bright, linear correction
//! - Convolution with clamp-to-edge sampling
//! - Rank filtering (median)
//! - Adaptive two-pass filters: grey-world balance, histogram stretch
//! - Displacement filters: waves, glass
//! - [`Filter`], the closed set of all of the above plus morphology, with one
//!   per-pixel rule and one whole-image driver

pub mod adaptive;
pub mod convolve;
pub mod displace;
mod error;
pub mod filter;
pub mod kernel;
pub mod point;
pub mod rank;

pub use error::{FilterError, FilterResult};
pub use filter::{Filter, MorphFilter};
pub use kernel::Kernel;

// Re-export commonly used functions
pub use adaptive::{GreyWorldStats, IntensityRange, grey_world, histogram_stretch};
pub use convolve::{box_blur, convolve, emboss, gaussian_blur, motion_blur, sharpen, sobel_edge};
pub use displace::{glass, waves};
pub use point::{brighten, correct, grayscale, invert, sepia};
pub use rank::median_filter;
