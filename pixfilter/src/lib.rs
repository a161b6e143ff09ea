//! pixfilter - Per-pixel image filtering
//!
//! Every filter reads an immutable [`PixelGrid`] and produces a new one of
//! the same size. Neighborhood reads clamp to the image edge.
//!
//! - Point filters: invert, grayscale, sepia, bright, linear correction
//! - Convolution: box blur, Gaussian, Sobel, emboss, sharpen, motion blur
//! - Rank: median
//! - Morphology: dilation, erosion and the operators composed from them
//! - Adaptive: grey-world balance, histogram stretch
//! - Displacement: waves, glass
//! - Image I/O (PNG, JPEG, BMP, PNM, TIFF, GIF)
//!
//! # Example
//!
//! ```
//! use pixfilter::{Filter, PixelGrid, Rgb};
//!
//! let pix = PixelGrid::filled(8, 8, Rgb::new(200, 40, 40)).unwrap();
//! let gray = Filter::Grayscale.process(&pix).unwrap();
//! let p = gray.pixel(0, 0).unwrap();
//! assert!(p.r == p.g && p.g == p.b);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pixfilter_core::*;

pub use pixfilter_filter::{Filter, FilterError, Kernel, MorphFilter};

// Re-export domain crates as modules to avoid name conflicts
pub use pixfilter_filter as filter;
pub use pixfilter_io as io;
pub use pixfilter_morph as morph;
