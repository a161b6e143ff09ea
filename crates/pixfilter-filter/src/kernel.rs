//! Convolution kernels
//!
//! A [`Kernel`] is a square, odd-sized matrix of `f32` weights stored
//! row-major with its origin at the centre cell. Kernels are immutable once
//! built; the factories below produce every kernel the filters use.
//!
//! | factory                 | size      | weights                               |
//! |-------------------------|-----------|---------------------------------------|
//! | `box_blur(r)`           | `2r+1`    | `1/size²` everywhere                  |
//! | `gaussian(r, sigma)`    | `2r+1`    | `exp(-(x²+y²)/sigma²)`, sum-normalised |
//! | `sobel()`               | 3         | `[-1,-2,-1; 0,0,0; 1,2,1]`            |
//! | `emboss()`              | 3         | `[0,1,0; 1,0,-1; 0,-1,0]`             |
//! | `sharpen()`             | 3         | `[0,0,0; 0,0,4; -1,-1,-1]`            |
//! | `motion_blur(n, r)`     | `2r+1`    | `1/n` on the main diagonal            |
//! | `structuring_cross()`   | 3         | `[0,1,0; 1,1,1; 0,1,0]`               |

use crate::{FilterError, FilterResult};
use pixfilter_morph::Sel;

/// Default radius of the box blur.
pub const DEFAULT_BLUR_RADIUS: u32 = 1;
/// Default radius of the Gaussian blur.
pub const DEFAULT_GAUSSIAN_RADIUS: u32 = 3;
/// Default sigma of the Gaussian blur.
pub const DEFAULT_GAUSSIAN_SIGMA: f32 = 2.0;
/// Default length of the motion blur.
pub const DEFAULT_MOTION_LENGTH: u32 = 3;
/// Default radius of the motion blur.
pub const DEFAULT_MOTION_RADIUS: u32 = 1;

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Distance from the centre to the edge
    radius: u32,
    /// Kernel data (row-major order), `size * size` entries
    data: Vec<f32>,
    /// Short name, used for output file names
    name: Option<&'static str>,
}

impl Kernel {
    /// Create an all-zero kernel of side `2 * radius + 1`.
    pub fn new(radius: u32) -> Self {
        let size = (2 * radius + 1) as usize;
        Kernel {
            radius,
            data: vec![0.0; size * size],
            name: None,
        }
    }

    /// Create a kernel from row-major weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if `size` is even or zero, or
    /// if `data.len() != size * size`.
    pub fn from_slice(size: u32, data: &[f32]) -> FilterResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "size must be odd and positive, got {size}"
            )));
        }
        let expected = size as usize * size as usize;
        if data.len() != expected {
            return Err(FilterError::InvalidKernel(format!(
                "data has {} values, expected {expected} for a {size}x{size} kernel",
                data.len()
            )));
        }
        Ok(Kernel {
            radius: size / 2,
            data: data.to_vec(),
            name: None,
        })
    }

    fn fixed3(name: &'static str, data: [f32; 9]) -> Self {
        Kernel {
            radius: 1,
            data: data.to_vec(),
            name: Some(name),
        }
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_blur(radius: u32) -> Self {
        let size = (2 * radius + 1) as usize;
        let n = size * size;
        Kernel {
            radius,
            data: vec![1.0 / n as f32; n],
            name: Some("blur"),
        }
    }

    /// Create a Gaussian kernel.
    ///
    /// Weights are `exp(-(x² + y²) / sigma²)` for `x, y` in
    /// `[-radius, radius]`, divided by their sum.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `sigma` is not a finite
    /// positive number.
    pub fn gaussian(radius: u32, sigma: f32) -> FilterResult<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(FilterError::InvalidParameters(format!(
                "gaussian sigma must be finite and > 0, got {sigma}"
            )));
        }
        Ok(Self::build_gaussian(radius, sigma))
    }

    /// Gaussian kernel with radius 3 and sigma 2.0.
    pub fn default_gaussian() -> Self {
        Self::build_gaussian(DEFAULT_GAUSSIAN_RADIUS, DEFAULT_GAUSSIAN_SIGMA)
    }

    // sigma must be finite and positive
    fn build_gaussian(radius: u32, sigma: f32) -> Self {
        let r = radius as i64;
        let s2 = sigma as f64 * sigma as f64;
        let raw: Vec<f64> = (-r..=r)
            .flat_map(|y| (-r..=r).map(move |x| (-((x * x + y * y) as f64) / s2).exp()))
            .collect();
        let sum: f64 = raw.iter().sum();

        Kernel {
            radius,
            data: raw.iter().map(|&w| (w / sum) as f32).collect(),
            name: Some("gaus"),
        }
    }

    /// Create a Sobel kernel (row gradient, one direction only).
    pub fn sobel() -> Self {
        Self::fixed3("sobel", [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0])
    }

    /// Create an emboss kernel.
    pub fn emboss() -> Self {
        Self::fixed3("emboss", [0.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0, -1.0, 0.0])
    }

    /// Create a sharpening kernel.
    ///
    /// The weights are asymmetric and sum to 1.
    pub fn sharpen() -> Self {
        Self::fixed3("sharpen", [0.0, 0.0, 0.0, 0.0, 0.0, 4.0, -1.0, -1.0, -1.0])
    }

    /// Create a diagonal motion-blur kernel.
    ///
    /// Every cell on the main diagonal is `1/length`. With `length` equal to
    /// the kernel size the weights sum to 1.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidParameters`] if `length` is 0.
    pub fn motion_blur(length: u32, radius: u32) -> FilterResult<Self> {
        if length == 0 {
            return Err(FilterError::InvalidParameters(
                "motion blur length must be > 0".to_string(),
            ));
        }
        Ok(Self::build_motion_blur(length, radius))
    }

    /// Motion-blur kernel with length 3 and radius 1.
    pub fn default_motion_blur() -> Self {
        Self::build_motion_blur(DEFAULT_MOTION_LENGTH, DEFAULT_MOTION_RADIUS)
    }

    // length must be non-zero
    fn build_motion_blur(length: u32, radius: u32) -> Self {
        let mut kernel = Kernel::new(radius);
        let size = kernel.size() as usize;
        let w = 1.0 / length as f32;
        for i in 0..size {
            kernel.data[i * size + i] = w;
        }
        kernel.name = Some("motion");
        kernel
    }

    /// The 3x3 cross used as the default structuring element.
    pub fn structuring_cross() -> Self {
        Self::fixed3("cross", [0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0])
    }

    /// Convert to a morphological structuring element (non-zero = hit).
    pub fn to_sel(&self) -> FilterResult<Sel> {
        Ok(Sel::from_weights(self.size(), &self.data)?)
    }

    /// Get the kernel radius.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Get the side length, `2 * radius + 1`.
    #[inline]
    pub fn size(&self) -> u32 {
        2 * self.radius + 1
    }

    /// Short name of the kernel, if it came from a named factory.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get the value at column `col`, row `row`.
    #[inline]
    pub fn get(&self, col: u32, row: u32) -> Option<f32> {
        let size = self.size();
        if col >= size || row >= size {
            return None;
        }
        Some(self.data[(row * size + col) as usize])
    }

    /// Get the weight at offset `(dx, dy)` from the centre.
    ///
    /// Offsets outside the kernel have weight 0.
    #[inline]
    pub fn weight(&self, dx: i32, dy: i32) -> f32 {
        let r = self.radius as i32;
        if dx.abs() > r || dy.abs() > r {
            return 0.0;
        }
        let size = self.size() as i32;
        self.data[((dy + r) * size + (dx + r)) as usize]
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}
