//! PixelGrid - The RGB image container
//!
//! `PixelGrid` is the image type every filter consumes and produces.
//!
//! # Pixel layout
//!
//! - Pixels are stored row-major as [`Rgb`] values, `width * height` of them
//! - Each channel is an 8-bit intensity in `[0, 255]`
//!
//! # Ownership model
//!
//! `PixelGrid` uses `Arc` for cheap cloning (shared ownership) and is never
//! modified once built. To write pixels, start from a [`PixelGridMut`]
//! (via [`PixelGrid::try_into_mut`] or [`PixelGrid::to_mut`]) and convert
//! back with `Into<PixelGrid>`. Filters follow this discipline: they read
//! from the source grid and write into a separately owned result.

mod access;
pub mod arith;
mod map;
pub mod statistics;

pub use access::clamp_coord;
pub use statistics::ChannelMeans;

use crate::color::Rgb;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Internal grid data
#[derive(Debug, Clone, PartialEq, Eq)]
struct GridData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major pixel data
    data: Vec<Rgb>,
}

impl GridData {
    fn check_dimensions(width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Immutable RGB image
///
/// # Examples
///
/// ```
/// use pixfilter_core::{PixelGrid, Rgb};
///
/// let grid = PixelGrid::filled(4, 3, Rgb::gray(128)).unwrap();
/// assert_eq!(grid.width(), 4);
/// assert_eq!(grid.height(), 3);
/// // Out-of-range reads replicate the nearest edge pixel
/// assert_eq!(grid.get(-5, 10), Rgb::gray(128));
/// ```
#[derive(Debug, Clone)]
pub struct PixelGrid {
    inner: Arc<GridData>,
}

impl PixelGrid {
    /// Create a new black grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Create a grid with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: Rgb) -> Result<Self> {
        GridData::check_dimensions(width, height)?;
        let data = vec![color; width as usize * height as usize];
        Ok(Self::from_data(GridData {
            width,
            height,
            data,
        }))
    }

    /// Create a grid from row-major pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero-sized grid and
    /// [`Error::InvalidParameter`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self> {
        GridData::check_dimensions(width, height)?;
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "pixel buffer has {} entries, expected {} for {}x{}",
                pixels.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self::from_data(GridData {
            width,
            height,
            data: pixels,
        }))
    }

    /// Create a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> Rgb) -> Result<Self> {
        GridData::check_dimensions(width, height)?;
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Ok(Self::from_data(GridData {
            width,
            height,
            data,
        }))
    }

    fn from_data(inner: GridData) -> Self {
        PixelGrid {
            inner: Arc::new(inner),
        }
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.data.len()
    }

    /// Always false: a grid has at least one pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.data.is_empty()
    }

    /// Raw row-major pixel data.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.inner.data
    }

    /// One row of pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgb] {
        let start = self.inner.index(0, y);
        &self.inner.data[start..start + self.inner.width as usize]
    }

    /// Check if two grids have the same width and height.
    pub fn sizes_equal(&self, other: &PixelGrid) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Check if two grids are pixel-for-pixel identical.
    pub fn equals(&self, other: &PixelGrid) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }

    /// Try to get mutable access to the image data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixelGridMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixelGridMut { inner: data }),
            Err(arc) => Err(PixelGrid { inner: arc }),
        }
    }

    /// Create a mutable copy of this grid.
    pub fn to_mut(&self) -> PixelGridMut {
        PixelGridMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable RGB image
///
/// The write side of a filter application. Convert back to an immutable
/// [`PixelGrid`] using `Into<PixelGrid>`.
#[derive(Debug)]
pub struct PixelGridMut {
    inner: GridData,
}

impl PixelGridMut {
    /// Create a new black mutable grid.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        GridData::check_dimensions(width, height)?;
        Ok(PixelGridMut {
            inner: GridData {
                width,
                height,
                data: vec![Rgb::BLACK; width as usize * height as usize],
            },
        })
    }

    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Raw row-major pixel data.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.inner.data
    }

    /// Set every pixel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.inner.data.fill(color);
    }
}

impl From<PixelGridMut> for PixelGrid {
    fn from(grid: PixelGridMut) -> Self {
        PixelGrid::from_data(grid.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_black() {
        let grid = PixelGrid::new(3, 2).unwrap();
        assert_eq!(grid.dimensions(), (3, 2));
        assert!(grid.pixels().iter().all(|&p| p == Rgb::BLACK));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            PixelGrid::new(0, 10),
            Err(Error::InvalidDimension {
                width: 0,
                height: 10
            })
        ));
        assert!(PixelGrid::new(10, 0).is_err());
        assert!(PixelGridMut::new(0, 0).is_err());
    }

    #[test]
    fn test_from_pixels_length_check() {
        assert!(PixelGrid::from_pixels(2, 2, vec![Rgb::BLACK; 3]).is_err());
        let grid = PixelGrid::from_pixels(2, 2, vec![Rgb::WHITE; 4]).unwrap();
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_from_fn_layout() {
        let grid = PixelGrid::from_fn(3, 2, |x, y| Rgb::new(x as u8, y as u8, 0)).unwrap();
        assert_eq!(grid.row(1)[2], Rgb::new(2, 1, 0));
        assert_eq!(grid.pixels()[5], Rgb::new(2, 1, 0));
    }

    #[test]
    fn test_try_into_mut_shared() {
        let grid = PixelGrid::new(2, 2).unwrap();
        let shared = grid.clone();
        let grid = grid.try_into_mut().unwrap_err();
        drop(shared);
        assert!(grid.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_is_independent() {
        let grid = PixelGrid::filled(2, 2, Rgb::gray(7)).unwrap();
        let mut copy = grid.to_mut();
        copy.fill(Rgb::WHITE);
        let copy: PixelGrid = copy.into();
        assert_eq!(grid.pixels()[0], Rgb::gray(7));
        assert_eq!(copy.pixels()[0], Rgb::WHITE);
        assert!(!grid.equals(&copy));
    }
}
