//! Pixel access functions
//!
//! Two read paths exist on [`PixelGrid`]:
//!
//! - [`PixelGrid::get`] takes signed coordinates and clamps them into the
//!   image before the lookup. Every neighborhood filter samples through it,
//!   so an out-of-range tap replicates the nearest edge pixel instead of
//!   failing or wrapping.
//! - [`PixelGrid::pixel`] is the checked lookup and returns `None` outside
//!   the image.
//!
//! Writes only exist on [`PixelGridMut`].

use super::{PixelGrid, PixelGridMut};
use crate::color::Rgb;
use crate::error::{Error, Result};

/// Clamp a signed coordinate into `[0, len - 1]`.
#[inline]
pub fn clamp_coord(v: i64, len: u32) -> u32 {
    v.clamp(0, len as i64 - 1) as u32
}

impl PixelGrid {
    /// Get the colour at (x, y) with clamp-to-edge border handling.
    ///
    /// Never fails: `(-1, 0)` reads `(0, 0)`, `(width + 3, y)` reads
    /// `(width - 1, y)`.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Rgb {
        let x = clamp_coord(x, self.inner.width);
        let y = clamp_coord(y, self.inner.height);
        self.inner.data[self.inner.index(x, y)]
    }

    /// Get the colour at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[self.inner.index(x, y)])
    }

    /// Get the colour at (x, y) without the `Option`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel_unchecked(&self, x: u32, y: u32) -> Rgb {
        assert!(x < self.inner.width && y < self.inner.height);
        self.inner.data[self.inner.index(x, y)]
    }
}

impl PixelGridMut {
    /// Get the colour at (x, y).
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.inner.width || y >= self.inner.height {
            return None;
        }
        Some(self.inner.data[self.inner.index(x, y)])
    }

    /// Set the colour at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) -> Result<()> {
        if x >= self.inner.width || y >= self.inner.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.inner.width,
                height: self.inner.height,
            });
        }
        let idx = self.inner.index(x, y);
        self.inner.data[idx] = color;
        Ok(())
    }
}
