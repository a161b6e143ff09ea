//! Two-image arithmetic
//!
//! Per-pixel combinations of two grids of equal size. Used by the composed
//! morphology operators (gradient, top-hat, black-hat).

use super::PixelGrid;
use crate::color::Rgb;
use crate::error::{Error, Result};

impl PixelGrid {
    /// Combine two grids pixel by pixel with `f(self_pixel, other_pixel)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the grids differ in size.
    pub fn zip_map<F>(&self, other: &PixelGrid, f: F) -> Result<PixelGrid>
    where
        F: Fn(Rgb, Rgb) -> Rgb + Sync + Send,
    {
        if !self.sizes_equal(other) {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: other.dimensions(),
            });
        }
        Ok(self.map_pixels(|x, y| f(self.pixel_unchecked(x, y), other.pixel_unchecked(x, y))))
    }

    /// Per-channel `max(self - other, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the grids differ in size.
    pub fn subtract_clamped(&self, other: &PixelGrid) -> Result<PixelGrid> {
        self.zip_map(other, Rgb::saturating_sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtract_clamped_floors_at_zero() {
        let a = PixelGrid::filled(2, 2, Rgb::new(100, 10, 255)).unwrap();
        let b = PixelGrid::filled(2, 2, Rgb::new(40, 50, 0)).unwrap();
        let d = a.subtract_clamped(&b).unwrap();
        assert!(d.pixels().iter().all(|&p| p == Rgb::new(60, 0, 255)));
    }

    #[test]
    fn test_size_mismatch() {
        let a = PixelGrid::new(2, 2).unwrap();
        let b = PixelGrid::new(3, 2).unwrap();
        match a.subtract_clamped(&b) {
            Err(Error::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, (2, 2));
                assert_eq!(actual, (3, 2));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_zip_map_max() {
        let a = PixelGrid::from_fn(3, 1, |x, _| Rgb::gray(x as u8 * 50)).unwrap();
        let b = PixelGrid::filled(3, 1, Rgb::gray(60)).unwrap();
        let m = a.zip_map(&b, Rgb::max).unwrap();
        assert_eq!(m.row(0), &[Rgb::gray(60), Rgb::gray(60), Rgb::gray(100)]);
    }
}
