//! Whole-image driver
//!
//! [`PixelGrid::map_pixels`] evaluates a per-pixel rule for every coordinate
//! and collects the results into a new grid. The rule only reads from
//! captured source grids, and each output pixel is written exactly once, so
//! rows are computed independently. With the `parallel` feature rows are
//! spread over rayon's pool; the output is identical either way.

use super::{GridData, PixelGrid};
use crate::color::Rgb;
use crate::maybe_rayon::*;

impl PixelGrid {
    /// Build a grid of the same size by evaluating `rule(x, y)` per pixel.
    ///
    /// The source grid is not modified.
    pub fn map_pixels<F>(&self, rule: F) -> PixelGrid
    where
        F: Fn(u32, u32) -> Rgb + Sync + Send,
    {
        let (w, h) = self.dimensions();
        let data: Vec<Rgb> = (0..h)
            .into_par_iter()
            .flat_map(|y| (0..w).map(|x| rule(x, y)).collect::<Vec<_>>())
            .collect();

        PixelGrid::from_data(GridData {
            width: w,
            height: h,
            data,
        })
    }

    /// Apply `f` to every pixel independently.
    pub fn map_colors<F>(&self, f: F) -> PixelGrid
    where
        F: Fn(Rgb) -> Rgb + Sync + Send,
    {
        self.map_pixels(|x, y| f(self.pixel_unchecked(x, y)))
    }
}
