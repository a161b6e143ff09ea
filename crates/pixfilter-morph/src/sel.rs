//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Here it is an odd-sized square mask whose origin is the
//! centre cell; only the active ("hit") cells take part in dilation and
//! erosion.

use crate::{MorphError, MorphResult};

/// Structuring Element (SEL)
///
/// # Examples
///
/// ```
/// use pixfilter_morph::Sel;
///
/// let sel = Sel::cross();
/// assert_eq!(sel.size(), 3);
/// assert_eq!(sel.hit_count(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct Sel {
    size: u32,
    cells: Vec<bool>,
    name: Option<String>,
}

impl Sel {
    /// Create a structuring element from a row-major boolean mask.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidSel`] if `size` is even or zero, if
    /// `mask.len() != size * size`, or if no cell is active.
    pub fn from_mask(size: u32, mask: Vec<bool>) -> MorphResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(MorphError::InvalidSel(format!(
                "size must be odd and positive, got {size}"
            )));
        }
        let expected = size as usize * size as usize;
        if mask.len() != expected {
            return Err(MorphError::InvalidSel(format!(
                "mask has {} cells, expected {expected} for a {size}x{size} sel",
                mask.len()
            )));
        }
        if !mask.iter().any(|&hit| hit) {
            return Err(MorphError::InvalidSel("sel has no hit cells".to_string()));
        }
        Ok(Sel {
            size,
            cells: mask,
            name: None,
        })
    }

    /// Create a structuring element from numeric weights.
    ///
    /// Every non-zero weight becomes a hit. This is how a convolution-style
    /// kernel (such as the 3x3 cross with weights 0/1) is turned into a mask.
    pub fn from_weights(size: u32, weights: &[f32]) -> MorphResult<Self> {
        Self::from_mask(size, weights.iter().map(|&w| w != 0.0).collect())
    }

    /// 3x3 cross (+): the centre and its four direct neighbours.
    pub fn cross() -> Self {
        Sel {
            size: 3,
            cells: vec![false, true, false, true, true, true, false, true, false],
            name: Some("cross".to_string()),
        }
    }

    /// Full `(2r+1) x (2r+1)` square of hits.
    ///
    /// Radius 0 gives the 1x1 identity element.
    pub fn square(radius: u32) -> Self {
        let size = 2 * radius + 1;
        Sel {
            size,
            cells: vec![true; size as usize * size as usize],
            name: Some(format!("square{size}")),
        }
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Distance from the origin to the edge, `(size - 1) / 2`.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.size / 2
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the cell at (col, row) is a hit.
    pub fn is_hit(&self, col: u32, row: u32) -> Option<bool> {
        if col >= self.size || row >= self.size {
            return None;
        }
        Some(self.cells[(row * self.size + col) as usize])
    }

    /// Count of hit cells
    pub fn hit_count(&self) -> usize {
        self.cells.iter().filter(|&&hit| hit).count()
    }

    /// Iterate over hit positions relative to the origin, as `(dx, dy)`.
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let c = self.radius() as i32;
        let size = self.size;

        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, &hit)| {
                if hit {
                    let x = (idx as u32 % size) as i32;
                    let y = (idx as u32 / size) as i32;
                    Some((x - c, y - c))
                } else {
                    None
                }
            })
    }
}

/// Sels compare by mask; the name is ignored.
impl PartialEq for Sel {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for Sel {}

impl Default for Sel {
    fn default() -> Self {
        Sel::cross()
    }
}
