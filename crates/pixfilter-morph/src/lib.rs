//! pixfilter-morph - Morphological operations for RGB images
//!
//! This crate provides:
//!
//! - Structuring elements ([`Sel`]) defining the operation neighborhood
//! - Per-channel dilation and erosion, as per-pixel rules and whole-image
//!   operations
//! - Opening, closing, gradient, top-hat and black-hat, built as explicit
//!   [`MorphSequence`] pipelines of the two primitives
//! - A small sequence interpreter (`"o + tw"`) for chaining operators

pub mod color;
mod error;
pub mod sel;
pub mod sequence;

pub use error::{MorphError, MorphResult};
pub use sel::Sel;

pub use color::{dilate, dilate_pixel, erode, erode_pixel};

pub use sequence::{
    Difference, MorphOp, MorphSequence, Operand, Primitive, Stage, StageInput, black_hat, close,
    gradient, morph_sequence, open, parse_sequence, top_hat,
};
