//! Error types for pixfilter-filter
//!
//! Filters never fail per pixel; these errors come from building kernels
//! and filters with bad parameters.

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pixfilter_core::Error),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] pixfilter_morph::MorphError),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
