//! Strided ndarray descriptors and views.
//!
//! A view is the tuple (buffer, shape, strides, offset, order). This crate
//! owns that data model and the metadata utilities the kernels rely on:
//!
//! - [`Order`]: row-major (last dimension fastest) or column-major (first dimension fastest)
//! - [`StridedView`] / [`StridedViewMut`]: validated views over any [`Accessor`] buffer
//! - [`StridedArray`]: owned strided array, handy for building operands
//! - [`layout`]: stride/offset arithmetic (`shape2strides`, `stride2offset`, contiguity, ...)
//! - [`index`]: subscript and linear index conversion with [`IndexMode`] handling
//! - [`InterleavedComplex`] / [`InterleavedComplexMut`]: complex elements stored as
//!   (re, im) pairs (feature `complex`)
//!
//! Views validate their bounds once at construction. Kernels built on top of
//! them therefore iterate without per-element checks.

#[cfg(feature = "complex")]
pub mod complex;
pub mod index;
pub mod layout;
pub mod order;
pub mod view;

pub use strided_traits::{Accessor, AccessorMut, ScalarBase};

#[cfg(feature = "complex")]
pub use complex::{InterleavedComplex, InterleavedComplexMut};
pub use index::{bind2vind, ind2sub, sub2ind, vind2bind, IndexMode};
pub use layout::{
    check_strided, is_contiguous, iteration_order, minmax_view_buffer_index, numel,
    shape2strides, stride2offset, strides2offset, strides2order, validate_bounds,
};
pub use order::Order;
pub use view::{StridedArray, StridedView, StridedViewMut};

// ============================================================================
// Error types
// ============================================================================

/// Errors raised by the validating layer around the strided kernels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StridedError {
    /// Operand ranks do not match.
    #[error("rank mismatch: {0} vs {1}")]
    RankMismatch(usize, usize),

    /// Operand shapes are incompatible.
    #[error("shape mismatch: {0:?} vs {1:?}")]
    ShapeMismatch(Vec<usize>, Vec<usize>),

    /// Stride array length doesn't match the shape.
    #[error("stride and shape length mismatch")]
    StrideLengthMismatch,

    /// Integer overflow while computing a buffer index.
    #[error("offset overflow while computing buffer index")]
    OffsetOverflow,

    /// A strided access reaches outside the buffer.
    #[error("buffer index {index} out of bounds for length {len}")]
    OutOfBounds { index: isize, len: usize },

    /// Linear index outside `[0, len)` under a mode that rejects it.
    #[error("linear index {index} out of range for {len} elements")]
    IndexOutOfRange { index: isize, len: usize },

    /// Subscript outside `[0, dim)` under a mode that rejects it.
    #[error("subscript {index} out of range for dimension {dim} of size {size}")]
    SubscriptOutOfRange { dim: usize, index: isize, size: usize },

    /// Unrecognized memory layout string.
    #[error("invalid order: {0:?}")]
    InvalidOrder(String),

    /// Interleaved complex storage needs an even number of components.
    #[error("interleaved complex buffer has odd length {0}")]
    InterleavedLength(usize),

    /// Leading dimension smaller than the matrix requires.
    #[error("invalid leading dimension {lda}: must be at least {min}")]
    InvalidLeadingDimension { lda: usize, min: usize },

    /// Matrix routine argument outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Result type for strided operations.
pub type Result<T> = std::result::Result<T, StridedError>;
