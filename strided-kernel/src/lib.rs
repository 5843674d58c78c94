//! Element-wise kernels over strided ndarray views.
//!
//! Given operands described by (buffer, shape, strides, offset, order), the
//! kernels visit every logical element exactly once, reading through
//! [`Accessor::get`], applying a callback and writing through
//! [`AccessorMut::set`].
//!
//! # Layout
//!
//! - [`order`]: loop nesting order and per-level deltas
//! - [`apply`]: `nullary`, `unary`, `binary` and their fallible and blocked forms
//! - [`ops_view`]: `assign` and `fill`
//! - [`strided`]: one-dimensional maps in both calling conventions
//!
//! # Example
//!
//! ```
//! use strided_kernel::{binary, StridedArray};
//!
//! let a = StridedArray::from_fn_row_major(&[2, 3], |idx| (idx[0] * 3 + idx[1]) as f64);
//! let b = StridedArray::from_fn_col_major(&[2, 3], |idx| idx[1] as f64);
//! let mut c = StridedArray::<f64>::row_major(&[2, 3]);
//! binary(&a.view(), &b.view(), &mut c.view_mut(), |x, y| x - y).unwrap();
//! assert_eq!(c.data(), &[0.0, 0.0, 0.0, 3.0, 3.0, 3.0]);
//! ```

pub mod apply;
pub(crate) mod block;
pub(crate) mod kernel;
pub mod ops_view;
pub mod order;
pub mod strided;

pub use apply::{
    binary, binary_blocked, nullary, try_binary, try_binary_blocked, try_nullary, try_unary,
    try_unary_blocked, try_unary_inplace, unary, unary_blocked, unary_inplace,
};
pub use ops_view::{assign, fill};
pub use order::{loop_permutation, resolve_loops};
pub use strided::{
    binary_1d, binary_1d_ndarray, mskunary_1d, mskunary_1d_ndarray, unary_1d, unary_1d_ndarray,
};

pub use strided_view::{
    Accessor, AccessorMut, Order, Result, StridedArray, StridedError, StridedView, StridedViewMut,
};

/// Tile size, in bytes, for blocked iteration.
pub const BLOCK_SIZE_IN_BYTES: usize = 64;

/// Tile size, in elements, used when the element size is unknown or zero.
pub const BLOCK_SIZE_IN_ELEMENTS: usize = 8;

/// Highest loop rank with a hand-unrolled nest. Deeper nests use an odometer.
pub const MAX_UNROLLED_RANK: usize = 4;
