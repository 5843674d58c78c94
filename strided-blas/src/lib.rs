//! One-dimensional strided numeric kernels.
//!
//! Every kernel comes in two calling conventions:
//!
//! - `kernel(n, x, stride_x, ..)`: the first logical element of each operand
//!   sits at [`stride2offset`](strided_view::stride2offset)`(n, stride)`, so
//!   negative strides walk the buffer backwards from its end;
//! - `kernel_ndarray(n, x, stride_x, offset_x, ..)`: offsets are explicit.
//!
//! Arguments are validated once; the loops themselves are unchecked.
//! `n == 0` is always the identity case: outputs stay untouched, sums
//! return zero. Mutating kernels hand the output back for chaining.
//!
//! The matrix helpers ([`lacpy`], [`ge_trans`], [`laswp`]) take
//! `(order, lda)` in their pointer form and explicit row/column strides in
//! their ndarray form.

pub mod axpy;
pub mod copy;
pub mod cusum;
pub mod ge_trans;
pub mod lacpy;
pub mod laswp;
pub mod meanvar;
pub mod scal;
pub mod sort2hp;
pub mod sort2ins;
pub mod sorthp;
pub mod sumpw;
mod util;

pub use axpy::{axpy, axpy_ndarray};
pub use copy::{copy, copy_ndarray, copy_within, copy_within_ndarray};
pub use cusum::{cusumkbn, cusumkbn_ndarray, cusumpw, cusumpw_ndarray};
pub use ge_trans::{ge_trans, ge_trans_ndarray};
pub use lacpy::{lacpy, lacpy_ndarray, Uplo};
pub use laswp::{laswp, laswp_ndarray};
pub use meanvar::{meanvarpn, meanvarpn_ndarray};
pub use scal::{scal, scal_ndarray};
pub use sort2hp::{sort2hp, sort2hp_ndarray};
pub use sort2ins::{sort2ins, sort2ins_ndarray};
pub use sorthp::{sorthp, sorthp_ndarray};
pub use sumpw::{
    nannsumpw, nannsumpw_ndarray, nansumpw, nansumpw_ndarray, sumpw, sumpw_ndarray,
};

pub use strided_view::{Order, Result, StridedError};

/// Block size at which the pairwise kernels stop bisecting.
pub const PAIRWISE_BLOCKSIZE: usize = 128;
