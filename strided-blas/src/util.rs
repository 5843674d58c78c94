use num_traits::Float;
use strided_view::{Order, StridedError};

use crate::Result;

/// Logical element `i` of a 1-d strided operand.
#[inline(always)]
pub(crate) fn at(offset: usize, stride: isize, i: usize) -> usize {
    (offset as isize + i as isize * stride) as usize
}

/// Heap ordering used by the sorting kernels: NaN ranks above everything
/// and `+0` above `-0`.
#[inline]
pub(crate) fn ranks_above<T: Float>(a: T, b: T) -> bool {
    a > b || a.is_nan() || (a == b && is_positive_zero(a))
}

/// Strict version of [`ranks_above`]: false for equal keys, so insertion
/// keeps ties in place.
#[inline]
pub(crate) fn strictly_above<T: Float>(a: T, b: T) -> bool {
    if a.is_nan() {
        return !b.is_nan();
    }
    a > b || (a == b && is_positive_zero(a) && !is_positive_zero(b))
}

#[inline]
pub(crate) fn is_positive_zero<T: Float>(v: T) -> bool {
    v == T::zero() && v.is_sign_positive()
}

/// `n` as a float, for averaging and repeated-element sums.
#[inline]
pub(crate) fn count_as<T: Float>(n: usize) -> T {
    <T as num_traits::NumCast>::from(n).unwrap_or_else(T::nan)
}

/// Row and column strides of a matrix stored with leading dimension `lda`.
pub(crate) fn matrix_strides(order: Order, lda: usize) -> (isize, isize) {
    match order {
        Order::RowMajor => (lda as isize, 1),
        Order::ColumnMajor => (1, lda as isize),
    }
}

/// Reject a leading dimension smaller than `max(1, min)`.
pub(crate) fn check_lda(lda: usize, min: usize) -> Result<()> {
    let min = min.max(1);
    if lda < min {
        return Err(StridedError::InvalidLeadingDimension { lda, min });
    }
    Ok(())
}
