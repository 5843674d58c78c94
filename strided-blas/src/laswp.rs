//! Row interchanges from a pivot vector.

use log::debug;
use strided_view::{check_strided, validate_bounds, Accessor, AccessorMut, Order, StridedError};

use crate::util::{at, check_lda, matrix_strides};
use crate::Result;

/// Apply the row interchanges `ipiv` to the `n` columns of `a` for rows
/// `k1..=k2`.
///
/// Pivots are 0-based row indices. As in LAPACK, the pivot for row `k` lives
/// at `ipiv[k1 + (k - k1) * |incx|]` for either sign of `incx`. `incx > 0`
/// applies the swaps from `k1` up to `k2`, `incx < 0` from `k2` down to `k1`,
/// and `incx == 0` does nothing.
///
/// # Example
///
/// ```
/// use strided_blas::{laswp, Order};
///
/// // 3x2 row-major
/// let mut a = [1, 2, 3, 4, 5, 6];
/// let ipiv = [2, 2];
/// laswp(Order::RowMajor, 2, &mut a, 2, 0, 1, &ipiv, 1).unwrap();
/// assert_eq!(a, [5, 6, 1, 2, 3, 4]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn laswp<'a, A, P>(
    order: Order,
    n: usize,
    a: &'a mut A,
    lda: usize,
    k1: usize,
    k2: usize,
    ipiv: &P,
    incx: isize,
) -> Result<&'a mut A>
where
    A: AccessorMut + ?Sized,
    P: Accessor<Elem = usize> + ?Sized,
{
    let stride_ipiv = incx.unsigned_abs() as isize;
    let offset_ipiv = k1;
    let rows = rows_touched(k1, k2, ipiv, stride_ipiv, offset_ipiv)?;
    match order {
        Order::RowMajor => check_lda(lda, n)?,
        Order::ColumnMajor => check_lda(lda, rows)?,
    }
    let (sa1, sa2) = matrix_strides(order, lda);
    laswp_ndarray(n, a, sa1, sa2, 0, k1, k2, incx, ipiv, stride_ipiv, offset_ipiv)
}

/// [`laswp`] with explicit strides and offsets. The pivot for row `k` is
/// `ipiv[offset_ipiv + (k - k1) * stride_ipiv]`; only the sign of `inck`
/// matters.
#[allow(clippy::too_many_arguments)]
pub fn laswp_ndarray<'a, A, P>(
    n: usize,
    a: &'a mut A,
    stride_a1: isize,
    stride_a2: isize,
    offset_a: usize,
    k1: usize,
    k2: usize,
    inck: isize,
    ipiv: &P,
    stride_ipiv: isize,
    offset_ipiv: usize,
) -> Result<&'a mut A>
where
    A: AccessorMut + ?Sized,
    P: Accessor<Elem = usize> + ?Sized,
{
    let rows = rows_touched(k1, k2, ipiv, stride_ipiv, offset_ipiv)?;
    validate_bounds(a.len(), &[rows, n], &[stride_a1, stride_a2], offset_a)?;
    if inck == 0 || n == 0 {
        return Ok(a);
    }

    let pivot = |k: usize| ipiv.get(at(offset_ipiv, stride_ipiv, k - k1));
    let swap_rows = |a: &mut A, k: usize, p: usize| {
        for j in 0..n {
            let col = j as isize * stride_a2;
            let ik = (offset_a as isize + k as isize * stride_a1 + col) as usize;
            let ip = (offset_a as isize + p as isize * stride_a1 + col) as usize;
            let (vk, vp) = (a.get(ik), a.get(ip));
            a.set(ik, vp);
            a.set(ip, vk);
        }
    };

    if inck > 0 {
        for k in k1..=k2 {
            let p = pivot(k);
            if p != k {
                swap_rows(&mut *a, k, p);
            }
        }
    } else {
        debug!("laswp: applying pivots {}..={} in reverse", k1, k2);
        for k in (k1..=k2).rev() {
            let p = pivot(k);
            if p != k {
                swap_rows(&mut *a, k, p);
            }
        }
    }
    Ok(a)
}

/// Validate the pivot range and return how many rows of `a` it reaches.
fn rows_touched<P>(
    k1: usize,
    k2: usize,
    ipiv: &P,
    stride_ipiv: isize,
    offset_ipiv: usize,
) -> Result<usize>
where
    P: Accessor<Elem = usize> + ?Sized,
{
    if k1 > k2 {
        return Err(StridedError::InvalidArgument("k1 must not exceed k2"));
    }
    let count = k2 - k1 + 1;
    check_strided(ipiv.len(), count, stride_ipiv, offset_ipiv)?;
    let max_pivot = (0..count)
        .map(|i| ipiv.get(at(offset_ipiv, stride_ipiv, i)))
        .max()
        .unwrap_or(0);
    Ok(k2.max(max_pivot) + 1)
}
