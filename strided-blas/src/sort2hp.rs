//! Simultaneous heapsort of two strided arrays.
//!
//! `x` is sorted and `y` receives the same permutation. NaN sorts above
//! every number and `+0` above `-0`, so the result is deterministic for
//! any input.

use log::debug;
use num_traits::Float;
use strided_view::{check_strided, stride2offset, Accessor, AccessorMut};

use crate::util::{at, ranks_above};
use crate::Result;

/// Sort `x` (and permute `y` alongside) in increasing order when
/// `order > 0`, decreasing when `order < 0`. `order == 0` is a no-op.
///
/// # Example
///
/// ```
/// use strided_blas::sort2hp;
///
/// let mut x = [1.0, -2.0, 3.0, -4.0];
/// let mut y = [0.0, 1.0, 2.0, 3.0];
/// sort2hp(4, -1.0, &mut x, 1, &mut y, 1).unwrap();
/// assert_eq!(x, [3.0, 1.0, -2.0, -4.0]);
/// assert_eq!(y, [2.0, 0.0, 1.0, 3.0]);
/// ```
pub fn sort2hp<'x, T, X, Y>(
    n: usize,
    order: T,
    x: &'x mut X,
    stride_x: isize,
    y: &mut Y,
    stride_y: isize,
) -> Result<&'x mut X>
where
    T: Float,
    X: AccessorMut<Elem = T> + ?Sized,
    Y: AccessorMut + ?Sized,
{
    sort2hp_ndarray(
        n,
        order,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn sort2hp_ndarray<'x, T, X, Y>(
    n: usize,
    order: T,
    x: &'x mut X,
    stride_x: isize,
    offset_x: usize,
    y: &mut Y,
    stride_y: isize,
    offset_y: usize,
) -> Result<&'x mut X>
where
    T: Float,
    X: AccessorMut<Elem = T> + ?Sized,
    Y: AccessorMut + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    check_strided(y.len(), n, stride_y, offset_y)?;
    heapsort2(n, order, x, stride_x, offset_x, y, stride_y, offset_y);
    Ok(x)
}

/// Unchecked core shared with the single-array sort.
#[allow(clippy::too_many_arguments)]
pub(crate) fn heapsort2<T, X, Y>(
    n: usize,
    order: T,
    x: &mut X,
    mut stride_x: isize,
    mut offset_x: usize,
    y: &mut Y,
    mut stride_y: isize,
    mut offset_y: usize,
) where
    T: Float,
    X: AccessorMut<Elem = T> + ?Sized,
    Y: AccessorMut + ?Sized,
{
    if n == 0 || order == T::zero() || order.is_nan() {
        return;
    }
    if order < T::zero() {
        // Sorting the reversed traversal increasing leaves memory decreasing.
        debug!("sort2hp: decreasing order, reversing traversal of {} elements", n);
        offset_x = at(offset_x, stride_x, n - 1);
        offset_y = at(offset_y, stride_y, n - 1);
        stride_x = -stride_x;
        stride_y = -stride_y;
    }
    let ix = |i: usize| at(offset_x, stride_x, i);
    let iy = |i: usize| at(offset_y, stride_y, i);

    let mut n = n;
    let mut parent = n / 2;
    loop {
        let (tx, ty);
        if parent > 0 {
            // Heap construction.
            parent -= 1;
            tx = x.get(ix(parent));
            ty = y.get(iy(parent));
        } else {
            // Move the root to the end of the shrinking heap.
            n -= 1;
            if n == 0 {
                return;
            }
            tx = x.get(ix(n));
            ty = y.get(iy(n));
            let (rx, ry) = (x.get(ix(0)), y.get(iy(0)));
            x.set(ix(n), rx);
            y.set(iy(n), ry);
        }

        // Sift `tx` down from `parent`.
        let mut j = parent;
        let mut child = 2 * j + 1;
        while child < n {
            if child + 1 < n && ranks_above(x.get(ix(child + 1)), x.get(ix(child))) {
                child += 1;
            }
            let v = x.get(ix(child));
            if ranks_above(v, tx) {
                let w = y.get(iy(child));
                x.set(ix(j), v);
                y.set(iy(j), w);
                j = child;
                child = 2 * j + 1;
            } else {
                break;
            }
        }
        x.set(ix(j), tx);
        y.set(iy(j), ty);
    }
}
