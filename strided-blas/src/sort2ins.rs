//! Simultaneous insertion sort of two strided arrays.
//!
//! Stable: equal keys keep their relative order, and so do their
//! companions. Quadratic, so meant for short or nearly sorted inputs.

use log::debug;
use num_traits::Float;
use strided_view::{check_strided, stride2offset, Accessor, AccessorMut};

use crate::util::{at, strictly_above};
use crate::Result;

/// Sort `x` and apply the same permutation to `y`.
///
/// `order > 0` sorts increasing, `order < 0` decreasing, `order == 0`
/// leaves both arrays untouched.
pub fn sort2ins<'x, T, X, Y>(
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
    sort2ins_ndarray(
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
pub fn sort2ins_ndarray<'x, T, X, Y>(
    n: usize,
    order: T,
    x: &'x mut X,
    mut stride_x: isize,
    mut offset_x: usize,
    y: &mut Y,
    mut stride_y: isize,
    mut offset_y: usize,
) -> Result<&'x mut X>
where
    T: Float,
    X: AccessorMut<Elem = T> + ?Sized,
    Y: AccessorMut + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    check_strided(y.len(), n, stride_y, offset_y)?;
    if n <= 1 || order == T::zero() || order.is_nan() {
        return Ok(x);
    }
    if order < T::zero() {
        debug!("sort2ins: decreasing order, reversing traversal of {} elements", n);
        offset_x = at(offset_x, stride_x, n - 1);
        offset_y = at(offset_y, stride_y, n - 1);
        stride_x = -stride_x;
        stride_y = -stride_y;
    }

    for i in 1..n {
        let vx = x.get(at(offset_x, stride_x, i));
        let vy = y.get(at(offset_y, stride_y, i));
        let mut j = i;
        while j > 0 {
            let prev = x.get(at(offset_x, stride_x, j - 1));
            if !strictly_above(prev, vx) {
                break;
            }
            let prev_y = y.get(at(offset_y, stride_y, j - 1));
            x.set(at(offset_x, stride_x, j), prev);
            y.set(at(offset_y, stride_y, j), prev_y);
            j -= 1;
        }
        if j != i {
            x.set(at(offset_x, stride_x, j), vx);
            y.set(at(offset_y, stride_y, j), vy);
        }
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort2ins_ascending() {
        let mut x = [3.0, 1.0, 2.0];
        let mut y = ['c', 'a', 'b'];
        sort2ins(3, 1.0, &mut x, 1, &mut y, 1).unwrap();
        assert_eq!(x, [1.0, 2.0, 3.0]);
        assert_eq!(y, ['a', 'b', 'c']);
    }

    #[test]
    fn test_sort2ins_stable() {
        let mut x = [2.0, 1.0, 2.0, 1.0];
        let mut y = [0, 1, 2, 3];
        sort2ins(4, 1.0, &mut x, 1, &mut y, 1).unwrap();
        assert_eq!(x, [1.0, 1.0, 2.0, 2.0]);
        assert_eq!(y, [1, 3, 0, 2]);
    }

    #[test]
    fn test_sort2ins_descending_matches_heapsort() {
        let mut x = [1.0, -2.0, 3.0, -4.0];
        let mut y = [0.0, 1.0, 2.0, 3.0];
        sort2ins(4, -1.0, &mut x, 1, &mut y, 1).unwrap();
        assert_eq!(x, [3.0, 1.0, -2.0, -4.0]);
        assert_eq!(y, [2.0, 0.0, 1.0, 3.0]);
    }

    #[test]
    fn test_sort2ins_nan_and_signed_zero() {
        let mut x = [f64::NAN, 0.0, -0.0, f64::NAN, -1.0];
        let mut y = [0, 1, 2, 3, 4];
        sort2ins(5, 1.0, &mut x, 1, &mut y, 1).unwrap();
        assert_eq!(&x[..3], &[-1.0, -0.0, 0.0]);
        assert!(x[1].is_sign_negative());
        assert!(x[3].is_nan() && x[4].is_nan());
        assert_eq!(y, [4, 2, 1, 0, 3]);
    }

    #[test]
    fn test_sort2ins_ndarray_strided() {
        let mut x = [5.0, 0.0, 4.0, 0.0, 6.0];
        let mut y = [1, 2, 3];
        sort2ins_ndarray(3, 1.0, &mut x, 2, 0, &mut y, 1, 0).unwrap();
        assert_eq!(x, [4.0, 0.0, 5.0, 0.0, 6.0]);
        assert_eq!(y, [2, 1, 3]);
    }

    #[test]
    fn test_sort2ins_zero_order() {
        let mut x = [2.0, 1.0];
        let mut y = [0, 1];
        sort2ins(2, 0.0, &mut x, 1, &mut y, 1).unwrap();
        assert_eq!(x, [2.0, 1.0]);
        assert_eq!(y, [0, 1]);
    }
}
