//! Element-wise application over strided views.
//!
//! Each entry point checks operand shapes once, then hands the validated
//! descriptors to the loop engine. Elements are visited in the canonical
//! order of the leading input's declared [`Order`](strided_view::Order):
//! row-major visits the last dimension fastest, column-major the first. The
//! nullary forms follow the output's order. Every operand resolves its own
//! deltas, so inputs and outputs may declare different orders.
//!
//! Callbacks are `FnMut`, so they may record state. The `try_*` forms accept
//! fallible callbacks: the first error stops the traversal and is returned,
//! leaving earlier writes in place.
//!
//! Inputs and outputs cannot alias through these signatures. Use
//! [`unary_inplace`] to transform a view in place.

use std::convert::Infallible;

use log::trace;
use strided_view::{Accessor, AccessorMut, StridedError, StridedView, StridedViewMut};

use crate::block::{block_size, for_each_offset_blocked};
use crate::kernel::{drive, ensure_same_shape, LoopPlan};
use crate::order::interchange_order;
use crate::Result;

// ============================================================================
// Nullary
// ============================================================================

/// Fill `y` from a fallible generator, one call per element.
pub fn try_nullary<Y, E, F>(y: &mut StridedViewMut<'_, Y>, mut f: F) -> std::result::Result<(), E>
where
    Y: AccessorMut + ?Sized,
    F: FnMut() -> std::result::Result<Y::Elem, E>,
{
    let (dst, shape, strides, offset, order) = y.parts_mut();
    drive(shape, [strides], [offset], order, |[iy]| {
        let v = f()?;
        dst.set(iy, v);
        Ok(())
    })
}

/// Fill `y` from a generator, one call per element.
pub fn nullary<Y, F>(y: &mut StridedViewMut<'_, Y>, mut f: F)
where
    Y: AccessorMut + ?Sized,
    F: FnMut() -> Y::Elem,
{
    try_nullary(y, || Ok::<_, Infallible>(f())).unwrap_or_else(|e| match e {})
}

// ============================================================================
// Unary
// ============================================================================

/// `y[i] = f(x[i])` with a fallible callback.
pub fn try_unary<X, Y, E, F>(
    x: &StridedView<'_, X>,
    y: &mut StridedViewMut<'_, Y>,
    mut f: F,
) -> std::result::Result<(), E>
where
    X: Accessor + ?Sized,
    Y: AccessorMut + ?Sized,
    E: From<StridedError>,
    F: FnMut(X::Elem) -> std::result::Result<Y::Elem, E>,
{
    ensure_same_shape(x.shape(), y.shape())?;
    let src = x.buffer();
    let order = x.order();
    let (dst, shape, y_strides, y_offset, _) = y.parts_mut();
    drive(
        shape,
        [x.strides(), y_strides],
        [x.offset(), y_offset],
        order,
        |[ix, iy]| {
            let v = f(src.get(ix))?;
            dst.set(iy, v);
            Ok(())
        },
    )
}

/// `y[i] = f(x[i])`.
///
/// # Example
///
/// ```
/// use strided_kernel::{unary, Order, StridedView, StridedViewMut};
///
/// let x = [1.0, 2.0, 3.0, 4.0];
/// let mut out = [0.0; 4];
/// let xv = StridedView::new(&x, &[2, 2], &[2, 1], 0, Order::RowMajor).unwrap();
/// let mut yv = StridedViewMut::new(&mut out, &[2, 2], &[2, 1], 0, Order::RowMajor).unwrap();
/// unary(&xv, &mut yv, |v| v * 2.0).unwrap();
/// assert_eq!(out, [2.0, 4.0, 6.0, 8.0]);
/// ```
pub fn unary<X, Y, F>(x: &StridedView<'_, X>, y: &mut StridedViewMut<'_, Y>, mut f: F) -> Result<()>
where
    X: Accessor + ?Sized,
    Y: AccessorMut + ?Sized,
    F: FnMut(X::Elem) -> Y::Elem,
{
    try_unary(x, y, |v| Ok(f(v)))
}

/// `y[i] = f(y[i])` with a fallible callback.
pub fn try_unary_inplace<Y, E, F>(
    y: &mut StridedViewMut<'_, Y>,
    mut f: F,
) -> std::result::Result<(), E>
where
    Y: AccessorMut + ?Sized,
    F: FnMut(Y::Elem) -> std::result::Result<Y::Elem, E>,
{
    let (buf, shape, strides, offset, order) = y.parts_mut();
    drive(shape, [strides], [offset], order, |[i]| {
        let v = f(buf.get(i))?;
        buf.set(i, v);
        Ok(())
    })
}

/// `y[i] = f(y[i])`: the aliased form of [`unary`].
pub fn unary_inplace<Y, F>(y: &mut StridedViewMut<'_, Y>, mut f: F)
where
    Y: AccessorMut + ?Sized,
    F: FnMut(Y::Elem) -> Y::Elem,
{
    try_unary_inplace(y, |v| Ok::<_, Infallible>(f(v))).unwrap_or_else(|e| match e {})
}

// ============================================================================
// Binary
// ============================================================================

/// `z[i] = f(x[i], y[i])` with a fallible callback.
pub fn try_binary<X, Y, Z, E, F>(
    x: &StridedView<'_, X>,
    y: &StridedView<'_, Y>,
    z: &mut StridedViewMut<'_, Z>,
    mut f: F,
) -> std::result::Result<(), E>
where
    X: Accessor + ?Sized,
    Y: Accessor + ?Sized,
    Z: AccessorMut + ?Sized,
    E: From<StridedError>,
    F: FnMut(X::Elem, Y::Elem) -> std::result::Result<Z::Elem, E>,
{
    ensure_same_shape(x.shape(), y.shape())?;
    ensure_same_shape(x.shape(), z.shape())?;
    let (xs, ys) = (x.buffer(), y.buffer());
    let order = x.order();
    let (dst, shape, z_strides, z_offset, _) = z.parts_mut();
    drive(
        shape,
        [x.strides(), y.strides(), z_strides],
        [x.offset(), y.offset(), z_offset],
        order,
        |[ix, iy, iz]| {
            let v = f(xs.get(ix), ys.get(iy))?;
            dst.set(iz, v);
            Ok(())
        },
    )
}

/// `z[i] = f(x[i], y[i])`.
pub fn binary<X, Y, Z, F>(
    x: &StridedView<'_, X>,
    y: &StridedView<'_, Y>,
    z: &mut StridedViewMut<'_, Z>,
    mut f: F,
) -> Result<()>
where
    X: Accessor + ?Sized,
    Y: Accessor + ?Sized,
    Z: AccessorMut + ?Sized,
    F: FnMut(X::Elem, Y::Elem) -> Z::Elem,
{
    try_binary(x, y, z, |a, b| Ok(f(a, b)))
}

// ============================================================================
// Blocked
// ============================================================================

/// `y[i] = f(x[i])` traversed in cache-sized tiles.
///
/// Dimensions are interchanged by ascending |stride| of `x` and tiled, so
/// the visitation order is not the canonical one. Prefer [`unary`] when the
/// callback observes order.
pub fn try_unary_blocked<X, Y, E, F>(
    x: &StridedView<'_, X>,
    y: &mut StridedViewMut<'_, Y>,
    mut f: F,
) -> std::result::Result<(), E>
where
    X: Accessor + ?Sized,
    Y: AccessorMut + ?Sized,
    E: From<StridedError>,
    F: FnMut(X::Elem) -> std::result::Result<Y::Elem, E>,
{
    ensure_same_shape(x.shape(), y.shape())?;
    let src = x.buffer();
    let perm = interchange_order(x.strides());
    let bsize = block_size(&[
        std::mem::size_of::<X::Elem>(),
        std::mem::size_of::<Y::Elem>(),
    ]);
    let (dst, shape, y_strides, y_offset, _) = y.parts_mut();
    trace!("apply: blocked path for shape {:?}, block size {}", shape, bsize);
    let plan = LoopPlan::with_permutation(
        shape,
        [x.strides(), y_strides],
        [x.offset(), y_offset],
        &perm,
    );
    for_each_offset_blocked(&plan, bsize, |[ix, iy]| {
        let v = f(src.get(ix))?;
        dst.set(iy, v);
        Ok(())
    })
}

/// `y[i] = f(x[i])` traversed in cache-sized tiles. See
/// [`try_unary_blocked`] for the ordering caveat.
pub fn unary_blocked<X, Y, F>(
    x: &StridedView<'_, X>,
    y: &mut StridedViewMut<'_, Y>,
    mut f: F,
) -> Result<()>
where
    X: Accessor + ?Sized,
    Y: AccessorMut + ?Sized,
    F: FnMut(X::Elem) -> Y::Elem,
{
    try_unary_blocked(x, y, |v| Ok(f(v)))
}

/// `z[i] = f(x[i], y[i])` traversed in cache-sized tiles. See
/// [`try_unary_blocked`] for the ordering caveat.
pub fn try_binary_blocked<X, Y, Z, E, F>(
    x: &StridedView<'_, X>,
    y: &StridedView<'_, Y>,
    z: &mut StridedViewMut<'_, Z>,
    mut f: F,
) -> std::result::Result<(), E>
where
    X: Accessor + ?Sized,
    Y: Accessor + ?Sized,
    Z: AccessorMut + ?Sized,
    E: From<StridedError>,
    F: FnMut(X::Elem, Y::Elem) -> std::result::Result<Z::Elem, E>,
{
    ensure_same_shape(x.shape(), y.shape())?;
    ensure_same_shape(x.shape(), z.shape())?;
    let (xs, ys) = (x.buffer(), y.buffer());
    let perm = interchange_order(x.strides());
    let bsize = block_size(&[
        std::mem::size_of::<X::Elem>(),
        std::mem::size_of::<Y::Elem>(),
        std::mem::size_of::<Z::Elem>(),
    ]);
    let (dst, shape, z_strides, z_offset, _) = z.parts_mut();
    trace!("apply: blocked path for shape {:?}, block size {}", shape, bsize);
    let plan = LoopPlan::with_permutation(
        shape,
        [x.strides(), y.strides(), z_strides],
        [x.offset(), y.offset(), z_offset],
        &perm,
    );
    for_each_offset_blocked(&plan, bsize, |[ix, iy, iz]| {
        let v = f(xs.get(ix), ys.get(iy))?;
        dst.set(iz, v);
        Ok(())
    })
}

/// `z[i] = f(x[i], y[i])` traversed in cache-sized tiles.
pub fn binary_blocked<X, Y, Z, F>(
    x: &StridedView<'_, X>,
    y: &StridedView<'_, Y>,
    z: &mut StridedViewMut<'_, Z>,
    mut f: F,
) -> Result<()>
where
    X: Accessor + ?Sized,
    Y: Accessor + ?Sized,
    Z: AccessorMut + ?Sized,
    F: FnMut(X::Elem, Y::Elem) -> Z::Elem,
{
    try_binary_blocked(x, y, z, |a, b| Ok(f(a, b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strided_view::{Order, StridedArray};

    #[test]
    fn test_unary_scale_row_major() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let mut y = [0.0; 4];
        let xv = StridedView::new(&x, &[2, 2], &[2, 1], 0, Order::RowMajor).unwrap();
        let mut yv = StridedViewMut::new(&mut y, &[2, 2], &[2, 1], 0, Order::RowMajor).unwrap();
        unary(&xv, &mut yv, |v| v * 2.0).unwrap();
        assert_eq!(y, [2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn test_unary_visit_order_follows_input_order() {
        let x = StridedArray::from_fn_row_major(&[2, 3], |idx| (idx[0] * 3 + idx[1]) as i32);
        let mut y = StridedArray::<i32>::col_major(&[2, 3]);
        let mut visited = Vec::new();
        unary(&x.view(), &mut y.view_mut(), |v| {
            visited.push(v);
            v
        })
        .unwrap();
        assert_eq!(visited, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(y.data(), &[0, 3, 1, 4, 2, 5]);

        let xc = StridedArray::from_fn_col_major(&[2, 3], |idx| (idx[0] * 3 + idx[1]) as i32);
        let mut visited = Vec::new();
        unary(&xc.view(), &mut y.view_mut(), |v| {
            visited.push(v);
            v
        })
        .unwrap();
        assert_eq!(visited, vec![0, 3, 1, 4, 2, 5]);
    }

    #[test]
    fn test_unary_shape_mismatch() {
        let x = StridedArray::<f64>::row_major(&[2, 3]);
        let mut y = StridedArray::<f64>::row_major(&[3, 2]);
        let err = unary(&x.view(), &mut y.view_mut(), |v| v).unwrap_err();
        assert_eq!(err, StridedError::ShapeMismatch(vec![2, 3], vec![3, 2]));
        let mut z = StridedArray::<f64>::row_major(&[6]);
        let err = unary(&x.view(), &mut z.view_mut(), |v| v).unwrap_err();
        assert_eq!(err, StridedError::RankMismatch(2, 1));
    }

    #[test]
    fn test_try_unary_stops_on_error() {
        #[derive(Debug, PartialEq)]
        enum Fail {
            Strided(StridedError),
            Negative(i32),
        }
        impl From<StridedError> for Fail {
            fn from(e: StridedError) -> Self {
                Fail::Strided(e)
            }
        }

        let x = [1, 2, -3, 4];
        let mut y = [0; 4];
        let xv = StridedView::contiguous(&x, &[4], Order::RowMajor).unwrap();
        let mut yv = StridedViewMut::contiguous(&mut y, &[4], Order::RowMajor).unwrap();
        let res = try_unary(&xv, &mut yv, |v| if v < 0 { Err(Fail::Negative(v)) } else { Ok(v * 10) });
        assert_eq!(res, Err(Fail::Negative(-3)));
        assert_eq!(y, [10, 20, 0, 0]);
    }

    #[test]
    fn test_try_nullary_stops_on_error() {
        let mut y = [0; 5];
        let mut yv = StridedViewMut::contiguous(&mut y, &[5], Order::RowMajor).unwrap();
        let mut n = 0;
        let res = try_nullary(&mut yv, || {
            n += 1;
            if n == 3 {
                Err("exhausted")
            } else {
                Ok(n)
            }
        });
        assert_eq!(res, Err("exhausted"));
        assert_eq!(n, 3);
        assert_eq!(y, [1, 2, 0, 0, 0]);
    }

    #[test]
    fn test_try_unary_inplace_stops_on_error() {
        let mut y = [1, 2, 3, 4, 5, 6];
        let mut yv = StridedViewMut::new(&mut y, &[2, 3], &[3, 1], 0, Order::RowMajor).unwrap();
        let res = try_unary_inplace(&mut yv, |v| if v == 4 { Err(v) } else { Ok(v * 10) });
        assert_eq!(res, Err(4));
        assert_eq!(y, [10, 20, 30, 4, 5, 6]);
    }

    #[test]
    fn test_rank0_unary() {
        let x = [5.0];
        let mut y = [0.0, 0.0];
        let xv = StridedView::new(&x, &[], &[], 0, Order::RowMajor).unwrap();
        let mut yv = StridedViewMut::new(&mut y, &[], &[], 1, Order::RowMajor).unwrap();
        unary(&xv, &mut yv, |v| v + 1.0).unwrap();
        assert_eq!(y, [0.0, 6.0]);
    }

    #[test]
    fn test_empty_view_is_noop() {
        let x: [f64; 0] = [];
        let mut y: [f64; 0] = [];
        let xv = StridedView::new(&x, &[0, 3], &[3, 1], 0, Order::RowMajor).unwrap();
        let mut yv = StridedViewMut::new(&mut y, &[0, 3], &[3, 1], 0, Order::RowMajor).unwrap();
        let mut calls = 0;
        unary(&xv, &mut yv, |v| {
            calls += 1;
            v
        })
        .unwrap();
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_nullary_counts_in_order() {
        let mut y = [0usize; 6];
        let mut yv = StridedViewMut::new(&mut y, &[3, 2], &[1, 3], 0, Order::ColumnMajor).unwrap();
        let mut n = 0;
        nullary(&mut yv, || {
            n += 1;
            n
        });
        assert_eq!(y, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_unary_inplace_negative_strides() {
        let mut y = [1, 2, 3, 4, 5, 6];
        let mut yv = StridedViewMut::new(&mut y, &[2, 3], &[-3, -1], 5, Order::RowMajor).unwrap();
        let mut visited = Vec::new();
        unary_inplace(&mut yv, |v| {
            visited.push(v);
            -v
        });
        assert_eq!(visited, vec![6, 5, 4, 3, 2, 1]);
        assert_eq!(y, [-1, -2, -3, -4, -5, -6]);
    }

    #[test]
    fn test_binary_mixed_orders() {
        let a = StridedArray::from_fn_row_major(&[3, 4], |idx| (idx[0] * 4 + idx[1]) as f64);
        let b = StridedArray::from_fn_col_major(&[3, 4], |idx| (idx[0] * 10 + idx[1]) as f64);
        let mut c = StridedArray::<f64>::row_major(&[3, 4]);
        binary(&a.view(), &b.view(), &mut c.view_mut(), |p, q| p + q).unwrap();
        for i in 0..3 {
            for j in 0..4 {
                assert_eq!(c.get(&[i, j]), (i * 4 + j + i * 10 + j) as f64);
            }
        }
    }

    #[test]
    fn test_binary_rank5_odometer() {
        let shape = [2, 3, 2, 2, 3];
        let a = StridedArray::from_fn_row_major(&shape, |idx| idx.iter().sum::<usize>() as i64);
        let b = StridedArray::from_fn_col_major(&shape, |idx| idx[0] as i64 * 100);
        let mut c = StridedArray::<i64>::col_major(&shape);
        binary(&a.view(), &b.view(), &mut c.view_mut(), |p, q| p + q).unwrap();
        let idx = [1, 2, 0, 1, 2];
        assert_eq!(c.get(&idx), 6 + 100);
    }

    #[test]
    fn test_blocked_matches_canonical() {
        let shape = [13, 7, 10];
        let a = StridedArray::from_fn_row_major(&shape, |idx| (idx[0] * 70 + idx[1] * 10 + idx[2]) as f64);
        let b = StridedArray::from_fn_col_major(&shape, |idx| (idx[2] * 3) as f64);
        let mut c1 = StridedArray::<f64>::col_major(&shape);
        let mut c2 = StridedArray::<f64>::col_major(&shape);
        binary(&a.view(), &b.view(), &mut c1.view_mut(), |p, q| p * 0.5 - q).unwrap();
        binary_blocked(&a.view(), &b.view(), &mut c2.view_mut(), |p, q| p * 0.5 - q).unwrap();
        assert_eq!(c1.data(), c2.data());

        let mut d = StridedArray::<f64>::row_major(&shape);
        let mut calls = 0;
        unary_blocked(&b.view(), &mut d.view_mut(), |v| {
            calls += 1;
            v
        })
        .unwrap();
        assert_eq!(calls, 13 * 7 * 10);
        assert_eq!(d.get(&[4, 2, 9]), 27.0);
    }
}
