//! `y = alpha * x + y`.

use strided_view::{check_strided, stride2offset, Accessor, AccessorMut, ScalarBase};

use crate::util::at;
use crate::Result;

/// Scale `x` by `alpha` and add it into `y`.
///
/// `alpha == 0` leaves `y` untouched.
pub fn axpy<'y, T, X, Y>(
    n: usize,
    alpha: T,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
) -> Result<&'y mut Y>
where
    T: ScalarBase,
    X: Accessor<Elem = T> + ?Sized,
    Y: AccessorMut<Elem = T> + ?Sized,
{
    axpy_ndarray(
        n,
        alpha,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn axpy_ndarray<'y, T, X, Y>(
    n: usize,
    alpha: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
) -> Result<&'y mut Y>
where
    T: ScalarBase,
    X: Accessor<Elem = T> + ?Sized,
    Y: AccessorMut<Elem = T> + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    check_strided(y.len(), n, stride_y, offset_y)?;
    if alpha.is_zero() {
        return Ok(y);
    }
    for i in 0..n {
        let iy = at(offset_y, stride_y, i);
        let v = alpha * x.get(at(offset_x, stride_x, i)) + y.get(iy);
        y.set(iy, v);
    }
    Ok(y)
}
