//! Strided copy.

use strided_view::{check_strided, stride2offset, Accessor, AccessorMut};

use crate::util::at;
use crate::Result;

/// Copy `n` elements of `x` into `y`.
///
/// # Example
///
/// ```
/// use strided_blas::copy;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let mut y = [0.0; 5];
/// copy(3, &x, 2, &mut y, 1).unwrap();
/// assert_eq!(y, [1.0, 3.0, 5.0, 0.0, 0.0]);
/// ```
pub fn copy<'y, X, Y>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
) -> Result<&'y mut Y>
where
    X: Accessor + ?Sized,
    Y: AccessorMut<Elem = X::Elem> + ?Sized,
{
    copy_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// Copy `n` elements of `x` into `y` with explicit offsets.
pub fn copy_ndarray<'y, X, Y>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
) -> Result<&'y mut Y>
where
    X: Accessor + ?Sized,
    Y: AccessorMut<Elem = X::Elem> + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    check_strided(y.len(), n, stride_y, offset_y)?;
    for i in 0..n {
        y.set(at(offset_y, stride_y, i), x.get(at(offset_x, stride_x, i)));
    }
    Ok(y)
}

/// Copy `n` elements between two strided ranges of the same buffer.
///
/// Elements are moved one at a time in increasing logical order, so
/// overlapping ranges behave as the stride signs dictate: pick signs that
/// walk away from the region still to be read.
pub fn copy_within<'b, B>(
    n: usize,
    buf: &'b mut B,
    stride_x: isize,
    stride_y: isize,
) -> Result<&'b mut B>
where
    B: AccessorMut + ?Sized,
{
    copy_within_ndarray(
        n,
        buf,
        stride_x,
        stride2offset(n, stride_x),
        stride_y,
        stride2offset(n, stride_y),
    )
}

/// [`copy_within`] with explicit offsets.
pub fn copy_within_ndarray<'b, B>(
    n: usize,
    buf: &'b mut B,
    stride_x: isize,
    offset_x: usize,
    stride_y: isize,
    offset_y: usize,
) -> Result<&'b mut B>
where
    B: AccessorMut + ?Sized,
{
    check_strided(buf.len(), n, stride_x, offset_x)?;
    check_strided(buf.len(), n, stride_y, offset_y)?;
    for i in 0..n {
        let v = buf.get(at(offset_x, stride_x, i));
        buf.set(at(offset_y, stride_y, i), v);
    }
    Ok(buf)
}
