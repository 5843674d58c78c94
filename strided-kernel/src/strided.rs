//! One-dimensional strided maps over raw accessors.
//!
//! Two calling conventions are provided for every map:
//!
//! - `f(n, x, stride_x, ..)`: the first logical element sits at
//!   [`stride2offset`]`(n, stride)`, so a negative stride walks the buffer
//!   from its end;
//! - `f_ndarray(n, x, stride_x, offset_x, ..)`: the first logical element
//!   sits at an explicit offset.
//!
//! Arguments are validated once up front; the loops then run unchecked.
//! `n == 0` leaves the output untouched.

use strided_view::{check_strided, stride2offset, Accessor, AccessorMut};

use crate::Result;

/// `y[i] = f(x[i])` for `n` elements.
pub fn unary_1d<'y, X, Y, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
    f: F,
) -> Result<&'y mut Y>
where
    X: Accessor + ?Sized,
    Y: AccessorMut + ?Sized,
    F: FnMut(X::Elem) -> Y::Elem,
{
    let offset_x = stride2offset(n, stride_x);
    let offset_y = stride2offset(n, stride_y);
    unary_1d_ndarray(n, x, stride_x, offset_x, y, stride_y, offset_y, f)
}

/// `y[i] = f(x[i])` for `n` elements with explicit offsets.
#[allow(clippy::too_many_arguments)]
pub fn unary_1d_ndarray<'y, X, Y, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
    mut f: F,
) -> Result<&'y mut Y>
where
    X: Accessor + ?Sized,
    Y: AccessorMut + ?Sized,
    F: FnMut(X::Elem) -> Y::Elem,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    check_strided(y.len(), n, stride_y, offset_y)?;
    let mut ix = offset_x as isize;
    let mut iy = offset_y as isize;
    for _ in 0..n {
        y.set(iy as usize, f(x.get(ix as usize)));
        ix += stride_x;
        iy += stride_y;
    }
    Ok(y)
}

/// `z[i] = f(x[i], y[i])` for `n` elements.
#[allow(clippy::too_many_arguments)]
pub fn binary_1d<'z, X, Y, Z, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    y: &Y,
    stride_y: isize,
    z: &'z mut Z,
    stride_z: isize,
    f: F,
) -> Result<&'z mut Z>
where
    X: Accessor + ?Sized,
    Y: Accessor + ?Sized,
    Z: AccessorMut + ?Sized,
    F: FnMut(X::Elem, Y::Elem) -> Z::Elem,
{
    binary_1d_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
        z,
        stride_z,
        stride2offset(n, stride_z),
        f,
    )
}

/// `z[i] = f(x[i], y[i])` for `n` elements with explicit offsets.
#[allow(clippy::too_many_arguments)]
pub fn binary_1d_ndarray<'z, X, Y, Z, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &Y,
    stride_y: isize,
    offset_y: usize,
    z: &'z mut Z,
    stride_z: isize,
    offset_z: usize,
    mut f: F,
) -> Result<&'z mut Z>
where
    X: Accessor + ?Sized,
    Y: Accessor + ?Sized,
    Z: AccessorMut + ?Sized,
    F: FnMut(X::Elem, Y::Elem) -> Z::Elem,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    check_strided(y.len(), n, stride_y, offset_y)?;
    check_strided(z.len(), n, stride_z, offset_z)?;
    let (mut ix, mut iy, mut iz) = (offset_x as isize, offset_y as isize, offset_z as isize);
    for _ in 0..n {
        let v = f(x.get(ix as usize), y.get(iy as usize));
        z.set(iz as usize, v);
        ix += stride_x;
        iy += stride_y;
        iz += stride_z;
    }
    Ok(z)
}

/// `y[i] = f(x[i])` wherever `mask[i]` is `false`.
///
/// A `true` mask entry marks the element as masked out: its output slot is
/// left as it was.
#[allow(clippy::too_many_arguments)]
pub fn mskunary_1d<'y, X, M, Y, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    mask: &M,
    stride_mask: isize,
    y: &'y mut Y,
    stride_y: isize,
    f: F,
) -> Result<&'y mut Y>
where
    X: Accessor + ?Sized,
    M: Accessor<Elem = bool> + ?Sized,
    Y: AccessorMut + ?Sized,
    F: FnMut(X::Elem) -> Y::Elem,
{
    mskunary_1d_ndarray(
        n,
        x,
        stride_x,
        stride2offset(n, stride_x),
        mask,
        stride_mask,
        stride2offset(n, stride_mask),
        y,
        stride_y,
        stride2offset(n, stride_y),
        f,
    )
}

/// Masked map with explicit offsets. See [`mskunary_1d`].
#[allow(clippy::too_many_arguments)]
pub fn mskunary_1d_ndarray<'y, X, M, Y, F>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    mask: &M,
    stride_mask: isize,
    offset_mask: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
    mut f: F,
) -> Result<&'y mut Y>
where
    X: Accessor + ?Sized,
    M: Accessor<Elem = bool> + ?Sized,
    Y: AccessorMut + ?Sized,
    F: FnMut(X::Elem) -> Y::Elem,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    check_strided(mask.len(), n, stride_mask, offset_mask)?;
    check_strided(y.len(), n, stride_y, offset_y)?;
    let (mut ix, mut im, mut iy) = (offset_x as isize, offset_mask as isize, offset_y as isize);
    for _ in 0..n {
        if !mask.get(im as usize) {
            y.set(iy as usize, f(x.get(ix as usize)));
        }
        ix += stride_x;
        im += stride_mask;
        iy += stride_y;
    }
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strided_view::StridedError;

    #[test]
    fn test_unary_1d_positive_strides() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mut y = [0.0; 3];
        unary_1d(3, &x, 2, &mut y, 1, |v| v * v).unwrap();
        assert_eq!(y, [1.0, 9.0, 25.0]);
    }

    #[test]
    fn test_unary_1d_negative_stride_reverses() {
        let x = [1, 2, 3];
        let mut y = [0; 3];
        unary_1d(3, &x, -1, &mut y, 1, |v| v).unwrap();
        assert_eq!(y, [3, 2, 1]);
    }

    #[test]
    fn test_unary_1d_ndarray_offsets() {
        let x = [0, 1, 2, 3, 4, 5];
        let mut y = [0; 6];
        unary_1d_ndarray(2, &x, 2, 1, &mut y, -1, 5, |v| v + 10).unwrap();
        assert_eq!(y, [0, 0, 0, 0, 13, 11]);
    }

    #[test]
    fn test_unary_1d_zero_is_noop() {
        let x: [i32; 0] = [];
        let mut y = [7];
        let out = unary_1d(0, &x, 1, &mut y, 1, |v| v).unwrap();
        assert_eq!(out, &[7]);
    }

    #[test]
    fn test_unary_1d_rejects_short_buffer() {
        let x = [1, 2, 3];
        let mut y = [0; 3];
        let err = unary_1d(3, &x, 2, &mut y, 1, |v| v).unwrap_err();
        assert_eq!(err, StridedError::OutOfBounds { index: 4, len: 3 });
    }

    #[test]
    fn test_binary_1d() {
        let x = [1, 2, 3];
        let y = [10, 20, 30];
        let mut z = [0; 3];
        binary_1d(3, &x, 1, &y, -1, &mut z, 1, |a, b| a + b).unwrap();
        assert_eq!(z, [31, 22, 13]);
    }

    #[test]
    fn test_mskunary_1d() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let mask = [false, true, false, true];
        let mut y = [-1.0; 4];
        mskunary_1d(4, &x, 1, &mask, 1, &mut y, 1, |v| v * 10.0).unwrap();
        assert_eq!(y, [10.0, -1.0, 30.0, -1.0]);
    }

    #[test]
    fn test_mskunary_1d_ndarray_reversed_mask() {
        let x = [1, 2, 3];
        let mask = vec![true, false, false];
        let mut y = vec![0; 3];
        mskunary_1d_ndarray(3, &x, 1, 0, &mask, -1, 2, &mut y, 1, 0, |v| v).unwrap();
        assert_eq!(y, vec![1, 2, 0]);
    }
}
