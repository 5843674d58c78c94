//! Cumulative sums, seeded with an initial value.
//!
//! `y[i] = sum + x[0] + ... + x[i]`. Both variants write into a separate
//! output; `x` is never modified.

use num_traits::Float;
use strided_view::{check_strided, stride2offset, Accessor, AccessorMut};

use crate::util::at;
use crate::{Result, PAIRWISE_BLOCKSIZE};

/// Cumulative sum using pairwise partial sums.
///
/// # Example
///
/// ```
/// use strided_blas::cusumpw;
///
/// let x = [1.0, -2.0, 2.0];
/// let mut y = [0.0; 3];
/// cusumpw(3, 10.0, &x, 1, &mut y, 1).unwrap();
/// assert_eq!(y, [11.0, 9.0, 11.0]);
/// ```
pub fn cusumpw<'y, T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
) -> Result<&'y mut Y>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
    Y: AccessorMut<Elem = T> + ?Sized,
{
    cusumpw_ndarray(
        n,
        sum,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn cusumpw_ndarray<'y, T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
) -> Result<&'y mut Y>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
    Y: AccessorMut<Elem = T> + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    check_strided(y.len(), n, stride_y, offset_y)?;
    cusum_pairwise(n, sum, x, stride_x, offset_x, y, stride_y, offset_y);
    Ok(y)
}

/// Blocks of up to `PAIRWISE_BLOCKSIZE` accumulate from zero and add the
/// seed per element; larger ranges seed their second half with the last
/// output of the first.
#[allow(clippy::too_many_arguments)]
fn cusum_pairwise<T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &mut Y,
    stride_y: isize,
    offset_y: usize,
) where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
    Y: AccessorMut<Elem = T> + ?Sized,
{
    if n == 0 {
        return;
    }
    if n <= PAIRWISE_BLOCKSIZE {
        let mut s = T::zero();
        for i in 0..n {
            s = s + x.get(at(offset_x, stride_x, i));
            y.set(at(offset_y, stride_y, i), sum + s);
        }
        return;
    }
    let half = n / 2;
    cusum_pairwise(half, sum, x, stride_x, offset_x, y, stride_y, offset_y);
    let seed = y.get(at(offset_y, stride_y, half - 1));
    cusum_pairwise(
        n - half,
        seed,
        x,
        stride_x,
        at(offset_x, stride_x, half),
        y,
        stride_y,
        at(offset_y, stride_y, half),
    );
}

/// Cumulative sum with Kahan-Babuska-Neumaier compensation.
pub fn cusumkbn<'y, T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    y: &'y mut Y,
    stride_y: isize,
) -> Result<&'y mut Y>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
    Y: AccessorMut<Elem = T> + ?Sized,
{
    cusumkbn_ndarray(
        n,
        sum,
        x,
        stride_x,
        stride2offset(n, stride_x),
        y,
        stride_y,
        stride2offset(n, stride_y),
    )
}

#[allow(clippy::too_many_arguments)]
pub fn cusumkbn_ndarray<'y, T, X, Y>(
    n: usize,
    sum: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
    y: &'y mut Y,
    stride_y: isize,
    offset_y: usize,
) -> Result<&'y mut Y>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
    Y: AccessorMut<Elem = T> + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    check_strided(y.len(), n, stride_y, offset_y)?;
    let mut s = sum;
    let mut c = T::zero();
    for i in 0..n {
        let v = x.get(at(offset_x, stride_x, i));
        let t = s + v;
        if s.abs() >= v.abs() {
            c = c + ((s - t) + v);
        } else {
            c = c + ((v - t) + s);
        }
        s = t;
        y.set(at(offset_y, stride_y, i), s + c);
    }
    Ok(y)
}
