//! Pairwise summation.
//!
//! Blocks of up to [`PAIRWISE_BLOCKSIZE`](crate::PAIRWISE_BLOCKSIZE)
//! elements are summed with eight interleaved accumulators; longer inputs
//! are split in half (rounded down to a multiple of 8) and the halves are
//! summed recursively. Rounding error grows as `O(log n)` instead of
//! `O(n)`.

use num_traits::Float;
use strided_view::{check_strided, stride2offset, Accessor};

use crate::util::{at, count_as};
use crate::{Result, PAIRWISE_BLOCKSIZE};

/// Sum of `n` elements of `x`.
///
/// # Example
///
/// ```
/// use strided_blas::sumpw;
///
/// let x = [1.0, -2.0, 2.0];
/// assert_eq!(sumpw(3, &x, 1).unwrap(), 1.0);
/// ```
pub fn sumpw<T, X>(n: usize, x: &X, stride_x: isize) -> Result<T>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
{
    sumpw_ndarray(n, x, stride_x, stride2offset(n, stride_x))
}

pub fn sumpw_ndarray<T, X>(n: usize, x: &X, stride_x: isize, offset_x: usize) -> Result<T>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    Ok(pairwise(n, x, stride_x, offset_x))
}

/// Sum of the non-NaN elements of `x`.
pub fn nansumpw<T, X>(n: usize, x: &X, stride_x: isize) -> Result<T>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
{
    nansumpw_ndarray(n, x, stride_x, stride2offset(n, stride_x))
}

pub fn nansumpw_ndarray<T, X>(n: usize, x: &X, stride_x: isize, offset_x: usize) -> Result<T>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
{
    nannsumpw_ndarray(n, x, stride_x, offset_x).map(|(sum, _)| sum)
}

/// Sum of the non-NaN elements of `x` together with how many there were.
pub fn nannsumpw<T, X>(n: usize, x: &X, stride_x: isize) -> Result<(T, usize)>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
{
    nannsumpw_ndarray(n, x, stride_x, stride2offset(n, stride_x))
}

pub fn nannsumpw_ndarray<T, X>(
    n: usize,
    x: &X,
    stride_x: isize,
    offset_x: usize,
) -> Result<(T, usize)>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    Ok(nan_pairwise(n, x, stride_x, offset_x))
}

fn pairwise<T, X>(n: usize, x: &X, stride: isize, offset: usize) -> T
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
{
    if n == 0 {
        return T::zero();
    }
    if n == 1 || stride == 0 {
        return count_as::<T>(n) * x.get(offset);
    }
    if n < 8 {
        let mut sum = T::zero();
        for i in 0..n {
            sum = sum + x.get(at(offset, stride, i));
        }
        return sum;
    }
    if n <= PAIRWISE_BLOCKSIZE {
        let mut acc = [T::zero(); 8];
        let blocked = n - n % 8;
        let mut i = 0;
        while i < blocked {
            for (k, a) in acc.iter_mut().enumerate() {
                *a = *a + x.get(at(offset, stride, i + k));
            }
            i += 8;
        }
        let mut sum = combine(&acc);
        for j in blocked..n {
            sum = sum + x.get(at(offset, stride, j));
        }
        return sum;
    }
    let half = split(n);
    pairwise(half, x, stride, offset) + pairwise(n - half, x, stride, at(offset, stride, half))
}

fn nan_pairwise<T, X>(n: usize, x: &X, stride: isize, offset: usize) -> (T, usize)
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
{
    if n == 0 {
        return (T::zero(), 0);
    }
    if n == 1 || stride == 0 {
        let v = x.get(offset);
        if v.is_nan() {
            return (T::zero(), 0);
        }
        return (count_as::<T>(n) * v, n);
    }
    if n < 8 {
        let mut sum = T::zero();
        let mut count = 0;
        for i in 0..n {
            let v = x.get(at(offset, stride, i));
            if !v.is_nan() {
                sum = sum + v;
                count += 1;
            }
        }
        return (sum, count);
    }
    if n <= PAIRWISE_BLOCKSIZE {
        let mut acc = [T::zero(); 8];
        let mut count = 0;
        let blocked = n - n % 8;
        let mut i = 0;
        while i < blocked {
            for (k, a) in acc.iter_mut().enumerate() {
                let v = x.get(at(offset, stride, i + k));
                if !v.is_nan() {
                    *a = *a + v;
                    count += 1;
                }
            }
            i += 8;
        }
        let mut sum = combine(&acc);
        for j in blocked..n {
            let v = x.get(at(offset, stride, j));
            if !v.is_nan() {
                sum = sum + v;
                count += 1;
            }
        }
        return (sum, count);
    }
    let half = split(n);
    let (s1, c1) = nan_pairwise(half, x, stride, offset);
    let (s2, c2) = nan_pairwise(n - half, x, stride, at(offset, stride, half));
    (s1 + s2, c1 + c2)
}

#[inline]
fn combine<T: Float>(acc: &[T; 8]) -> T {
    ((acc[0] + acc[1]) + (acc[2] + acc[3])) + ((acc[4] + acc[5]) + (acc[6] + acc[7]))
}

/// Length of the first half when bisecting a block: `n / 2` rounded down
/// to a multiple of 8.
#[inline]
fn split(n: usize) -> usize {
    let half = n / 2;
    half - half % 8
}
