//! Two-pass mean and variance.

use num_traits::Float;
use strided_view::{check_strided, stride2offset, Accessor};

use crate::sumpw::sumpw_ndarray;
use crate::util::{at, count_as};
use crate::Result;

/// Mean and variance of `n` elements of `x`.
///
/// The mean is a pairwise sum divided by `n`. The variance is a second
/// pass over the deviations `d = x - mean` with Neely's correction:
/// `sum(d^2) / (n - correction) - (sum(d) / n) * (sum(d) / (n - correction))`.
/// `correction = 1` gives the unbiased sample variance.
///
/// - `n == 0` gives `(NaN, NaN)`.
/// - `n - correction <= 0` gives a NaN variance.
/// - A single element (or stride 0) gives variance 0.
///
/// # Example
///
/// ```
/// use strided_blas::meanvarpn;
///
/// let x: [f64; 3] = [1.0, -2.0, 2.0];
/// let (mean, var) = meanvarpn(3, 1.0, &x, 1).unwrap();
/// assert!((mean - 1.0 / 3.0).abs() < 1e-12);
/// assert!((var - 4.333333333333333).abs() < 1e-12);
/// ```
pub fn meanvarpn<T, X>(n: usize, correction: T, x: &X, stride_x: isize) -> Result<(T, T)>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
{
    meanvarpn_ndarray(n, correction, x, stride_x, stride2offset(n, stride_x))
}

pub fn meanvarpn_ndarray<T, X>(
    n: usize,
    correction: T,
    x: &X,
    stride_x: isize,
    offset_x: usize,
) -> Result<(T, T)>
where
    T: Float,
    X: Accessor<Elem = T> + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    if n == 0 {
        return Ok((T::nan(), T::nan()));
    }
    let count = count_as::<T>(n);
    let dof = count - correction;
    if n == 1 || stride_x == 0 {
        let var = if dof <= T::zero() { T::nan() } else { T::zero() };
        return Ok((x.get(offset_x), var));
    }

    let mu = sumpw_ndarray(n, x, stride_x, offset_x)? / count;
    if mu.is_nan() {
        return Ok((T::nan(), T::nan()));
    }
    if dof <= T::zero() {
        return Ok((mu, T::nan()));
    }

    let mut m2 = T::zero();
    let mut m = T::zero();
    for i in 0..n {
        let d = x.get(at(offset_x, stride_x, i)) - mu;
        m2 = m2 + d * d;
        m = m + d;
    }
    Ok((mu, m2 / dof - (m / count) * (m / dof)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_meanvarpn_sample() {
        let x = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let (mean, var) = meanvarpn(8, 0.0, &x, 1).unwrap();
        assert_relative_eq!(mean, 5.0);
        assert_relative_eq!(var, 4.0);
        let (_, var) = meanvarpn(8, 1.0, &x, 1).unwrap();
        assert_relative_eq!(var, 32.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_meanvarpn_strided() {
        let x = [1.0, f64::NAN, 3.0, f64::NAN, 5.0];
        let (mean, var) = meanvarpn_ndarray(3, 1.0, &x, 2, 0).unwrap();
        assert_relative_eq!(mean, 3.0);
        assert_relative_eq!(var, 4.0);
    }

    #[test]
    fn test_meanvarpn_degenerate() {
        let (mean, var) = meanvarpn(0, 1.0, &[1.0f64; 0], 1).unwrap();
        assert!(mean.is_nan() && var.is_nan());

        assert_eq!(meanvarpn(1, 0.0, &[3.0], 1).unwrap(), (3.0, 0.0));
        let (mean, var) = meanvarpn(1, 1.0, &[3.0], 1).unwrap();
        assert_eq!(mean, 3.0);
        assert!(var.is_nan());

        assert_eq!(meanvarpn_ndarray(4, 1.0, &[2.0], 0, 0).unwrap(), (2.0, 0.0));

        let (mean, var) = meanvarpn(2, 2.0, &[1.0, 2.0], 1).unwrap();
        assert_relative_eq!(mean, 1.5);
        assert!(var.is_nan());
    }

    #[test]
    fn test_meanvarpn_nan_input() {
        let (mean, var) = meanvarpn(3, 1.0, &[1.0, f64::NAN, 2.0], 1).unwrap();
        assert!(mean.is_nan() && var.is_nan());
    }

    #[test]
    fn test_meanvarpn_out_of_bounds() {
        assert!(meanvarpn(3, 1.0, &[1.0, 2.0], 1).is_err());
    }
}
