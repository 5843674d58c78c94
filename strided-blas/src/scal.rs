//! `x = alpha * x`.

use strided_view::{check_strided, stride2offset, AccessorMut, ScalarBase};

use crate::util::at;
use crate::Result;

/// Scale `n` elements of `x` in place.
pub fn scal<'x, T, X>(n: usize, alpha: T, x: &'x mut X, stride_x: isize) -> Result<&'x mut X>
where
    T: ScalarBase,
    X: AccessorMut<Elem = T> + ?Sized,
{
    scal_ndarray(n, alpha, x, stride_x, stride2offset(n, stride_x))
}

pub fn scal_ndarray<'x, T, X>(
    n: usize,
    alpha: T,
    x: &'x mut X,
    stride_x: isize,
    offset_x: usize,
) -> Result<&'x mut X>
where
    T: ScalarBase,
    X: AccessorMut<Elem = T> + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    for i in 0..n {
        let ix = at(offset_x, stride_x, i);
        let v = alpha * x.get(ix);
        x.set(ix, v);
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scal_strided() {
        let mut x = [1.0, 2.0, 3.0, 4.0];
        scal(2, 10.0, &mut x, 2).unwrap();
        assert_eq!(x, [10.0, 2.0, 30.0, 4.0]);
    }

    #[test]
    fn test_scal_ndarray_negative_stride() {
        let mut x = [1, 2, 3, 4];
        scal_ndarray(2, -1, &mut x, -1, 3).unwrap();
        assert_eq!(x, [1, 2, -3, -4]);
    }

    #[test]
    fn test_scal_bounds() {
        let mut x = [1.0; 3];
        assert!(scal(4, 2.0, &mut x, 1).is_err());
        assert_eq!(x, [1.0; 3]);
    }
}
