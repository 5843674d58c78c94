//! In-place heapsort of a single strided array.

use num_traits::Float;
use strided_view::{check_strided, stride2offset, Accessor, AccessorMut};

use crate::sort2hp::heapsort2;
use crate::Result;

/// Companion that absorbs every write, so the two-array core can sort `x`
/// on its own.
struct Discard;

impl Accessor for Discard {
    type Elem = ();

    #[inline(always)]
    fn get(&self, _index: usize) {}

    #[inline(always)]
    fn len(&self) -> usize {
        usize::MAX
    }
}

impl AccessorMut for Discard {
    #[inline(always)]
    fn set(&mut self, _index: usize, _value: ()) {}
}

/// Sort `x` in increasing (`order > 0`) or decreasing (`order < 0`) order.
///
/// Same NaN and signed-zero rules as [`sort2hp`](crate::sort2hp).
pub fn sorthp<'x, T, X>(n: usize, order: T, x: &'x mut X, stride_x: isize) -> Result<&'x mut X>
where
    T: Float,
    X: AccessorMut<Elem = T> + ?Sized,
{
    sorthp_ndarray(n, order, x, stride_x, stride2offset(n, stride_x))
}

pub fn sorthp_ndarray<'x, T, X>(
    n: usize,
    order: T,
    x: &'x mut X,
    stride_x: isize,
    offset_x: usize,
) -> Result<&'x mut X>
where
    T: Float,
    X: AccessorMut<Elem = T> + ?Sized,
{
    check_strided(x.len(), n, stride_x, offset_x)?;
    heapsort2(n, order, x, stride_x, offset_x, &mut Discard, 0, 0);
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorthp_ascending() {
        let mut x = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        sorthp(8, 1.0, &mut x, 1).unwrap();
        assert_eq!(x, [1.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 9.0]);
    }

    #[test]
    fn test_sorthp_descending_strided() {
        let mut x = [1.0f32, -1.0, 3.0, -1.0, 2.0];
        sorthp(3, -1.0, &mut x, 2).unwrap();
        assert_eq!(x, [3.0, -1.0, 2.0, -1.0, 1.0]);
    }

    #[test]
    fn test_sorthp_negative_stride() {
        // Logical order runs from the end of the buffer, so ascending
        // logical order is descending in memory.
        let mut x = [2.0, 3.0, 1.0];
        sorthp(3, 1.0, &mut x, -1).unwrap();
        assert_eq!(x, [3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_sorthp_nan_last() {
        let mut x = [f64::NAN, 1.0, -0.0, 0.0];
        sorthp_ndarray(4, 1.0, &mut x, 1, 0).unwrap();
        assert_eq!(&x[..3], &[-0.0, 0.0, 1.0]);
        assert!(x[0].is_sign_negative());
        assert!(x[1].is_sign_positive());
        assert!(x[3].is_nan());
    }

    #[test]
    fn test_sorthp_out_of_bounds() {
        let mut x = [1.0, 2.0];
        assert!(sorthp(2, 1.0, &mut x, 2).is_err());
    }
}
