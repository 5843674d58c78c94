//! Stride, offset and contiguity arithmetic for strided descriptors.
//!
//! None of these functions touch element data; they only reason about
//! (shape, strides, offset) triples.

use crate::order::Order;
use crate::{Result, StridedError};

/// Number of elements described by `shape` (1 for a rank-0 shape).
#[inline]
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Contiguous strides for `shape` in the given `order`.
pub fn shape2strides(shape: &[usize], order: Order) -> Vec<isize> {
    let rank = shape.len();
    let mut strides = vec![1isize; rank];
    match order {
        Order::RowMajor => {
            for i in (0..rank.saturating_sub(1)).rev() {
                strides[i] = strides[i + 1] * shape[i + 1] as isize;
            }
        }
        Order::ColumnMajor => {
            for i in 1..rank {
                strides[i] = strides[i - 1] * shape[i - 1] as isize;
            }
        }
    }
    strides
}

/// Buffer index of element `(0, ..., 0)` for a view whose lowest reachable
/// element sits at buffer index 0.
pub fn strides2offset(shape: &[usize], strides: &[isize]) -> usize {
    let mut offset = 0usize;
    for (&dim, &stride) in shape.iter().zip(strides) {
        if stride < 0 && dim > 0 {
            offset += (dim - 1) * stride.unsigned_abs();
        }
    }
    offset
}

/// Starting buffer index for a 1-d strided access of `n` elements.
///
/// Negative strides walk memory backwards, so logical element 0 lives at
/// `(1 - n) * stride`; non-negative strides start at 0.
#[inline]
pub fn stride2offset(n: usize, stride: isize) -> usize {
    if stride < 0 && n > 0 {
        (n - 1) * stride.unsigned_abs()
    } else {
        0
    }
}

/// Infer the layout order from stride magnitudes.
///
/// Non-increasing magnitudes read as row-major, non-decreasing as
/// column-major. When both hold (rank <= 1, or equal magnitudes) row-major
/// wins. Returns `None` for mixed layouts.
pub fn strides2order(strides: &[isize]) -> Option<Order> {
    let mut row = true;
    let mut col = true;
    for w in strides.windows(2) {
        let (a, b) = (w[0].unsigned_abs(), w[1].unsigned_abs());
        if a < b {
            row = false;
        }
        if a > b {
            col = false;
        }
    }
    if row {
        Some(Order::RowMajor)
    } else if col {
        Some(Order::ColumnMajor)
    } else {
        None
    }
}

/// Direction in which a view walks its buffer.
///
/// `1` when no stride is negative, `-1` when every stride is negative and
/// `0` for mixed signs.
pub fn iteration_order(strides: &[isize]) -> i8 {
    let negative = strides.iter().filter(|&&s| s < 0).count();
    if negative == 0 {
        1
    } else if negative == strides.len() {
        -1
    } else {
        0
    }
}

/// Lowest and highest buffer index reachable from a view.
///
/// Empty views report `(offset, offset)`.
pub fn minmax_view_buffer_index(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
) -> Result<(isize, isize)> {
    if shape.len() != strides.len() {
        return Err(StridedError::StrideLengthMismatch);
    }
    let offset = isize::try_from(offset).map_err(|_| StridedError::OffsetOverflow)?;
    let mut min = offset;
    let mut max = offset;
    if shape.iter().any(|&d| d == 0) {
        return Ok((min, max));
    }
    for (&dim, &stride) in shape.iter().zip(strides) {
        if dim > 1 {
            let end = isize::try_from(dim - 1)
                .ok()
                .and_then(|d| stride.checked_mul(d))
                .ok_or(StridedError::OffsetOverflow)?;
            if end >= 0 {
                max = max.checked_add(end).ok_or(StridedError::OffsetOverflow)?;
            } else {
                min = min.checked_add(end).ok_or(StridedError::OffsetOverflow)?;
            }
        }
    }
    Ok((min, max))
}

/// Check that every element of a view lands inside a buffer of `len` elements.
pub fn validate_bounds(len: usize, shape: &[usize], strides: &[isize], offset: usize) -> Result<()> {
    let (min, max) = minmax_view_buffer_index(shape, strides, offset)?;
    if shape.iter().any(|&d| d == 0) {
        return Ok(());
    }
    if min < 0 {
        return Err(StridedError::OutOfBounds { index: min, len });
    }
    if max as usize >= len {
        return Err(StridedError::OutOfBounds { index: max, len });
    }
    Ok(())
}

/// Whether a view occupies a single gap-free buffer segment walked in one
/// direction.
pub fn is_contiguous(shape: &[usize], strides: &[isize], offset: usize) -> bool {
    if iteration_order(strides) == 0 {
        return false;
    }
    match minmax_view_buffer_index(shape, strides, offset) {
        Ok((min, max)) => {
            let n = numel(shape);
            n > 0 && (max - min) as usize + 1 == n
        }
        Err(_) => false,
    }
}

/// Check a 1-d strided access of `n` elements starting at `offset`.
pub fn check_strided(len: usize, n: usize, stride: isize, offset: usize) -> Result<()> {
    if n == 0 {
        return Ok(());
    }
    validate_bounds(len, &[n], &[stride], offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape2strides() {
        assert_eq!(shape2strides(&[2, 3, 4], Order::RowMajor), vec![12, 4, 1]);
        assert_eq!(shape2strides(&[2, 3, 4], Order::ColumnMajor), vec![1, 2, 6]);
        assert!(shape2strides(&[], Order::RowMajor).is_empty());
    }

    #[test]
    fn test_stride2offset() {
        assert_eq!(stride2offset(3, 2), 0);
        assert_eq!(stride2offset(3, -2), 4);
        assert_eq!(stride2offset(0, -2), 0);
        assert_eq!(stride2offset(1, -5), 0);
    }

    #[test]
    fn test_strides2offset() {
        assert_eq!(strides2offset(&[2, 2], &[-2, 1]), 2);
        assert_eq!(strides2offset(&[2, 2], &[-2, -1]), 3);
        assert_eq!(strides2offset(&[3, 4], &[4, 1]), 0);
    }

    #[test]
    fn test_strides2order() {
        assert_eq!(strides2order(&[6, 2, 1]), Some(Order::RowMajor));
        assert_eq!(strides2order(&[1, -2, 6]), Some(Order::ColumnMajor));
        assert_eq!(strides2order(&[2, 6, 1]), None);
    }

    #[test]
    fn test_iteration_order() {
        assert_eq!(iteration_order(&[2, 1]), 1);
        assert_eq!(iteration_order(&[-2, -1]), -1);
        assert_eq!(iteration_order(&[-2, 1]), 0);
        assert_eq!(iteration_order(&[0, 1]), 1);
    }

    #[test]
    fn test_minmax_view_buffer_index() {
        assert_eq!(minmax_view_buffer_index(&[2, 3], &[3, 1], 0).unwrap(), (0, 5));
        assert_eq!(minmax_view_buffer_index(&[2, 3], &[-3, 1], 3).unwrap(), (0, 5));
        assert_eq!(minmax_view_buffer_index(&[0, 3], &[3, 1], 7).unwrap(), (7, 7));
    }

    #[test]
    fn test_validate_bounds() {
        assert!(validate_bounds(6, &[2, 3], &[3, 1], 0).is_ok());
        assert!(validate_bounds(5, &[2, 3], &[3, 1], 0).is_err());
        assert!(validate_bounds(0, &[0, 3], &[3, 1], 0).is_ok());
        assert_eq!(
            validate_bounds(6, &[2, 3], &[-3, 1], 0),
            Err(StridedError::OutOfBounds { index: -3, len: 6 })
        );
        assert_eq!(
            validate_bounds(6, &[2], &[1, 1], 0),
            Err(StridedError::StrideLengthMismatch)
        );
    }

    #[test]
    fn test_is_contiguous() {
        assert!(is_contiguous(&[2, 3], &[3, 1], 0));
        assert!(is_contiguous(&[2, 3], &[-3, -1], 5));
        assert!(!is_contiguous(&[2, 3], &[6, 2], 0));
        assert!(!is_contiguous(&[2, 3], &[-3, 1], 3));
    }

    #[test]
    fn test_check_strided() {
        assert!(check_strided(5, 3, 2, 0).is_ok());
        assert!(check_strided(5, 3, -2, 4).is_ok());
        assert!(check_strided(5, 4, 2, 0).is_err());
        assert!(check_strided(0, 0, 7, 99).is_ok());
        assert!(check_strided(1, 10, 0, 0).is_ok());
    }
}
