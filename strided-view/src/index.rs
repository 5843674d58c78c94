//! Conversions between subscripts, view linear indices and buffer indices.
//!
//! Out-of-range indices are handled according to an [`IndexMode`].

use crate::layout::{minmax_view_buffer_index, numel};
use crate::order::Order;
use crate::{Result, StridedError};

/// Policy for indices outside `[0, len)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum IndexMode {
    /// Reject anything outside `[0, len)`.
    #[default]
    Throw,
    /// Count negative indices from the end, then reject if still out of range.
    Normalize,
    /// Wrap modulo `len` (euclidean remainder).
    Wrap,
    /// Clamp into `[0, len - 1]`.
    Clamp,
}

impl IndexMode {
    /// Map `idx` into `[0, len)`, or `None` when the mode rejects it.
    pub fn resolve(self, idx: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let n = isize::try_from(len).ok()?;
        let resolved = match self {
            IndexMode::Throw => idx,
            IndexMode::Normalize if idx < 0 => idx + n,
            IndexMode::Normalize => idx,
            IndexMode::Wrap => idx.rem_euclid(n),
            IndexMode::Clamp => idx.clamp(0, n - 1),
        };
        (0..n).contains(&resolved).then_some(resolved as usize)
    }
}

/// Convert subscripts to a buffer index.
///
/// `modes` is applied per dimension, cycling when shorter than the rank; an
/// empty slice means [`IndexMode::Throw`] everywhere.
pub fn sub2ind(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    subscripts: &[isize],
    modes: &[IndexMode],
) -> Result<usize> {
    if shape.len() != strides.len() {
        return Err(StridedError::StrideLengthMismatch);
    }
    if subscripts.len() != shape.len() {
        return Err(StridedError::RankMismatch(subscripts.len(), shape.len()));
    }
    let mut idx = offset as isize;
    for (dim, ((&size, &stride), &sub)) in shape.iter().zip(strides).zip(subscripts).enumerate() {
        let mode = if modes.is_empty() {
            IndexMode::Throw
        } else {
            modes[dim % modes.len()]
        };
        let s = mode
            .resolve(sub, size)
            .ok_or(StridedError::SubscriptOutOfRange {
                dim,
                index: sub,
                size,
            })?;
        idx += s as isize * stride;
    }
    usize::try_from(idx).map_err(|_| StridedError::OffsetOverflow)
}

/// Convert a view linear index to subscripts, walking dimensions in `order`.
pub fn ind2sub(shape: &[usize], order: Order, idx: isize, mode: IndexMode) -> Result<Vec<usize>> {
    let len = numel(shape);
    let mut rem = mode
        .resolve(idx, len)
        .ok_or(StridedError::IndexOutOfRange { index: idx, len })?;
    let mut out = vec![0usize; shape.len()];
    match order {
        Order::RowMajor => {
            for d in (0..shape.len()).rev() {
                out[d] = rem % shape[d];
                rem /= shape[d];
            }
        }
        Order::ColumnMajor => {
            for d in 0..shape.len() {
                out[d] = rem % shape[d];
                rem /= shape[d];
            }
        }
    }
    Ok(out)
}

/// Convert a view linear index to the buffer index of that element.
pub fn vind2bind(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    order: Order,
    idx: isize,
    mode: IndexMode,
) -> Result<usize> {
    if shape.len() != strides.len() {
        return Err(StridedError::StrideLengthMismatch);
    }
    let subs = ind2sub(shape, order, idx, mode)?;
    let mut ind = offset as isize;
    for (&s, &stride) in subs.iter().zip(strides) {
        ind += s as isize * stride;
    }
    usize::try_from(ind).map_err(|_| StridedError::OffsetOverflow)
}

/// Convert a buffer index to the view linear index of the element stored there.
///
/// The buffer index is first resolved against the element count (the buffer
/// is assumed to hold exactly the view's elements). Indices that no element
/// of the view maps to are rejected.
pub fn bind2vind(
    shape: &[usize],
    strides: &[isize],
    offset: usize,
    order: Order,
    idx: isize,
    mode: IndexMode,
) -> Result<usize> {
    let len = numel(shape);
    let bind = mode
        .resolve(idx, len)
        .ok_or(StridedError::IndexOutOfRange { index: idx, len })?;
    let (min, max) = minmax_view_buffer_index(shape, strides, offset)?;
    let bind = bind as isize;
    if bind < min || bind > max {
        return Err(StridedError::IndexOutOfRange { index: idx, len });
    }

    // Express the index relative to the lowest reachable element, where every
    // dimension contributes a non-negative multiple of |stride|.
    let mut dims: Vec<usize> = (0..shape.len()).collect();
    dims.sort_by_key(|&d| std::cmp::Reverse(strides[d].unsigned_abs()));
    let mut rel = (bind - min) as usize;
    let mut subs = vec![0usize; shape.len()];
    for &d in &dims {
        let step = strides[d].unsigned_abs();
        let t = if step == 0 { 0 } else { (rel / step).min(shape[d] - 1) };
        rel -= t * step;
        subs[d] = if strides[d] < 0 { shape[d] - 1 - t } else { t };
    }
    if rel != 0 {
        return Err(StridedError::IndexOutOfRange { index: idx, len });
    }

    let mut vind = 0usize;
    match order {
        Order::RowMajor => {
            for d in 0..shape.len() {
                vind = vind * shape[d] + subs[d];
            }
        }
        Order::ColumnMajor => {
            for d in (0..shape.len()).rev() {
                vind = vind * shape[d] + subs[d];
            }
        }
    }
    Ok(vind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_mode_resolve() {
        assert_eq!(IndexMode::Throw.resolve(3, 4), Some(3));
        assert_eq!(IndexMode::Throw.resolve(4, 4), None);
        assert_eq!(IndexMode::Normalize.resolve(-1, 4), Some(3));
        assert_eq!(IndexMode::Normalize.resolve(-5, 4), None);
        assert_eq!(IndexMode::Wrap.resolve(-9, 4), Some(3));
        assert_eq!(IndexMode::Wrap.resolve(8, 4), Some(0));
        assert_eq!(IndexMode::Clamp.resolve(-3, 4), Some(0));
        assert_eq!(IndexMode::Clamp.resolve(99, 4), Some(3));
        assert_eq!(IndexMode::Clamp.resolve(0, 0), None);
    }

    #[test]
    fn test_sub2ind_row_and_column_major() {
        assert_eq!(sub2ind(&[3, 3, 3], &[9, 3, 1], 0, &[1, 2, 2], &[]).unwrap(), 17);
        assert_eq!(sub2ind(&[3, 3, 3], &[1, 3, 9], 0, &[1, 2, 2], &[]).unwrap(), 25);
    }

    #[test]
    fn test_sub2ind_modes() {
        let shape = [2, 2];
        let strides = [2, 1];
        assert_eq!(
            sub2ind(&shape, &strides, 0, &[2, 0], &[IndexMode::Throw]),
            Err(StridedError::SubscriptOutOfRange {
                dim: 0,
                index: 2,
                size: 2
            })
        );
        assert_eq!(sub2ind(&shape, &strides, 0, &[2, -1], &[IndexMode::Wrap]).unwrap(), 1);
        assert_eq!(sub2ind(&shape, &strides, 0, &[9, -9], &[IndexMode::Clamp]).unwrap(), 2);
        assert_eq!(
            sub2ind(&shape, &strides, 0, &[-1, 5], &[IndexMode::Normalize, IndexMode::Clamp])
                .unwrap(),
            3
        );
        assert_eq!(
            sub2ind(&shape, &strides, 0, &[0], &[]),
            Err(StridedError::RankMismatch(1, 2))
        );
    }

    #[test]
    fn test_ind2sub() {
        assert_eq!(ind2sub(&[3, 2], Order::RowMajor, 3, IndexMode::Throw).unwrap(), vec![1, 1]);
        assert_eq!(ind2sub(&[3, 2], Order::ColumnMajor, 3, IndexMode::Throw).unwrap(), vec![0, 1]);
        assert_eq!(ind2sub(&[3, 2], Order::RowMajor, -1, IndexMode::Normalize).unwrap(), vec![2, 1]);
        assert!(ind2sub(&[3, 2], Order::RowMajor, 6, IndexMode::Throw).is_err());
        assert!(ind2sub(&[], Order::RowMajor, 0, IndexMode::Throw).unwrap().is_empty());
    }

    #[test]
    fn test_vind2bind_negative_strides() {
        let shape = [2, 2];
        let expected = [(vec![-2, 1], 2, [2, 3, 0, 1]), (vec![-2, -1], 3, [3, 2, 1, 0])];
        for (strides, offset, binds) in expected {
            for (i, &b) in binds.iter().enumerate() {
                let got =
                    vind2bind(&shape, &strides, offset, Order::RowMajor, i as isize, IndexMode::Throw)
                        .unwrap();
                assert_eq!(got, b);
            }
        }
        let got = vind2bind(&shape, &[1, -2], 2, Order::ColumnMajor, 3, IndexMode::Throw).unwrap();
        assert_eq!(got, 1);
    }

    #[test]
    fn test_vind2bind_wrap() {
        let cases = [(1, 1), (4, 0), (-2, 2), (5, 1), (-6, 2), (8, 0), (-9, 3), (-8, 0)];
        for (idx, expected) in cases {
            let got = vind2bind(&[2, 2], &[2, 1], 0, Order::RowMajor, idx, IndexMode::Wrap).unwrap();
            assert_eq!(got, expected, "idx={idx}");
        }
    }

    #[test]
    fn test_bind2vind() {
        let shape = [2, 2];
        for (b, v) in [(0, 2), (1, 3), (2, 0), (3, 1)] {
            let got = bind2vind(&shape, &[-2, 1], 2, Order::RowMajor, b, IndexMode::Throw).unwrap();
            assert_eq!(got, v);
        }
        let wrapped = [(4, 2), (-2, 0), (5, 3), (-9, 1), (-4, 2)];
        for (b, v) in wrapped {
            let got = bind2vind(&shape, &[-2, 1], 2, Order::RowMajor, b, IndexMode::Wrap).unwrap();
            assert_eq!(got, v, "idx={b}");
        }
        assert!(bind2vind(&shape, &[2, 1], 0, Order::RowMajor, 4, IndexMode::Throw).is_err());
    }

    #[test]
    fn test_bind2vind_inverts_vind2bind() {
        let shape = [3, 4, 2];
        let strides = [-1, 6, -3];
        let offset = 2 + 3;
        for order in [Order::RowMajor, Order::ColumnMajor] {
            for v in 0..24 {
                let b = vind2bind(&shape, &strides, offset, order, v, IndexMode::Throw).unwrap();
                let back =
                    bind2vind(&shape, &strides, offset, order, b as isize, IndexMode::Throw).unwrap();
                assert_eq!(back, v as usize);
            }
        }
    }
}
