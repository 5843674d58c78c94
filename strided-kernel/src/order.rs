//! Loop nesting order and per-level pointer increments.
//!
//! Loops are described in *level* space: level 0 is the innermost
//! (fastest-varying) loop. For row-major views the last dimension sits at
//! level 0; for column-major views the first one does.
//!
//! For level `L` with extent `S_L = shape[perm(L)]`:
//!
//! ```text
//! delta_0 = strides[perm(0)]
//! delta_L = strides[perm(L)] - S_{L-1} * strides[perm(L-1)]
//! ```
//!
//! `delta_L` is the net movement applied after a full pass of level `L-1`,
//! undoing what that pass accumulated and stepping once along level `L`.

use smallvec::SmallVec;
use strided_view::Order;

/// Dimension index for each loop level, innermost first.
pub fn loop_permutation(rank: usize, order: Order) -> SmallVec<[usize; 8]> {
    match order {
        Order::RowMajor => (0..rank).rev().collect(),
        Order::ColumnMajor => (0..rank).collect(),
    }
}

/// Per-level pointer increments for strides already permuted into level order.
pub(crate) fn level_deltas(loop_shape: &[usize], loop_strides: &[isize]) -> SmallVec<[isize; 8]> {
    let mut deltas = SmallVec::with_capacity(loop_shape.len());
    for (level, &stride) in loop_strides.iter().enumerate() {
        if level == 0 {
            deltas.push(stride);
        } else {
            let inner = loop_shape[level - 1] as isize * loop_strides[level - 1];
            deltas.push(stride - inner);
        }
    }
    deltas
}

/// Resolve `(loop_shape, deltas)` for one operand.
///
/// `shape` and `strides` must have the same length.
pub fn resolve_loops(shape: &[usize], strides: &[isize], order: Order) -> (Vec<usize>, Vec<isize>) {
    debug_assert_eq!(shape.len(), strides.len());
    let perm = loop_permutation(shape.len(), order);
    let loop_shape: Vec<usize> = perm.iter().map(|&d| shape[d]).collect();
    let loop_strides: SmallVec<[isize; 8]> = perm.iter().map(|&d| strides[d]).collect();
    let deltas = level_deltas(&loop_shape, &loop_strides).into_vec();
    (loop_shape, deltas)
}

/// Loop interchange for cache-driven traversal: dimensions sorted by
/// ascending |stride|, innermost first.
///
/// Stable insertion sort, so dimensions with equal stride magnitude keep
/// their relative position.
pub(crate) fn interchange_order(strides: &[isize]) -> SmallVec<[usize; 8]> {
    let mut perm: SmallVec<[usize; 8]> = (0..strides.len()).collect();
    for i in 1..perm.len() {
        let d = perm[i];
        let key = strides[d].unsigned_abs();
        let mut j = i;
        while j > 0 && strides[perm[j - 1]].unsigned_abs() > key {
            perm[j] = perm[j - 1];
            j -= 1;
        }
        perm[j] = d;
    }
    perm
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_permutation() {
        assert_eq!(loop_permutation(3, Order::RowMajor).as_slice(), &[2, 1, 0]);
        assert_eq!(loop_permutation(3, Order::ColumnMajor).as_slice(), &[0, 1, 2]);
        assert!(loop_permutation(0, Order::RowMajor).is_empty());
    }

    #[test]
    fn test_resolve_loops_row_major() {
        // 2x3 row-major, contiguous
        let (shape, deltas) = resolve_loops(&[2, 3], &[3, 1], Order::RowMajor);
        assert_eq!(shape, vec![3, 2]);
        assert_eq!(deltas, vec![1, 0]);
    }

    #[test]
    fn test_resolve_loops_column_major() {
        let (shape, deltas) = resolve_loops(&[2, 3], &[1, 2], Order::ColumnMajor);
        assert_eq!(shape, vec![2, 3]);
        assert_eq!(deltas, vec![1, 0]);
    }

    #[test]
    fn test_resolve_loops_transposed_operand() {
        // Column-major strides walked in row-major order.
        let (shape, deltas) = resolve_loops(&[2, 3], &[1, 2], Order::RowMajor);
        assert_eq!(shape, vec![3, 2]);
        assert_eq!(deltas, vec![2, 1 - 3 * 2]);
    }

    #[test]
    fn test_resolve_loops_negative_strides() {
        let (shape, deltas) = resolve_loops(&[2, 2, 2], &[-4, 2, -1], Order::RowMajor);
        assert_eq!(shape, vec![2, 2, 2]);
        assert_eq!(deltas, vec![-1, 2 + 2, -4 - 4]);
    }

    #[test]
    fn test_resolve_loops_rank_zero() {
        let (shape, deltas) = resolve_loops(&[], &[], Order::RowMajor);
        assert!(shape.is_empty());
        assert!(deltas.is_empty());
    }

    #[test]
    fn test_interchange_order_stable() {
        assert_eq!(interchange_order(&[12, 4, 1]).as_slice(), &[2, 1, 0]);
        assert_eq!(interchange_order(&[1, -6, 2]).as_slice(), &[0, 2, 1]);
        assert_eq!(interchange_order(&[3, -3, 1]).as_slice(), &[2, 0, 1]);
    }
}
