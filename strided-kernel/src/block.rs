//! Tiled traversal for cache-driven iteration.
//!
//! Loop levels are first interchanged by ascending |stride| of the leading
//! operand, then every level is cut into tiles of `bsize` elements. Tiles are
//! walked from the last one downward, the innermost level's tiles fastest,
//! and each tile runs through the ordinary loop nest.

use smallvec::{smallvec, SmallVec};

use crate::kernel::{for_each_offset, LoopPlan};
use crate::{BLOCK_SIZE_IN_BYTES, BLOCK_SIZE_IN_ELEMENTS};

/// Tile edge length, in elements, for operands of the given element sizes.
pub(crate) fn block_size(elem_sizes: &[usize]) -> usize {
    match elem_sizes.iter().copied().max() {
        None | Some(0) => BLOCK_SIZE_IN_ELEMENTS,
        Some(widest) => (BLOCK_SIZE_IN_BYTES / widest).max(1),
    }
}

/// `(start, len)` tiles covering `0..extent`, last tile first.
fn tiles(extent: usize, bsize: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::with_capacity(extent.div_ceil(bsize));
    let mut j = extent;
    while j > 0 {
        let len = j.min(bsize);
        j -= len;
        out.push((j, len));
    }
    out
}

pub(crate) fn for_each_offset_blocked<const N: usize, E, F>(
    plan: &LoopPlan<N>,
    bsize: usize,
    mut f: F,
) -> Result<(), E>
where
    F: FnMut([usize; N]) -> Result<(), E>,
{
    let rank = plan.rank();
    if plan.is_empty() || rank == 0 {
        return for_each_offset(plan, f);
    }
    let bsize = bsize.max(1);
    let tiles: SmallVec<[Vec<(usize, usize)>; 8]> =
        plan.shape().iter().map(|&s| tiles(s, bsize)).collect();
    let strides = plan.strides();
    let origin = plan.start().map(|s| s as isize);
    let mut t: SmallVec<[usize; 8]> = smallvec![0; rank];

    loop {
        let mut start = origin;
        let mut shape = SmallVec::with_capacity(rank);
        for level in 0..rank {
            let (j, len) = tiles[level][t[level]];
            for k in 0..N {
                start[k] += j as isize * strides[level][k];
            }
            shape.push(len);
        }
        let tile = LoopPlan::from_levels(
            shape,
            strides.iter().copied().collect(),
            start.map(|s| s as usize),
        );
        for_each_offset(&tile, &mut f)?;

        let mut level = 0;
        loop {
            t[level] += 1;
            if t[level] < tiles[level].len() {
                break;
            }
            t[level] = 0;
            level += 1;
            if level == rank {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strided_view::{Order, StridedError};

    #[test]
    fn test_block_size() {
        assert_eq!(block_size(&[8]), 8);
        assert_eq!(block_size(&[4, 8]), 8);
        assert_eq!(block_size(&[1]), 64);
        assert_eq!(block_size(&[0, 0]), BLOCK_SIZE_IN_ELEMENTS);
        assert_eq!(block_size(&[128]), 1);
    }

    #[test]
    fn test_tiles_walk_downward() {
        assert_eq!(tiles(10, 8), vec![(2, 8), (0, 2)]);
        assert_eq!(tiles(16, 8), vec![(8, 8), (0, 8)]);
        assert_eq!(tiles(3, 8), vec![(0, 3)]);
        assert!(tiles(0, 8).is_empty());
    }

    #[test]
    fn test_blocked_visits_every_element_once() {
        let shape = [11usize, 5, 9];
        let strides = strided_view::shape2strides(&shape, Order::RowMajor);
        let plan = LoopPlan::new(&shape, [strides.as_slice()], [0], Order::RowMajor);
        let mut seen = vec![0u32; 11 * 5 * 9];
        for_each_offset_blocked(&plan, 4, |[i]| {
            seen[i] += 1;
            Ok::<_, StridedError>(())
        })
        .unwrap();
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_blocked_tile_order() {
        let strides: &[isize] = &[1];
        let plan = LoopPlan::new(&[5], [strides], [0], Order::RowMajor);
        let mut order = Vec::new();
        for_each_offset_blocked(&plan, 2, |[i]| {
            order.push(i);
            Ok::<_, StridedError>(())
        })
        .unwrap();
        assert_eq!(order, vec![3, 4, 1, 2, 0]);
    }
}
