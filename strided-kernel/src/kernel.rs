//! Iteration engine: walks N operands in lockstep over a shared loop nest.
//!
//! Every operand is reduced to a starting buffer index and one delta per
//! loop level. The loop bodies only ever add deltas; multi-indices are never
//! recomputed. Ranks 0 through [`MAX_UNROLLED_RANK`](crate::MAX_UNROLLED_RANK)
//! have hand-written nests, anything deeper runs an odometer.

use log::trace;
use smallvec::{smallvec, SmallVec};
use strided_view::{Order, StridedError};

use crate::order::{level_deltas, loop_permutation};
use crate::Result;

/// Operand layout in level space (level 0 innermost).
#[derive(Debug, Clone)]
pub(crate) struct LoopPlan<const N: usize> {
    shape: SmallVec<[usize; 8]>,
    strides: SmallVec<[[isize; N]; 8]>,
    start: [usize; N],
}

impl<const N: usize> LoopPlan<N> {
    /// Permute `shape` and every operand's strides into the nesting order
    /// implied by `order`.
    pub(crate) fn new(
        shape: &[usize],
        strides: [&[isize]; N],
        start: [usize; N],
        order: Order,
    ) -> Self {
        let perm = loop_permutation(shape.len(), order);
        Self::with_permutation(shape, strides, start, &perm)
    }

    /// Same as [`LoopPlan::new`] with an explicit level-to-dimension map.
    pub(crate) fn with_permutation(
        shape: &[usize],
        strides: [&[isize]; N],
        start: [usize; N],
        perm: &[usize],
    ) -> Self {
        for s in &strides {
            debug_assert_eq!(s.len(), shape.len());
        }
        let loop_shape = perm.iter().map(|&d| shape[d]).collect();
        let loop_strides = perm
            .iter()
            .map(|&d| std::array::from_fn(|k| strides[k][d]))
            .collect();
        Self {
            shape: loop_shape,
            strides: loop_strides,
            start,
        }
    }

    /// Build a plan whose levels are already in nesting order.
    pub(crate) fn from_levels(
        shape: SmallVec<[usize; 8]>,
        strides: SmallVec<[[isize; N]; 8]>,
        start: [usize; N],
    ) -> Self {
        debug_assert_eq!(shape.len(), strides.len());
        Self {
            shape,
            strides,
            start,
        }
    }

    #[inline]
    pub(crate) fn rank(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub(crate) fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub(crate) fn strides(&self) -> &[[isize; N]] {
        &self.strides
    }

    #[inline]
    pub(crate) fn start(&self) -> [usize; N] {
        self.start
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.shape.iter().any(|&s| s == 0)
    }

    /// Drop singleton levels. They contribute nothing to any buffer index.
    pub(crate) fn squeeze(&mut self) {
        let mut level = 0;
        while level < self.shape.len() {
            if self.shape[level] == 1 {
                self.shape.remove(level);
                self.strides.remove(level);
            } else {
                level += 1;
            }
        }
    }

    /// Merge level `L` into level `L-1` wherever every operand is contiguous
    /// across the pair, i.e. `stride_L == S_{L-1} * stride_{L-1}`.
    ///
    /// Merging keeps the visitation order intact: the fused level enumerates
    /// exactly the same buffer indices in the same sequence.
    pub(crate) fn fuse(&mut self) {
        let mut level = 1;
        while level < self.shape.len() {
            let inner = self.shape[level - 1] as isize;
            let mergeable =
                (0..N).all(|k| self.strides[level][k] == inner * self.strides[level - 1][k]);
            if mergeable {
                self.shape[level - 1] *= self.shape[level];
                self.shape.remove(level);
                self.strides.remove(level);
            } else {
                level += 1;
            }
        }
    }

    /// Per-level deltas, level-major.
    fn deltas(&self) -> SmallVec<[[isize; N]; 8]> {
        let mut out: SmallVec<[[isize; N]; 8]> = smallvec![[0isize; N]; self.rank()];
        for k in 0..N {
            let strides: SmallVec<[isize; 8]> = self.strides.iter().map(|s| s[k]).collect();
            for (level, d) in level_deltas(&self.shape, &strides).into_iter().enumerate() {
                out[level][k] = d;
            }
        }
        out
    }
}

pub(crate) fn ensure_same_shape(a: &[usize], b: &[usize]) -> Result<()> {
    if a.len() != b.len() {
        return Err(StridedError::RankMismatch(a.len(), b.len()));
    }
    if a != b {
        return Err(StridedError::ShapeMismatch(a.to_vec(), b.to_vec()));
    }
    Ok(())
}

// ============================================================================
// Dispatch
// ============================================================================

/// Walk every element of `shape` in the canonical order of `order`, calling
/// `f` with the buffer index of each operand.
///
/// Shapes must already be validated; this only normalizes the loop nest
/// (squeeze, fuse) before running it.
pub(crate) fn drive<const N: usize, E, F>(
    shape: &[usize],
    strides: [&[isize]; N],
    start: [usize; N],
    order: Order,
    f: F,
) -> std::result::Result<(), E>
where
    F: FnMut([usize; N]) -> std::result::Result<(), E>,
{
    let mut plan = LoopPlan::new(shape, strides, start, order);
    if plan.is_empty() {
        trace!("apply: empty view {:?}, nothing to do", shape);
        return Ok(());
    }
    plan.squeeze();
    plan.fuse();
    match plan.rank() {
        0 => trace!("apply: zero-d path for shape {:?}", shape),
        1 if shape.len() > 1 => trace!("apply: flattened 1-d path for shape {:?}", shape),
        1 => trace!("apply: 1-d path for shape {:?}", shape),
        r if r <= crate::MAX_UNROLLED_RANK => {
            trace!("apply: nested rank-{} path for shape {:?}", r, shape)
        }
        r => trace!("apply: rank-{} odometer path for shape {:?}", r, shape),
    }
    for_each_offset(&plan, f)
}

// ============================================================================
// Loop nests
// ============================================================================

#[inline(always)]
fn advance<const N: usize>(ix: &mut [isize; N], delta: &[isize; N]) {
    for k in 0..N {
        ix[k] += delta[k];
    }
}

#[inline(always)]
fn to_offsets<const N: usize>(ix: &[isize; N]) -> [usize; N] {
    std::array::from_fn(|k| {
        debug_assert!(ix[k] >= 0, "negative buffer index {}", ix[k]);
        ix[k] as usize
    })
}

/// Run the loop nest described by `plan`.
///
/// Level 0 is the innermost loop. Empty plans make no calls; rank-0 plans
/// make exactly one.
pub(crate) fn for_each_offset<const N: usize, E, F>(
    plan: &LoopPlan<N>,
    mut f: F,
) -> std::result::Result<(), E>
where
    F: FnMut([usize; N]) -> std::result::Result<(), E>,
{
    if plan.is_empty() {
        return Ok(());
    }
    let ix: [isize; N] = plan.start.map(|s| s as isize);
    let deltas = plan.deltas();
    match plan.rank() {
        0 => f(plan.start),
        1 => kernel_1d(&plan.shape, &deltas, ix, &mut f),
        2 => kernel_2d(&plan.shape, &deltas, ix, &mut f),
        3 => kernel_3d(&plan.shape, &deltas, ix, &mut f),
        4 => kernel_4d(&plan.shape, &deltas, ix, &mut f),
        _ => kernel_nd(&plan.shape, &deltas, ix, &mut f),
    }
}

#[inline]
fn kernel_1d<const N: usize, E, F>(
    shape: &[usize],
    deltas: &[[isize; N]],
    mut ix: [isize; N],
    f: &mut F,
) -> std::result::Result<(), E>
where
    F: FnMut([usize; N]) -> std::result::Result<(), E>,
{
    let s0 = shape[0];
    let d0 = deltas[0];
    for _ in 0..s0 {
        f(to_offsets(&ix))?;
        advance(&mut ix, &d0);
    }
    Ok(())
}

#[inline]
fn kernel_2d<const N: usize, E, F>(
    shape: &[usize],
    deltas: &[[isize; N]],
    mut ix: [isize; N],
    f: &mut F,
) -> std::result::Result<(), E>
where
    F: FnMut([usize; N]) -> std::result::Result<(), E>,
{
    let (s0, s1) = (shape[0], shape[1]);
    let (d0, d1) = (deltas[0], deltas[1]);
    for _ in 0..s1 {
        for _ in 0..s0 {
            f(to_offsets(&ix))?;
            advance(&mut ix, &d0);
        }
        advance(&mut ix, &d1);
    }
    Ok(())
}

#[inline]
fn kernel_3d<const N: usize, E, F>(
    shape: &[usize],
    deltas: &[[isize; N]],
    mut ix: [isize; N],
    f: &mut F,
) -> std::result::Result<(), E>
where
    F: FnMut([usize; N]) -> std::result::Result<(), E>,
{
    let (s0, s1, s2) = (shape[0], shape[1], shape[2]);
    let (d0, d1, d2) = (deltas[0], deltas[1], deltas[2]);
    for _ in 0..s2 {
        for _ in 0..s1 {
            for _ in 0..s0 {
                f(to_offsets(&ix))?;
                advance(&mut ix, &d0);
            }
            advance(&mut ix, &d1);
        }
        advance(&mut ix, &d2);
    }
    Ok(())
}

#[inline]
fn kernel_4d<const N: usize, E, F>(
    shape: &[usize],
    deltas: &[[isize; N]],
    mut ix: [isize; N],
    f: &mut F,
) -> std::result::Result<(), E>
where
    F: FnMut([usize; N]) -> std::result::Result<(), E>,
{
    let (s0, s1, s2, s3) = (shape[0], shape[1], shape[2], shape[3]);
    let (d0, d1, d2, d3) = (deltas[0], deltas[1], deltas[2], deltas[3]);
    for _ in 0..s3 {
        for _ in 0..s2 {
            for _ in 0..s1 {
                for _ in 0..s0 {
                    f(to_offsets(&ix))?;
                    advance(&mut ix, &d0);
                }
                advance(&mut ix, &d1);
            }
            advance(&mut ix, &d2);
        }
        advance(&mut ix, &d3);
    }
    Ok(())
}

/// Arbitrary-rank nest as an odometer over the outer levels.
fn kernel_nd<const N: usize, E, F>(
    shape: &[usize],
    deltas: &[[isize; N]],
    mut ix: [isize; N],
    f: &mut F,
) -> std::result::Result<(), E>
where
    F: FnMut([usize; N]) -> std::result::Result<(), E>,
{
    let rank = shape.len();
    debug_assert!(rank > crate::MAX_UNROLLED_RANK);

    let s0 = shape[0];
    let d0 = deltas[0];
    let mut counter: SmallVec<[usize; 8]> = smallvec![0; rank];

    loop {
        for _ in 0..s0 {
            f(to_offsets(&ix))?;
            advance(&mut ix, &d0);
        }

        // Carry into the outer levels.
        let mut level = 1;
        loop {
            if level == rank {
                return Ok(());
            }
            advance(&mut ix, &deltas[level]);
            counter[level] += 1;
            if counter[level] < shape[level] {
                break;
            }
            counter[level] = 0;
            level += 1;
        }
    }
}
