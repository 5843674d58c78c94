//! Out-of-place matrix transpose.

use strided_kernel::assign;
use strided_view::{strides2order, Accessor, AccessorMut, Order, StridedView, StridedViewMut};

use crate::util::{check_lda, matrix_strides};
use crate::Result;

/// Write the transpose of `m x n` matrix `a` into the `n x m` matrix `out`.
///
/// Row-major storage needs `lda >= max(1, n)` and `ldo >= max(1, m)`;
/// column-major swaps the two bounds.
///
/// # Example
///
/// ```
/// use strided_blas::{ge_trans, Order};
///
/// let a = [1, 2, 3, 4, 5, 6];
/// let mut out = [0; 6];
/// ge_trans(Order::RowMajor, 2, 3, &a, 3, &mut out, 2).unwrap();
/// assert_eq!(out, [1, 4, 2, 5, 3, 6]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn ge_trans<'o, A, O>(
    order: Order,
    m: usize,
    n: usize,
    a: &A,
    lda: usize,
    out: &'o mut O,
    ldo: usize,
) -> Result<&'o mut O>
where
    A: Accessor + ?Sized,
    O: AccessorMut<Elem = A::Elem> + ?Sized,
{
    let (min_a, min_o) = match order {
        Order::RowMajor => (n, m),
        Order::ColumnMajor => (m, n),
    };
    check_lda(lda, min_a)?;
    check_lda(ldo, min_o)?;
    let (sa1, sa2) = matrix_strides(order, lda);
    let (so1, so2) = matrix_strides(order, ldo);
    ge_trans_ndarray(m, n, a, sa1, sa2, 0, out, so1, so2, 0)
}

/// [`ge_trans`] with explicit strides: `a` is `m x n` with strides
/// `(stride_a1, stride_a2)`; `out` is `n x m` with strides
/// `(stride_out1, stride_out2)`.
#[allow(clippy::too_many_arguments)]
pub fn ge_trans_ndarray<'o, A, O>(
    m: usize,
    n: usize,
    a: &A,
    stride_a1: isize,
    stride_a2: isize,
    offset_a: usize,
    out: &'o mut O,
    stride_out1: isize,
    stride_out2: isize,
    offset_out: usize,
) -> Result<&'o mut O>
where
    A: Accessor + ?Sized,
    O: AccessorMut<Elem = A::Elem> + ?Sized,
{
    let shape = [m, n];
    let strides_a = [stride_a1, stride_a2];
    let order = strides2order(&strides_a).unwrap_or(Order::RowMajor);
    {
        let src = StridedView::new(a, &shape, &strides_a, offset_a, order)?;
        // out(j, i) seen through a's index space.
        let mut dest = StridedViewMut::new(
            &mut *out,
            &shape,
            &[stride_out2, stride_out1],
            offset_out,
            order,
        )?;
        assign(&src, &mut dest)?;
    }
    Ok(out)
}
