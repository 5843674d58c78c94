//! Copy all or part of a matrix.

use std::fmt;
use std::str::FromStr;

use strided_kernel::assign;
use strided_view::{
    strides2order, validate_bounds, Accessor, AccessorMut, Order, StridedError, StridedView,
    StridedViewMut,
};

use crate::util::{check_lda, matrix_strides};
use crate::Result;

/// Which part of a matrix an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Uplo {
    /// On and above the diagonal.
    Upper,
    /// On and below the diagonal.
    Lower,
    /// Every element.
    All,
}

impl Uplo {
    pub fn as_str(self) -> &'static str {
        match self {
            Uplo::Upper => "upper",
            Uplo::Lower => "lower",
            Uplo::All => "all",
        }
    }
}

impl fmt::Display for Uplo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Uplo {
    type Err = StridedError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "upper" => Ok(Uplo::Upper),
            "lower" => Ok(Uplo::Lower),
            "all" => Ok(Uplo::All),
            _ => Err(StridedError::InvalidArgument("unknown triangle")),
        }
    }
}

/// Copy `m x n` matrix `a` (or one of its triangles) into `b`, both stored
/// with leading dimensions in `order`.
///
/// # Example
///
/// ```
/// use strided_blas::{lacpy, Order, Uplo};
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// let mut b = [0.0; 4];
/// lacpy(Order::RowMajor, Uplo::Upper, 2, 2, &a, 2, &mut b, 2).unwrap();
/// assert_eq!(b, [1.0, 2.0, 0.0, 4.0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn lacpy<'b, A, B>(
    order: Order,
    uplo: Uplo,
    m: usize,
    n: usize,
    a: &A,
    lda: usize,
    b: &'b mut B,
    ldb: usize,
) -> Result<&'b mut B>
where
    A: Accessor + ?Sized,
    B: AccessorMut<Elem = A::Elem> + ?Sized,
{
    let inner = if order.is_row_major() { n } else { m };
    check_lda(lda, inner)?;
    check_lda(ldb, inner)?;
    let (sa1, sa2) = matrix_strides(order, lda);
    let (sb1, sb2) = matrix_strides(order, ldb);
    lacpy_ndarray(uplo, m, n, a, sa1, sa2, 0, b, sb1, sb2, 0)
}

/// [`lacpy`] with explicit row/column strides and offsets.
///
/// The traversal follows the memory layout of `a`: row by row when its
/// strides read as row-major, column by column otherwise.
#[allow(clippy::too_many_arguments)]
pub fn lacpy_ndarray<'b, A, B>(
    uplo: Uplo,
    m: usize,
    n: usize,
    a: &A,
    stride_a1: isize,
    stride_a2: isize,
    offset_a: usize,
    b: &'b mut B,
    stride_b1: isize,
    stride_b2: isize,
    offset_b: usize,
) -> Result<&'b mut B>
where
    A: Accessor + ?Sized,
    B: AccessorMut<Elem = A::Elem> + ?Sized,
{
    let shape = [m, n];
    let strides_a = [stride_a1, stride_a2];
    let strides_b = [stride_b1, stride_b2];
    let order = strides2order(&strides_a).unwrap_or(Order::RowMajor);

    let upper = match uplo {
        Uplo::All => {
            {
                let src = StridedView::new(a, &shape, &strides_a, offset_a, order)?;
                let mut dest = StridedViewMut::new(&mut *b, &shape, &strides_b, offset_b, order)?;
                assign(&src, &mut dest)?;
            }
            return Ok(b);
        }
        Uplo::Upper => true,
        Uplo::Lower => false,
    };

    validate_bounds(a.len(), &shape, &strides_a, offset_a)?;
    validate_bounds(b.len(), &shape, &strides_b, offset_b)?;
    if m == 0 || n == 0 {
        return Ok(b);
    }

    let ia = |i: usize, j: usize| {
        (offset_a as isize + i as isize * stride_a1 + j as isize * stride_a2) as usize
    };
    let ib = |i: usize, j: usize| {
        (offset_b as isize + i as isize * stride_b1 + j as isize * stride_b2) as usize
    };

    match (upper, order) {
        (true, Order::RowMajor) => {
            for i in 0..m {
                for j in i..n {
                    b.set(ib(i, j), a.get(ia(i, j)));
                }
            }
        }
        (false, Order::RowMajor) => {
            for i in 0..m {
                for j in 0..=i.min(n - 1) {
                    b.set(ib(i, j), a.get(ia(i, j)));
                }
            }
        }
        (true, Order::ColumnMajor) => {
            for j in 0..n {
                for i in 0..=j.min(m - 1) {
                    b.set(ib(i, j), a.get(ia(i, j)));
                }
            }
        }
        (false, Order::ColumnMajor) => {
            for j in 0..n {
                for i in j..m {
                    b.set(ib(i, j), a.get(ia(i, j)));
                }
            }
        }
    }
    Ok(b)
}
