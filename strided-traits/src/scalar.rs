//! Scalar bounds for the arithmetic kernels.

/// Element types usable with `axpy`/`scal`-style kernels.
///
/// Only ring-like arithmetic is required, so integers, reals and
/// `Complex<T>` all qualify. Ordering is not part of the bound; the sort and
/// summation kernels ask for `num_traits::Float` directly.
pub trait ScalarBase:
    Copy
    + std::ops::Mul<Output = Self>
    + std::ops::Add<Output = Self>
    + num_traits::Zero
    + num_traits::One
    + PartialEq
{
}

impl<T> ScalarBase for T where
    T: Copy
        + std::ops::Mul<Output = T>
        + std::ops::Add<Output = T>
        + num_traits::Zero
        + num_traits::One
        + PartialEq
{
}
