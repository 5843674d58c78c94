//! Convenience operations built on the apply engine.

use strided_view::{Accessor, AccessorMut, StridedView, StridedViewMut};

use crate::apply::{nullary, unary};
use crate::Result;

/// Copy `src` into `dest` element by element: `dest[i] = src[i]`.
///
/// The two views may use different strides, offsets and orders.
pub fn assign<X, Y>(src: &StridedView<'_, X>, dest: &mut StridedViewMut<'_, Y>) -> Result<()>
where
    X: Accessor + ?Sized,
    Y: AccessorMut<Elem = X::Elem> + ?Sized,
{
    unary(src, dest, |v| v)
}

/// Set every element of `dest` to `value`.
pub fn fill<Y>(dest: &mut StridedViewMut<'_, Y>, value: Y::Elem)
where
    Y: AccessorMut + ?Sized,
{
    nullary(dest, || value);
}
