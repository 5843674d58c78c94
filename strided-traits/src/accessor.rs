//! Element accessors: the getter/setter seam between loop bodies and storage.
//!
//! Kernels never index a buffer directly. They read through [`Accessor::get`]
//! and write through [`AccessorMut::set`], so one loop body serves plain
//! slices, vectors, and composite storage such as interleaved complex pairs.
//!
//! Indices handed to `get`/`set` are buffer indices (already offset and
//! strided). Implementations may panic on out-of-range indices; the
//! validating entry points guarantee that never happens.

/// Read access to one logical element per buffer index.
pub trait Accessor {
    /// Logical element type produced by the getter.
    type Elem: Copy;

    /// Number of addressable elements.
    fn len(&self) -> usize;

    /// Read the element stored at buffer index `idx`.
    fn get(&self, idx: usize) -> Self::Elem;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write access to one logical element per buffer index.
pub trait AccessorMut: Accessor {
    /// Write `value` at buffer index `idx`.
    fn set(&mut self, idx: usize, value: Self::Elem);
}

impl<T: Copy> Accessor for [T] {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline(always)]
    fn get(&self, idx: usize) -> T {
        self[idx]
    }
}

impl<T: Copy> AccessorMut for [T] {
    #[inline(always)]
    fn set(&mut self, idx: usize, value: T) {
        self[idx] = value;
    }
}

impl<T: Copy, const N: usize> Accessor for [T; N] {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    fn get(&self, idx: usize) -> T {
        self[idx]
    }
}

impl<T: Copy, const N: usize> AccessorMut for [T; N] {
    #[inline(always)]
    fn set(&mut self, idx: usize, value: T) {
        self[idx] = value;
    }
}

impl<T: Copy> Accessor for Vec<T> {
    type Elem = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline(always)]
    fn get(&self, idx: usize) -> T {
        self[idx]
    }
}

impl<T: Copy> AccessorMut for Vec<T> {
    #[inline(always)]
    fn set(&mut self, idx: usize, value: T) {
        self[idx] = value;
    }
}

impl<A: Accessor + ?Sized> Accessor for &A {
    type Elem = A::Elem;

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline(always)]
    fn get(&self, idx: usize) -> A::Elem {
        (**self).get(idx)
    }
}

impl<A: Accessor + ?Sized> Accessor for &mut A {
    type Elem = A::Elem;

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline(always)]
    fn get(&self, idx: usize) -> A::Elem {
        (**self).get(idx)
    }
}

impl<A: AccessorMut + ?Sized> AccessorMut for &mut A {
    #[inline(always)]
    fn set(&mut self, idx: usize, value: A::Elem) {
        (**self).set(idx, value)
    }
}
