//! Complex elements stored as interleaved `(re, im)` pairs of real components.
//!
//! Element `i` of the accessor lives at components `2i` and `2i + 1` of the
//! underlying real buffer. Views and kernels only ever see `Complex<F>`.

use bytemuck::Pod;
use num_complex::Complex;

use strided_traits::{Accessor, AccessorMut};

use crate::{Result, StridedError};

/// Read-only interleaved complex accessor.
#[derive(Debug, Clone, Copy)]
pub struct InterleavedComplex<'a, F> {
    pairs: &'a [[F; 2]],
}

impl<'a, F: Pod> InterleavedComplex<'a, F> {
    /// Reinterpret a real buffer of even length as complex elements.
    pub fn new(components: &'a [F]) -> Result<Self> {
        let pairs = bytemuck::try_cast_slice(components)
            .map_err(|_| StridedError::InterleavedLength(components.len()))?;
        Ok(Self { pairs })
    }

    /// The underlying real components.
    pub fn components(&self) -> &'a [F] {
        bytemuck::cast_slice(self.pairs)
    }
}

impl<F: Pod> Accessor for InterleavedComplex<'_, F> {
    type Elem = Complex<F>;

    #[inline]
    fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    fn get(&self, idx: usize) -> Complex<F> {
        let [re, im] = self.pairs[idx];
        Complex::new(re, im)
    }
}

/// Writable interleaved complex accessor.
#[derive(Debug)]
pub struct InterleavedComplexMut<'a, F> {
    pairs: &'a mut [[F; 2]],
}

impl<'a, F: Pod> InterleavedComplexMut<'a, F> {
    /// Reinterpret a mutable real buffer of even length as complex elements.
    pub fn new(components: &'a mut [F]) -> Result<Self> {
        let len = components.len();
        let pairs = bytemuck::try_cast_slice_mut(components)
            .map_err(|_| StridedError::InterleavedLength(len))?;
        Ok(Self { pairs })
    }

    pub fn components(&self) -> &[F] {
        bytemuck::cast_slice(self.pairs)
    }
}

impl<F: Pod> Accessor for InterleavedComplexMut<'_, F> {
    type Elem = Complex<F>;

    #[inline]
    fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    fn get(&self, idx: usize) -> Complex<F> {
        let [re, im] = self.pairs[idx];
        Complex::new(re, im)
    }
}

impl<F: Pod> AccessorMut for InterleavedComplexMut<'_, F> {
    #[inline]
    fn set(&mut self, idx: usize, value: Complex<F>) {
        self.pairs[idx] = [value.re, value.im];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Order, StridedView};

    #[test]
    fn test_interleaved_get() {
        let raw = [1.0f64, 2.0, 3.0, 4.0];
        let acc = InterleavedComplex::new(&raw).unwrap();
        assert_eq!(acc.len(), 2);
        assert_eq!(acc.get(1), Complex::new(3.0, 4.0));
        assert_eq!(acc.components(), &raw);
    }

    #[test]
    fn test_interleaved_odd_length() {
        let raw = [1.0f32, 2.0, 3.0];
        let err = InterleavedComplex::new(&raw).unwrap_err();
        assert_eq!(err, StridedError::InterleavedLength(3));
        let mut raw = [0.0f32; 5];
        assert!(InterleavedComplexMut::new(&mut raw).is_err());
    }

    #[test]
    fn test_interleaved_set() {
        let mut raw = [0.0f64; 6];
        {
            let mut acc = InterleavedComplexMut::new(&mut raw).unwrap();
            acc.set(2, Complex::new(5.0, -1.0));
        }
        assert_eq!(raw, [0.0, 0.0, 0.0, 0.0, 5.0, -1.0]);
    }

    #[test]
    fn test_interleaved_as_view_buffer() {
        let raw = [1.0f64, 0.0, 2.0, 0.0, 3.0, 1.0, 4.0, 1.0];
        let acc = InterleavedComplex::new(&raw).unwrap();
        let view = StridedView::contiguous(&acc, &[2, 2], Order::ColumnMajor).unwrap();
        assert_eq!(view.get(&[0, 1]), Complex::new(3.0, 1.0));
        assert!(StridedView::new(&acc, &[5], &[1], 0, Order::RowMajor).is_err());
    }
}
