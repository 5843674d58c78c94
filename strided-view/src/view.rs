//! Strided views over accessor-backed buffers.
//!
//! - [`StridedView`]: read-only view (buffer, shape, strides, offset, order)
//! - [`StridedViewMut`]: writable view with the same descriptor
//! - [`StridedArray`]: owned strided array that lends out either view

use std::ops::{Index, IndexMut};
use std::sync::Arc;

use strided_traits::{Accessor, AccessorMut};

use crate::layout::{numel, shape2strides, validate_bounds};
use crate::order::Order;
use crate::{Result, StridedError};

#[inline]
fn buffer_index(shape: &[usize], strides: &[isize], offset: usize, indices: &[usize]) -> usize {
    assert_eq!(indices.len(), shape.len(), "wrong number of indices");
    let mut idx = offset as isize;
    for (d, &index) in indices.iter().enumerate() {
        assert!(
            index < shape[d],
            "index {} out of bounds for dim {}",
            index,
            shape[d]
        );
        idx += index as isize * strides[d];
    }
    idx as usize
}

// ============================================================================
// StridedView
// ============================================================================

/// Immutable strided view: the unit every kernel operand is described by.
///
/// Construction checks that every reachable buffer index lies inside the
/// buffer, so kernels can walk the view without further checks.
pub struct StridedView<'a, B: ?Sized> {
    buffer: &'a B,
    shape: Arc<[usize]>,
    strides: Arc<[isize]>,
    offset: usize,
    order: Order,
}

impl<B: ?Sized> Clone for StridedView<'_, B> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer,
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
            order: self.order,
        }
    }
}

impl<B: ?Sized> std::fmt::Debug for StridedView<'_, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StridedView")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("order", &self.order)
            .finish()
    }
}

impl<'a, B: Accessor + ?Sized> StridedView<'a, B> {
    /// Create a view, validating that it stays inside `buffer`.
    pub fn new(
        buffer: &'a B,
        shape: &[usize],
        strides: &[isize],
        offset: usize,
        order: Order,
    ) -> Result<Self> {
        validate_bounds(buffer.len(), shape, strides, offset)?;
        Ok(Self {
            buffer,
            shape: Arc::from(shape),
            strides: Arc::from(strides),
            offset,
            order,
        })
    }

    /// Create a contiguous view starting at buffer index 0.
    pub fn contiguous(buffer: &'a B, shape: &[usize], order: Order) -> Result<Self> {
        let strides = shape2strides(shape, order);
        Self::new(buffer, shape, &strides, 0, order)
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        numel(&self.shape)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn buffer(&self) -> &'a B {
        self.buffer
    }

    /// Read the element at a multi-index.
    pub fn get(&self, indices: &[usize]) -> B::Elem {
        let idx = buffer_index(&self.shape, &self.strides, self.offset, indices);
        self.buffer.get(idx)
    }
}

// ============================================================================
// StridedViewMut
// ============================================================================

/// Mutable strided view. Kernels write their results through it.
pub struct StridedViewMut<'a, B: ?Sized> {
    buffer: &'a mut B,
    shape: Arc<[usize]>,
    strides: Arc<[isize]>,
    offset: usize,
    order: Order,
}

impl<B: ?Sized> std::fmt::Debug for StridedViewMut<'_, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StridedViewMut")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("order", &self.order)
            .finish()
    }
}

impl<'a, B: AccessorMut + ?Sized> StridedViewMut<'a, B> {
    /// Create a mutable view, validating that it stays inside `buffer`.
    pub fn new(
        buffer: &'a mut B,
        shape: &[usize],
        strides: &[isize],
        offset: usize,
        order: Order,
    ) -> Result<Self> {
        validate_bounds(buffer.len(), shape, strides, offset)?;
        Ok(Self {
            buffer,
            shape: Arc::from(shape),
            strides: Arc::from(strides),
            offset,
            order,
        })
    }

    /// Create a contiguous mutable view starting at buffer index 0.
    pub fn contiguous(buffer: &'a mut B, shape: &[usize], order: Order) -> Result<Self> {
        let strides = shape2strides(shape, order);
        Self::new(buffer, shape, &strides, 0, order)
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        numel(&self.shape)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split into the writable buffer and the descriptor.
    ///
    /// Kernels need both at once; the descriptor borrows are disjoint from
    /// the buffer borrow.
    #[inline]
    pub fn parts_mut(&mut self) -> (&mut B, &[usize], &[isize], usize, Order) {
        (
            &mut *self.buffer,
            &self.shape,
            &self.strides,
            self.offset,
            self.order,
        )
    }

    /// Reborrow as an immutable view.
    pub fn as_view(&self) -> StridedView<'_, B> {
        StridedView {
            buffer: &*self.buffer,
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
            order: self.order,
        }
    }

    /// Read the element at a multi-index.
    pub fn get(&self, indices: &[usize]) -> B::Elem {
        let idx = buffer_index(&self.shape, &self.strides, self.offset, indices);
        self.buffer.get(idx)
    }

    /// Write the element at a multi-index.
    pub fn set(&mut self, indices: &[usize], value: B::Elem) {
        let idx = buffer_index(&self.shape, &self.strides, self.offset, indices);
        self.buffer.set(idx, value);
    }
}

// ============================================================================
// StridedArray
// ============================================================================

/// Owned strided multidimensional array.
pub struct StridedArray<T> {
    data: Vec<T>,
    shape: Arc<[usize]>,
    strides: Arc<[isize]>,
    offset: usize,
    order: Order,
}

impl<T: std::fmt::Debug> std::fmt::Debug for StridedArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StridedArray")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("offset", &self.offset)
            .field("order", &self.order)
            .field("data", &self.data)
            .finish()
    }
}

impl<T: Clone> Clone for StridedArray<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
            order: self.order,
        }
    }
}

impl<T: Clone + Default> StridedArray<T> {
    /// Contiguous array in `order`, filled with `T::default()`.
    pub fn zeros(shape: &[usize], order: Order) -> Self {
        Self {
            data: vec![T::default(); numel(shape)],
            shape: Arc::from(shape),
            strides: Arc::from(shape2strides(shape, order)),
            offset: 0,
            order,
        }
    }

    /// Row-major array filled with `T::default()`.
    pub fn row_major(shape: &[usize]) -> Self {
        Self::zeros(shape, Order::RowMajor)
    }

    /// Column-major array filled with `T::default()`.
    pub fn col_major(shape: &[usize]) -> Self {
        Self::zeros(shape, Order::ColumnMajor)
    }
}

impl<T> StridedArray<T> {
    /// Contiguous array whose elements are produced by `f`, called with each
    /// multi-index in the canonical order of `order`.
    pub fn from_fn(shape: &[usize], order: Order, mut f: impl FnMut(&[usize]) -> T) -> Self {
        let total = numel(shape);
        let rank = shape.len();
        let mut data = Vec::with_capacity(total);
        let mut idx = vec![0usize; rank];
        for _ in 0..total {
            data.push(f(&idx));
            // Odometer increment over the fastest-varying dimension first.
            for k in 0..rank {
                let d = match order {
                    Order::RowMajor => rank - 1 - k,
                    Order::ColumnMajor => k,
                };
                idx[d] += 1;
                if idx[d] < shape[d] {
                    break;
                }
                idx[d] = 0;
            }
        }
        Self {
            data,
            shape: Arc::from(shape),
            strides: Arc::from(shape2strides(shape, order)),
            offset: 0,
            order,
        }
    }

    pub fn from_fn_row_major(shape: &[usize], f: impl FnMut(&[usize]) -> T) -> Self {
        Self::from_fn(shape, Order::RowMajor, f)
    }

    pub fn from_fn_col_major(shape: &[usize], f: impl FnMut(&[usize]) -> T) -> Self {
        Self::from_fn(shape, Order::ColumnMajor, f)
    }

    /// Wrap existing data with an arbitrary descriptor.
    pub fn from_parts(
        data: Vec<T>,
        shape: &[usize],
        strides: &[isize],
        offset: usize,
        order: Order,
    ) -> Result<Self> {
        validate_bounds(data.len(), shape, strides, offset)?;
        Ok(Self {
            data,
            shape: Arc::from(shape),
            strides: Arc::from(strides),
            offset,
            order,
        })
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        numel(&self.shape)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn index_of(&self, indices: &[usize]) -> usize {
        buffer_index(&self.shape, &self.strides, self.offset, indices)
    }
}

impl<T: Copy> StridedArray<T> {
    /// Immutable view over this array.
    pub fn view(&self) -> StridedView<'_, [T]> {
        StridedView {
            buffer: &self.data[..],
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
            order: self.order,
        }
    }

    /// Mutable view over this array.
    pub fn view_mut(&mut self) -> StridedViewMut<'_, [T]> {
        StridedViewMut {
            buffer: &mut self.data[..],
            shape: self.shape.clone(),
            strides: self.strides.clone(),
            offset: self.offset,
            order: self.order,
        }
    }

    /// Read the element at a multi-index.
    pub fn get(&self, indices: &[usize]) -> T {
        self.data[self.index_of(indices)]
    }

    /// Write the element at a multi-index.
    pub fn set(&mut self, indices: &[usize], value: T) {
        let idx = self.index_of(indices);
        self.data[idx] = value;
    }

    /// Elements in canonical order (last dimension fastest for row-major,
    /// first dimension fastest for column-major).
    pub fn to_vec(&self) -> Vec<T> {
        let rank = self.ndim();
        let mut out = Vec::with_capacity(self.len());
        let mut idx = vec![0usize; rank];
        for _ in 0..self.len() {
            out.push(self.get(&idx));
            for k in 0..rank {
                let d = match self.order {
                    Order::RowMajor => rank - 1 - k,
                    Order::ColumnMajor => k,
                };
                idx[d] += 1;
                if idx[d] < self.shape[d] {
                    break;
                }
                idx[d] = 0;
            }
        }
        out
    }
}

impl<T> Index<&[usize]> for StridedArray<T> {
    type Output = T;

    fn index(&self, indices: &[usize]) -> &T {
        &self.data[self.index_of(indices)]
    }
}

impl<T> IndexMut<&[usize]> for StridedArray<T> {
    fn index_mut(&mut self, indices: &[usize]) -> &mut T {
        let idx = self.index_of(indices);
        &mut self.data[idx]
    }
}

impl<T: Copy> TryFrom<StridedView<'_, [T]>> for StridedArray<T> {
    type Error = StridedError;

    /// Copy a view's elements into a fresh contiguous array of the same order.
    fn try_from(view: StridedView<'_, [T]>) -> Result<Self> {
        let order = view.order();
        let shape = view.shape().to_vec();
        let total = view.len();
        let mut data = Vec::with_capacity(total);
        let rank = shape.len();
        let mut idx = vec![0usize; rank];
        for _ in 0..total {
            data.push(view.get(&idx));
            for k in 0..rank {
                let d = match order {
                    Order::RowMajor => rank - 1 - k,
                    Order::ColumnMajor => k,
                };
                idx[d] += 1;
                if idx[d] < shape[d] {
                    break;
                }
                idx[d] = 0;
            }
        }
        StridedArray::from_parts(data, &shape, &shape2strides(&shape, order), 0, order)
    }
}

// ============================================================================
// Tests
// ============================================================================
