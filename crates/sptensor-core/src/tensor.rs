//! The polymorphic tensor interface
//!
//! Every backend (COO, hash) and every view (dense, identity, unfold, slice,
//! transpose) implements [`Tensor`], so callers never need backend-specific
//! code. Coordinates are 1-based and must have arity [`Tensor::nmodes`];
//! out-of-range coordinates are a caller error and are only checked in debug
//! builds.
//!
//! Ownership of a wrapped tensor is expressed in the type: `&mut X` borrows,
//! `X` or `Box<X>` owns. The blanket impls below make all three usable
//! wherever a `Tensor` is expected.

use crate::iter::{Entries, IndexIterator, NzIterator, TensorIterator};
use crate::scalar::Scalar;

/// Sparse N-mode tensor access contract
pub trait Tensor {
    /// Element type
    type Value: Scalar;

    /// One bound per mode
    fn dims(&self) -> &[usize];

    /// Number of modes
    fn nmodes(&self) -> usize {
        self.dims().len()
    }

    /// Stored value at `index`, or zero when absent
    fn get(&self, index: &[usize]) -> Self::Value;

    /// Store `value` at `index`; storing zero removes the entry
    fn set(&mut self, index: &[usize], value: Self::Value);

    /// Cursor over every addressable coordinate, row-major
    fn iter(&self) -> IndexIterator {
        IndexIterator::new(self.dims())
    }

    /// Cursor over stored nonzero coordinates, in backend order
    fn nz_iter(&self) -> Box<dyn NzIterator<Self::Value> + '_>;

    /// Number of nonzero entries
    fn nnz(&self) -> usize {
        let mut itr = self.nz_iter();
        let mut count = 0;
        while itr.valid() {
            count += 1;
            TensorIterator::next(&mut itr);
        }
        count
    }

    /// `(coordinate, value)` pairs in nonzero-iteration order
    fn entries(&self) -> Entries<'_, Self::Value> {
        Entries::new(self.nz_iter())
    }
}

impl<X: Tensor + ?Sized> Tensor for &mut X {
    type Value = X::Value;

    fn dims(&self) -> &[usize] {
        (**self).dims()
    }

    fn get(&self, index: &[usize]) -> Self::Value {
        (**self).get(index)
    }

    fn set(&mut self, index: &[usize], value: Self::Value) {
        (**self).set(index, value)
    }

    fn iter(&self) -> IndexIterator {
        (**self).iter()
    }

    fn nz_iter(&self) -> Box<dyn NzIterator<Self::Value> + '_> {
        (**self).nz_iter()
    }

    fn nnz(&self) -> usize {
        (**self).nnz()
    }
}

impl<X: Tensor + ?Sized> Tensor for Box<X> {
    type Value = X::Value;

    fn dims(&self) -> &[usize] {
        (**self).dims()
    }

    fn get(&self, index: &[usize]) -> Self::Value {
        (**self).get(index)
    }

    fn set(&mut self, index: &[usize], value: Self::Value) {
        (**self).set(index, value)
    }

    fn iter(&self) -> IndexIterator {
        (**self).iter()
    }

    fn nz_iter(&self) -> Box<dyn NzIterator<Self::Value> + '_> {
        (**self).nz_iter()
    }

    fn nnz(&self) -> usize {
        (**self).nnz()
    }
}
