//! Coordinate-translating views
//!
//! A [`View`] pairs a wrapped tensor with a [`Rebase`]: the translation
//! between view-space and wrapped-space coordinates. The view stores no
//! values; `get`/`set` translate with [`Rebase::to`] and delegate, and the
//! nonzero cursor walks the wrapped tensor's nonzeros, maps each back with
//! [`Rebase::from`] and skips those the rebase does not cover.
//!
//! Because `View<V, R>` is itself a [`Tensor`], views nest freely:
//!
//! ```
//! use sptensor_core::Tensor;
//! use sptensor_sparse::CooTensor;
//! use sptensor_view::TensorView;
//!
//! let mut coo = CooTensor::<f64>::new(vec![2, 3, 4]).unwrap();
//! coo.set(&[1, 2, 3], 5.0);
//!
//! // borrow the backend; the transposed unfolding sees the same entry
//! let view = (&mut coo).unfold(2).unwrap().transpose(0, 1).unwrap();
//! assert_eq!(view.dims(), &[6, 4]);
//! assert_eq!(view.get(&[3, 3]), 5.0);
//! ```
//!
//! Ownership follows the wrapped type: `View<&mut X, _>` borrows `X`, while
//! `View<X, _>` and `View<Box<dyn Tensor<Value = T>>, _>` own it and drop it
//! with the view.

use sptensor_core::{Index, NzIterator, SptensorResult, Tensor, TensorIterator};

use crate::slice::{Slice, SliceSpec};
use crate::transpose::Transpose;
use crate::unfold::Unfold;

/// Translation between view-space and wrapped-space coordinates
pub trait Rebase {
    /// Whether some wrapped coordinates have no view-space counterpart
    ///
    /// When set, the nonzero cursor filters through [`contains`](Self::contains)
    /// and `nnz` counts instead of delegating.
    const FILTERS: bool = false;

    /// View-space dimensions
    fn dims(&self) -> &[usize];

    /// View-space coordinate to wrapped-space coordinate
    fn to(&self, index: &[usize]) -> Index;

    /// Wrapped-space coordinate to view-space coordinate
    fn from(&self, index: &[usize]) -> Index;

    /// Whether a wrapped-space coordinate is visible through the view
    fn contains(&self, _index: &[usize]) -> bool {
        true
    }
}

/// A tensor seen through a coordinate translation
#[derive(Debug, Clone)]
pub struct View<V, R> {
    source: V,
    rebase: R,
}

impl<V: Tensor, R: Rebase> View<V, R> {
    pub(crate) fn rebased(source: V, rebase: R) -> Self {
        Self { source, rebase }
    }

    /// The wrapped tensor
    pub fn source(&self) -> &V {
        &self.source
    }

    /// Mutable access to the wrapped tensor
    pub fn source_mut(&mut self) -> &mut V {
        &mut self.source
    }

    /// Release the wrapped tensor
    pub fn into_source(self) -> V {
        self.source
    }

    /// The coordinate translation
    pub fn rebase(&self) -> &R {
        &self.rebase
    }

    /// Translate a view-space coordinate into the wrapped tensor's space
    pub fn to(&self, index: &[usize]) -> Index {
        self.rebase.to(index)
    }

    /// Translate a wrapped-space coordinate into view space
    pub fn from(&self, index: &[usize]) -> Index {
        self.rebase.from(index)
    }
}

impl<V: Tensor, R: Rebase> Tensor for View<V, R> {
    type Value = V::Value;

    fn dims(&self) -> &[usize] {
        self.rebase.dims()
    }

    fn get(&self, index: &[usize]) -> V::Value {
        self.source.get(&self.rebase.to(index))
    }

    fn set(&mut self, index: &[usize], value: V::Value) {
        let target = self.rebase.to(index);
        self.source.set(&target, value)
    }

    fn nz_iter(&self) -> Box<dyn NzIterator<V::Value> + '_> {
        Box::new(ViewNzIter::new(self.source.nz_iter(), &self.rebase))
    }

    fn nnz(&self) -> usize {
        if R::FILTERS {
            let mut itr = self.source.nz_iter();
            let mut count = 0;
            while itr.valid() {
                if self.rebase.contains(itr.index()) {
                    count += 1;
                }
                TensorIterator::next(&mut itr);
            }
            count
        } else {
            self.source.nnz()
        }
    }
}

/// Nonzero cursor of a [`View`]: the wrapped cursor, translated and filtered
pub struct ViewNzIter<'a, T, R> {
    inner: Box<dyn NzIterator<T> + 'a>,
    rebase: &'a R,
    index: Index,
}

impl<'a, T, R: Rebase> ViewNzIter<'a, T, R> {
    fn new(inner: Box<dyn NzIterator<T> + 'a>, rebase: &'a R) -> Self {
        let mut itr = Self {
            inner,
            rebase,
            index: Index::new(),
        };
        if itr.inner.valid() && !itr.rebase.contains(itr.inner.index()) {
            itr.step(true);
        } else {
            itr.load_index();
        }
        itr
    }

    /// Move the wrapped cursor until it lands on a visible entry
    fn step(&mut self, forward: bool) -> bool {
        loop {
            let valid = if forward {
                TensorIterator::next(&mut *self.inner)
            } else {
                TensorIterator::prev(&mut *self.inner)
            };
            if !valid || self.rebase.contains(self.inner.index()) {
                self.load_index();
                return valid;
            }
        }
    }

    fn load_index(&mut self) {
        if self.inner.valid() {
            self.index = self.rebase.from(self.inner.index());
        }
    }
}

impl<T, R: Rebase> TensorIterator for ViewNzIter<'_, T, R> {
    fn valid(&self) -> bool {
        self.inner.valid()
    }

    fn next(&mut self) -> bool {
        self.step(true)
    }

    fn prev(&mut self) -> bool {
        self.step(false)
    }

    fn index(&self) -> &[usize] {
        &self.index
    }
}

impl<T, R: Rebase> NzIterator<T> for ViewNzIter<'_, T, R> {
    fn value(&self) -> Option<T> {
        self.inner.value()
    }
}

/// View constructors available on every tensor
///
/// Each method consumes its receiver; call it on `&mut tensor` to borrow
/// instead of moving.
pub trait TensorView: Tensor + Sized {
    /// 2-mode unfolding along 0-based `mode`
    fn unfold(self, mode: usize) -> SptensorResult<View<Self, Unfold>> {
        let rebase = Unfold::new(self.dims(), mode)?;
        Ok(View::rebased(self, rebase))
    }

    /// Sub-tensor selected by `spec`
    fn slice(self, spec: SliceSpec) -> SptensorResult<View<Self, Slice>> {
        let rebase = Slice::new(self.dims(), spec)?;
        Ok(View::rebased(self, rebase))
    }

    /// Swap 0-based modes `i` and `j`
    fn transpose(self, i: usize, j: usize) -> SptensorResult<View<Self, Transpose>> {
        let rebase = Transpose::new(self.dims(), i, j)?;
        Ok(View::rebased(self, rebase))
    }
}

impl<X: Tensor> TensorView for X {}
