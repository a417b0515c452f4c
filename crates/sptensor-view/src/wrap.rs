//! Plain backend wrapper
//!
//! [`SpTensorView`] exposes a storage backend through the view interface
//! with identity coordinate translation. It is the usual root of a view
//! chain, and [`SpTensorView::alloc`] is the owning allocator: the returned
//! view holds a fresh COO backend and drops it with itself.

use smallvec::SmallVec;
use sptensor_core::{Index, Scalar, SptensorResult, Tensor};
use sptensor_sparse::CooTensor;

use crate::view::{Rebase, View};

/// Identity translation over the wrapped tensor's own shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrap {
    dims: Vec<usize>,
}

impl Rebase for Wrap {
    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn to(&self, index: &[usize]) -> Index {
        SmallVec::from_slice(index)
    }

    fn from(&self, index: &[usize]) -> Index {
        SmallVec::from_slice(index)
    }
}

/// A backend seen through the view interface
pub type SpTensorView<V> = View<V, Wrap>;

impl<V: Tensor> View<V, Wrap> {
    /// Wrap `source` without translating coordinates
    pub fn new(source: V) -> Self {
        let rebase = Wrap {
            dims: source.dims().to_vec(),
        };
        View::rebased(source, rebase)
    }
}

impl<T: Scalar> View<CooTensor<T>, Wrap> {
    /// Allocate an empty COO backend owned by the returned view
    ///
    /// # Errors
    ///
    /// Returns an error if `dims` is empty or contains a zero.
    pub fn alloc(dims: Vec<usize>) -> SptensorResult<Self> {
        Ok(Self::new(CooTensor::new(dims)?))
    }
}
