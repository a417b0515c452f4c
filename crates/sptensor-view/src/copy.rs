//! Deep copies
//!
//! Unlike a view, a deep copy owns fresh storage: the source's nonzero
//! entries are replayed through `set` on a newly allocated tensor, so later
//! writes to either side are independent.

use sptensor_core::{SptensorResult, Tensor};
use sptensor_sparse::CooTensor;

use crate::wrap::SpTensorView;

/// Copy any tensor or view into an owning COO-backed view
///
/// # Examples
///
/// ```
/// use sptensor_core::Tensor;
/// use sptensor_view::{deep_copy, IdentityTensor};
///
/// let eye = IdentityTensor::<f64>::new(vec![3, 3]).unwrap();
/// let mut copy = deep_copy(&eye).unwrap();
/// copy.set(&[1, 2], 4.0);
/// assert_eq!(copy.nnz(), 4);
/// assert_eq!(eye.get(&[1, 2]), 0.0);
/// ```
pub fn deep_copy<S>(source: &S) -> SptensorResult<SpTensorView<CooTensor<S::Value>>>
where
    S: Tensor + ?Sized,
{
    copy_into(source, SpTensorView::<CooTensor<S::Value>>::alloc)
}

/// Copy any tensor or view into storage built by `alloc`
///
/// `alloc` receives the source's dimensions and returns an empty tensor.
pub fn copy_into<S, D, F>(source: &S, alloc: F) -> SptensorResult<D>
where
    S: Tensor + ?Sized,
    D: Tensor<Value = S::Value>,
    F: FnOnce(Vec<usize>) -> SptensorResult<D>,
{
    let mut dest = alloc(source.dims().to_vec())?;
    for (idx, value) in source.entries() {
        dest.set(&idx, value);
    }
    Ok(dest)
}
