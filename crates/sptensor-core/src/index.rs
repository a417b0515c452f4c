//! Coordinate model shared by every backend and view
//!
//! A coordinate is a fixed-arity tuple of unsigned integers, one per mode.
//! User-facing coordinates are **1-based**: component `k` lies in
//! `[1, dims[k]]`. Coordinates compare lexicographically, which is also the
//! row-major (last mode fastest) enumeration order.
//!
//! # Examples
//!
//! ```
//! use sptensor_core::index::{delinearize, linearize, strides};
//!
//! let dims = [3, 4, 5];
//! assert_eq!(strides(&dims), vec![20, 5, 1]);
//!
//! let offset = linearize(&[2, 3, 1], &dims);
//! assert_eq!(offset, 30);
//! assert_eq!(&delinearize(offset, &dims)[..], &[2, 3, 1]);
//! ```

use std::cmp::Ordering;

use smallvec::{smallvec, SmallVec};

use crate::error::{SptensorResult, ValidationError};

/// Coordinate type using SmallVec to avoid heap allocation for common ranks.
///
/// Tensors up to 6 modes keep their coordinates inline; higher ranks spill
/// to the heap transparently.
pub type Index = SmallVec<[usize; 6]>;

/// Lexicographic comparison of two coordinates of equal arity
pub fn index_cmp(a: &[usize], b: &[usize]) -> Ordering {
    debug_assert_eq!(a.len(), b.len());
    a.cmp(b)
}

/// The first coordinate `(1, 1, ..., 1)` of an `nmodes`-mode tensor
pub fn first(nmodes: usize) -> Index {
    smallvec![1; nmodes]
}

/// Number of addressable cells in the dense cross-product of `dims`
///
/// `None` when the count does not fit in `usize`; shapes that large are
/// still addressable by the hash backend.
pub fn cardinality(dims: &[usize]) -> Option<usize> {
    dims.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
}

/// Row-major stride multipliers: `mul[k] = dims[k+1] * ... * dims[n-1]`
pub fn strides(dims: &[usize]) -> Vec<usize> {
    let mut mul = vec![1; dims.len()];
    for k in (0..dims.len().saturating_sub(1)).rev() {
        mul[k] = mul[k + 1] * dims[k + 1];
    }
    mul
}

/// Zero-based row-major offset of a 1-based coordinate
pub fn linearize(index: &[usize], dims: &[usize]) -> usize {
    debug_assert_eq!(index.len(), dims.len());
    let mut offset = 0;
    for (&i, &d) in index.iter().zip(dims) {
        offset = offset * d + (i - 1);
    }
    offset
}

/// Inverse of [`linearize`]
pub fn delinearize(mut offset: usize, dims: &[usize]) -> Index {
    let mut index: Index = smallvec![0; dims.len()];
    for (k, &d) in dims.iter().enumerate().rev() {
        index[k] = offset % d + 1;
        offset /= d;
    }
    index
}

/// Whether every component of `index` lies in `[1, dims[k]]`
pub fn in_bounds(index: &[usize], dims: &[usize]) -> bool {
    index.len() == dims.len()
        && index
            .iter()
            .zip(dims)
            .all(|(&i, &d)| (1..=d).contains(&i))
}

/// Reject dimension vectors that cannot describe a tensor
pub fn validate_dims(dims: &[usize]) -> SptensorResult<()> {
    if dims.is_empty() {
        return Err(ValidationError::EmptyShape.into());
    }
    if dims.contains(&0) {
        return Err(ValidationError::ZeroInShape.into());
    }
    Ok(())
}
