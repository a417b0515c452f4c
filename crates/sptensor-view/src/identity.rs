//! Identity tensor
//!
//! One on the superdiagonal `(k, k, ..., k)`, zero elsewhere. The tensor has
//! no storage and is immutable: `set` is ignored.

use std::marker::PhantomData;

use smallvec::smallvec;
use sptensor_core::index::{self, Index};
use sptensor_core::{NzIterator, Scalar, SptensorResult, Tensor, TensorIterator};

/// N-mode identity tensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityTensor<T> {
    dims: Vec<usize>,
    _marker: PhantomData<T>,
}

impl<T: Scalar> IdentityTensor<T> {
    /// Identity tensor of the given shape
    ///
    /// # Errors
    ///
    /// Returns an error if `dims` is empty or contains a zero.
    pub fn new(dims: Vec<usize>) -> SptensorResult<Self> {
        index::validate_dims(&dims)?;
        Ok(Self {
            dims,
            _marker: PhantomData,
        })
    }

    /// Length of the diagonal
    pub fn diagonal_len(&self) -> usize {
        self.dims.iter().copied().min().unwrap_or(0)
    }
}

impl<T: Scalar> Tensor for IdentityTensor<T> {
    type Value = T;

    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn get(&self, index: &[usize]) -> T {
        match index.split_first() {
            Some((first, rest)) if rest.iter().all(|i| i == first) => T::one(),
            _ => T::zero(),
        }
    }

    fn set(&mut self, index: &[usize], _value: T) {
        log::trace!("ignored write to identity tensor at {:?}", index);
    }

    fn nz_iter(&self) -> Box<dyn NzIterator<T> + '_> {
        let len = self.diagonal_len();
        Box::new(DiagonalIter {
            nmodes: self.dims.len(),
            len,
            k: 1,
            valid: len > 0,
            index: smallvec![1; self.dims.len()],
            _marker: PhantomData,
        })
    }

    fn nnz(&self) -> usize {
        self.diagonal_len()
    }
}

/// Nonzero cursor walking the diagonal
pub struct DiagonalIter<T> {
    nmodes: usize,
    len: usize,
    k: usize,
    valid: bool,
    index: Index,
    _marker: PhantomData<T>,
}

impl<T> DiagonalIter<T> {
    fn seek(&mut self, k: Option<usize>) -> bool {
        match k.filter(|&k| (1..=self.len).contains(&k)) {
            Some(k) if self.valid => {
                self.k = k;
                self.index = smallvec![k; self.nmodes];
            }
            _ => self.valid = false,
        }
        self.valid
    }
}

impl<T> TensorIterator for DiagonalIter<T> {
    fn valid(&self) -> bool {
        self.valid
    }

    fn next(&mut self) -> bool {
        self.seek(self.k.checked_add(1))
    }

    fn prev(&mut self) -> bool {
        self.seek(self.k.checked_sub(1))
    }

    fn index(&self) -> &[usize] {
        &self.index
    }
}

impl<T: Scalar> NzIterator<T> for DiagonalIter<T> {
    fn value(&self) -> Option<T> {
        self.valid.then(T::one)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_values() {
        let eye = IdentityTensor::<f64>::new(vec![3, 3, 3]).unwrap();
        assert_eq!(eye.get(&[2, 2, 2]), 1.0);
        assert_eq!(eye.get(&[2, 2, 3]), 0.0);
        assert_eq!(eye.get(&[1, 3, 1]), 0.0);
    }

    #[test]
    fn test_set_is_ignored() {
        let mut eye = IdentityTensor::<i32>::new(vec![2, 2]).unwrap();
        eye.set(&[1, 2], 5);
        eye.set(&[1, 1], 0);
        assert_eq!(eye.get(&[1, 2]), 0);
        assert_eq!(eye.get(&[1, 1]), 1);
    }

    #[test]
    fn test_nnz_is_min_dimension() {
        let eye = IdentityTensor::<f64>::new(vec![4, 2, 3]).unwrap();
        assert_eq!(eye.nnz(), 2);
        let diag: Vec<Vec<usize>> = eye.entries().map(|(idx, _)| idx.to_vec()).collect();
        assert_eq!(diag, vec![vec![1, 1, 1], vec![2, 2, 2]]);
    }

    #[test]
    fn test_nnz_matches_full_scan() {
        let eye = IdentityTensor::<f64>::new(vec![3, 5]).unwrap();
        let scanned = eye
            .iter()
            .indices()
            .filter(|idx| eye.get(idx) != 0.0)
            .count();
        assert_eq!(scanned, eye.nnz());
    }

    #[test]
    fn test_diagonal_cursor_ends_stay_invalid() {
        let eye = IdentityTensor::<f64>::new(vec![2, 2]).unwrap();
        let mut itr = eye.nz_iter();
        assert!(itr.next());
        assert_eq!(itr.index(), &[2, 2]);
        assert!(!itr.next());
        assert!(!itr.prev());
        assert_eq!(itr.value(), None);

        let mut itr = eye.nz_iter();
        assert!(!itr.prev());
        assert!(!itr.valid());
    }
}
