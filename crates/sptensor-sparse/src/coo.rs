//! COO (Coordinate) sparse tensor backend
//!
//! The Coordinate backend stores a sparse tensor as an unordered list of
//! `(coordinate, value)` records. Access is a **linear scan** comparing full
//! coordinates, so `get`/`set` cost O(nnz); it is the simplest backend and
//! the baseline the hash backend trades off against.
//!
//! # Invariants
//!
//! - No two records share a coordinate.
//! - No record holds zero: setting zero removes the record, shifting the
//!   trailing records left.
//! - New records are appended, so nonzero iteration follows insertion order
//!   (minus removals).
//!
//! # Examples
//!
//! ```
//! use sptensor_core::Tensor;
//! use sptensor_sparse::coo::CooTensor;
//!
//! let mut coo = CooTensor::<f64>::new(vec![3, 4, 5]).unwrap();
//! coo.set(&[1, 1, 1], 99.0);
//! coo.set(&[2, 3, 1], 44.0);
//! assert_eq!(coo.nnz(), 2);
//! assert_eq!(coo.get(&[2, 3, 1]), 44.0);
//! assert_eq!(coo.get(&[1, 1, 2]), 0.0);
//!
//! // zero-elision
//! coo.set(&[1, 1, 1], 0.0);
//! assert_eq!(coo.nnz(), 1);
//! ```

use sptensor_core::index::{self, Index};
use sptensor_core::{
    IndexError, NzIterator, Scalar, SptensorError, SptensorResult, Tensor, TensorIterator,
};

/// One stored record of a [`CooTensor`]
#[derive(Debug, Clone, PartialEq)]
pub struct CooEntry<T> {
    /// 1-based coordinate
    pub index: Index,
    /// Nonzero value
    pub value: T,
}

/// COO (Coordinate) sparse tensor
///
/// Flexible and cheap to append to, but every lookup scans all records.
#[derive(Debug, Clone)]
pub struct CooTensor<T> {
    /// Stored records, in insertion order
    entries: Vec<CooEntry<T>>,

    /// Shape of the tensor
    dims: Vec<usize>,
}

impl<T: Scalar> CooTensor<T> {
    /// Create an empty COO tensor with the given dimensions
    ///
    /// # Errors
    ///
    /// Returns an error if `dims` is empty or contains a zero.
    pub fn new(dims: Vec<usize>) -> SptensorResult<Self> {
        index::validate_dims(&dims)?;
        Ok(Self {
            entries: Vec::new(),
            dims,
        })
    }

    /// Build a COO tensor by replaying `(coordinate, value)` pairs through `set`
    ///
    /// Later pairs overwrite earlier ones at the same coordinate; zero values
    /// remove.
    ///
    /// # Errors
    ///
    /// Returns an error if the shape is invalid, or any coordinate has the
    /// wrong arity or lies outside `dims`.
    pub fn from_entries<I, C>(dims: Vec<usize>, entries: I) -> SptensorResult<Self>
    where
        I: IntoIterator<Item = (C, T)>,
        C: AsRef<[usize]>,
    {
        let mut coo = Self::new(dims)?;
        for (idx, value) in entries {
            let idx = idx.as_ref();
            check_index(idx, &coo.dims)?;
            coo.set(idx, value);
        }
        Ok(coo)
    }

    /// Copy the nonzero entries of any tensor into a new COO tensor
    pub fn from_tensor<S>(source: &S) -> SptensorResult<Self>
    where
        S: Tensor<Value = T> + ?Sized,
    {
        let mut coo = Self::new(source.dims().to_vec())?;
        for (idx, value) in source.entries() {
            coo.set(&idx, value);
        }
        Ok(coo)
    }

    /// Position of `index` in the record list (linear search)
    pub fn position(&self, index: &[usize]) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.index.as_slice() == index)
    }

    /// Stored records in nonzero-iteration order
    pub fn records(&self) -> &[CooEntry<T>] {
        &self.entries
    }

    /// Compute density (nnz / total_elements)
    pub fn density(&self) -> f64 {
        let cells: f64 = self.dims.iter().map(|&d| d as f64).product();
        self.entries.len() as f64 / cells
    }

    /// Sort records in row-major (lexicographic coordinate) order
    ///
    /// Nonzero iteration follows the new order afterwards.
    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| index::index_cmp(&a.index, &b.index));
    }

    /// Remove every record
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T: Scalar> Tensor for CooTensor<T> {
    type Value = T;

    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn get(&self, index: &[usize]) -> T {
        match self.position(index) {
            Some(pos) => self.entries[pos].value.clone(),
            None => T::zero(),
        }
    }

    fn set(&mut self, index: &[usize], value: T) {
        debug_assert!(index::in_bounds(index, &self.dims));
        match (self.position(index), value.is_zero()) {
            (None, true) => {}
            (None, false) => self.entries.push(CooEntry {
                index: index.iter().copied().collect(),
                value,
            }),
            (Some(pos), true) => {
                self.entries.remove(pos);
            }
            (Some(pos), false) => self.entries[pos].value = value,
        }
    }

    fn nz_iter(&self) -> Box<dyn NzIterator<T> + '_> {
        Box::new(CooNzIter {
            entries: &self.entries,
            pos: if self.entries.is_empty() { None } else { Some(0) },
        })
    }

    fn nnz(&self) -> usize {
        self.entries.len()
    }
}

/// Nonzero cursor walking the record list by position
pub struct CooNzIter<'a, T> {
    entries: &'a [CooEntry<T>],
    pos: Option<usize>,
}

impl<T> TensorIterator for CooNzIter<'_, T> {
    fn valid(&self) -> bool {
        self.pos.is_some()
    }

    fn next(&mut self) -> bool {
        self.pos = self.pos.map(|p| p + 1).filter(|&p| p < self.entries.len());
        self.pos.is_some()
    }

    fn prev(&mut self) -> bool {
        self.pos = self.pos.and_then(|p| p.checked_sub(1));
        self.pos.is_some()
    }

    fn index(&self) -> &[usize] {
        match self.pos {
            Some(p) => self.entries[p].index.as_slice(),
            None => &[],
        }
    }
}

impl<T: Clone> NzIterator<T> for CooNzIter<'_, T> {
    fn value(&self) -> Option<T> {
        self.pos.map(|p| self.entries[p].value.clone())
    }
}

/// Arity and bounds check used by the validating constructors
pub(crate) fn check_index(idx: &[usize], dims: &[usize]) -> SptensorResult<()> {
    if idx.len() != dims.len() {
        return Err(SptensorError::Index(IndexError::DimensionMismatch {
            expected: dims.len(),
            got: idx.len(),
        }));
    }
    if !index::in_bounds(idx, dims) {
        return Err(SptensorError::Index(IndexError::OutOfBounds {
            index: idx.to_vec(),
            shape: dims.to_vec(),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CooTensor<f64> {
        CooTensor::from_entries(
            vec![3, 4, 5],
            vec![
                ([1, 1, 1], 99.0),
                ([2, 3, 1], 44.0),
                ([2, 4, 4], 100.0),
                ([3, 2, 2], 1.0),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_coo_creation() {
        let coo = CooTensor::<f64>::new(vec![3, 4]).unwrap();
        assert_eq!(coo.nnz(), 0);
        assert_eq!(coo.dims(), &[3, 4]);
        assert_eq!(coo.nmodes(), 2);
    }

    #[test]
    fn test_coo_invalid_shape() {
        assert!(CooTensor::<f64>::new(vec![]).is_err());
        assert!(CooTensor::<f64>::new(vec![3, 0]).is_err());
    }

    #[test]
    fn test_from_entries_rejects_bad_index() {
        let out_of_range = CooTensor::from_entries(vec![2, 2], vec![([3, 1], 1.0)]);
        assert!(matches!(
            out_of_range,
            Err(SptensorError::Index(IndexError::OutOfBounds { .. }))
        ));

        let wrong_arity = CooTensor::from_entries(vec![2, 2], vec![(vec![1, 1, 1], 1.0)]);
        assert!(matches!(
            wrong_arity,
            Err(SptensorError::Index(IndexError::DimensionMismatch { .. }))
        ));
    }

    #[test]
    fn test_nz_iter_insertion_order() {
        let coo = sample();
        let got: Vec<(Vec<usize>, f64)> = coo
            .entries()
            .map(|(idx, v)| (idx.to_vec(), v))
            .collect();
        assert_eq!(
            got,
            vec![
                (vec![1, 1, 1], 99.0),
                (vec![2, 3, 1], 44.0),
                (vec![2, 4, 4], 100.0),
                (vec![3, 2, 2], 1.0),
            ]
        );
    }

    #[test]
    fn test_absent_is_zero() {
        let coo = sample();
        assert_eq!(coo.get(&[1, 1, 2]), 0.0);
        assert_eq!(coo.get(&[3, 4, 5]), 0.0);
    }

    #[test]
    fn test_overwrite_in_place() {
        let mut coo = sample();
        coo.set(&[2, 3, 1], 7.0);
        assert_eq!(coo.nnz(), 4);
        assert_eq!(coo.get(&[2, 3, 1]), 7.0);
        assert_eq!(coo.position(&[2, 3, 1]), Some(1));
    }

    #[test]
    fn test_zero_removes_and_shifts() {
        let mut coo = sample();
        coo.set(&[2, 3, 1], 0.0);
        assert_eq!(coo.nnz(), 3);
        assert_eq!(coo.get(&[2, 3, 1]), 0.0);
        assert_eq!(coo.position(&[2, 4, 4]), Some(1));
        assert!(coo.entries().all(|(idx, _)| idx.as_slice() != [2, 3, 1]));
    }

    #[test]
    fn test_zero_on_absent_is_noop() {
        let mut coo = sample();
        coo.set(&[1, 2, 3], 0.0);
        assert_eq!(coo.nnz(), 4);
    }

    #[test]
    fn test_nz_cursor_both_directions() {
        let coo = sample();
        let mut itr = coo.nz_iter();
        assert!(itr.valid());
        assert!(itr.next());
        assert!(itr.next());
        assert!(itr.next());
        assert_eq!(itr.index(), &[3, 2, 2]);
        assert!(!itr.next());
        assert!(!itr.valid());
        assert_eq!(itr.value(), None);

        let mut itr = coo.nz_iter();
        assert!(itr.next());
        assert!(itr.prev());
        assert_eq!(itr.index(), &[1, 1, 1]);
        assert_eq!(itr.value(), Some(99.0));
        assert!(!itr.prev());
        assert!(!itr.next());
    }

    #[test]
    fn test_empty_nz_iter() {
        let coo = CooTensor::<f64>::new(vec![2, 2]).unwrap();
        assert!(!coo.nz_iter().valid());
        assert_eq!(coo.entries().count(), 0);
    }

    #[test]
    fn test_sort_row_major() {
        let mut coo = CooTensor::from_entries(
            vec![3, 3],
            vec![([3, 1], 1.0), ([1, 2], 2.0), ([2, 1], 3.0)],
        )
        .unwrap();
        coo.sort();
        let order: Vec<Vec<usize>> = coo.records().iter().map(|e| e.index.to_vec()).collect();
        assert_eq!(order, vec![vec![1, 2], vec![2, 1], vec![3, 1]]);
    }

    #[test]
    fn test_density() {
        let coo = CooTensor::from_entries(vec![10, 10], vec![([1, 1], 1.0), ([2, 2], 2.0)])
            .unwrap();
        assert_eq!(coo.density(), 0.02);
    }

    #[test]
    fn test_density_of_huge_shape() {
        let mut coo = CooTensor::<f64>::new(vec![usize::MAX / 2, 4]).unwrap();
        coo.set(&[1, 1], 1.0);
        let density = coo.density();
        assert!(density > 0.0 && density < 1e-18);
    }

    #[test]
    fn test_from_tensor_copies() {
        let coo = sample();
        let copy = CooTensor::from_tensor(&coo).unwrap();
        assert_eq!(copy.nnz(), 4);
        assert_eq!(copy.get(&[2, 4, 4]), 100.0);
    }

    #[test]
    fn test_integer_values() {
        let mut coo = CooTensor::<i64>::new(vec![2, 2]).unwrap();
        coo.set(&[1, 2], -3);
        assert_eq!(coo.get(&[1, 2]), -3);
        coo.set(&[1, 2], 0);
        assert_eq!(coo.nnz(), 0);
    }
}
