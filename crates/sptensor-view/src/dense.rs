//! Dense tensor materialization
//!
//! [`DenseTensor`] stores every cell of its shape, zero or not, in one
//! row-major buffer addressed through per-mode stride multipliers
//! (`mul[k] = dims[k+1] * ... * dims[n-1]`). It answers `get`/`set` in O(1)
//! and is the natural target when a sparse result must be handed to dense
//! code. Counting or walking its nonzeros requires a full scan.

use sptensor_core::index::{self, Index};
use sptensor_core::{
    NzIterator, Scalar, SptensorResult, Tensor, TensorIterator, ValidationError,
};
use sptensor_sparse::CooTensor;

/// Tensor storing every cell of its shape
#[derive(Debug, Clone, PartialEq)]
pub struct DenseTensor<T> {
    dims: Vec<usize>,
    mul: Vec<usize>,
    data: Vec<T>,
}

impl<T: Scalar> DenseTensor<T> {
    /// All-zero tensor of the given shape
    ///
    /// # Errors
    ///
    /// Returns an error if `dims` is empty, contains a zero, or has more
    /// cells than fit in `usize`.
    pub fn zeros(dims: Vec<usize>) -> SptensorResult<Self> {
        index::validate_dims(&dims)?;
        let size = index::cardinality(&dims)
            .ok_or_else(|| ValidationError::ShapeOverflow { dims: dims.clone() })?;
        Ok(Self {
            mul: index::strides(&dims),
            data: vec![T::zero(); size],
            dims,
        })
    }

    /// Materialize any tensor cell by cell
    pub fn from_tensor<S>(source: &S) -> SptensorResult<Self>
    where
        S: Tensor<Value = T> + ?Sized,
    {
        let mut dense = Self::zeros(source.dims().to_vec())?;
        for (idx, value) in source.entries() {
            dense.set(&idx, value);
        }
        Ok(dense)
    }

    /// Sparse copy holding only the nonzero cells, in row-major order
    pub fn to_coo(&self) -> SptensorResult<CooTensor<T>> {
        CooTensor::from_tensor(self)
    }

    /// Stride multipliers, one per mode
    pub fn strides(&self) -> &[usize] {
        &self.mul
    }

    /// Row-major cell buffer
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    fn offset(&self, index: &[usize]) -> usize {
        debug_assert!(index::in_bounds(index, &self.dims));
        index
            .iter()
            .zip(&self.mul)
            .map(|(&i, &m)| (i - 1) * m)
            .sum()
    }
}

impl<T: Scalar> Tensor for DenseTensor<T> {
    type Value = T;

    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn get(&self, index: &[usize]) -> T {
        self.data[self.offset(index)].clone()
    }

    fn set(&mut self, index: &[usize], value: T) {
        let offset = self.offset(index);
        self.data[offset] = value;
    }

    fn nz_iter(&self) -> Box<dyn NzIterator<T> + '_> {
        let pos = self.data.iter().position(|v| !v.is_zero());
        Box::new(DenseNzIter {
            tensor: self,
            index: pos
                .map(|p| index::delinearize(p, &self.dims))
                .unwrap_or_default(),
            pos,
        })
    }

    fn nnz(&self) -> usize {
        self.data.iter().filter(|v| !v.is_zero()).count()
    }
}

/// Nonzero cursor scanning the cell buffer, skipping zero cells
pub struct DenseNzIter<'a, T> {
    tensor: &'a DenseTensor<T>,
    pos: Option<usize>,
    index: Index,
}

impl<T: Scalar> DenseNzIter<'_, T> {
    fn settle(&mut self, pos: Option<usize>) -> bool {
        self.pos = pos;
        if let Some(p) = pos {
            self.index = index::delinearize(p, &self.tensor.dims);
        }
        pos.is_some()
    }
}

impl<T: Scalar> TensorIterator for DenseNzIter<'_, T> {
    fn valid(&self) -> bool {
        self.pos.is_some()
    }

    fn next(&mut self) -> bool {
        let data = &self.tensor.data;
        let pos = self
            .pos
            .and_then(|p| (p + 1..data.len()).find(|&q| !data[q].is_zero()));
        self.settle(pos)
    }

    fn prev(&mut self) -> bool {
        let data = &self.tensor.data;
        let pos = self
            .pos
            .and_then(|p| (0..p).rev().find(|&q| !data[q].is_zero()));
        self.settle(pos)
    }

    fn index(&self) -> &[usize] {
        &self.index
    }
}

impl<T: Scalar> NzIterator<T> for DenseNzIter<'_, T> {
    fn value(&self) -> Option<T> {
        self.pos.map(|p| self.tensor.data[p].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides() {
        let dense = DenseTensor::<f64>::zeros(vec![3, 4, 5]).unwrap();
        assert_eq!(dense.strides(), &[20, 5, 1]);
        assert_eq!(dense.as_slice().len(), 60);
    }

    #[test]
    fn test_get_set_offsets() {
        let mut dense = DenseTensor::<f64>::zeros(vec![3, 4, 5]).unwrap();
        dense.set(&[2, 3, 1], 44.0);
        assert_eq!(dense.as_slice()[30], 44.0);
        assert_eq!(dense.get(&[2, 3, 1]), 44.0);
        assert_eq!(dense.get(&[3, 4, 5]), 0.0);
    }

    #[test]
    fn test_zero_cells_are_kept_but_not_counted() {
        let mut dense = DenseTensor::<i64>::zeros(vec![2, 2]).unwrap();
        dense.set(&[1, 1], 3);
        dense.set(&[2, 2], 4);
        assert_eq!(dense.nnz(), 2);
        dense.set(&[1, 1], 0);
        assert_eq!(dense.nnz(), 1);
        assert_eq!(dense.as_slice().len(), 4);
    }

    #[test]
    fn test_nz_iter_skips_zeros_both_ways() {
        let mut dense = DenseTensor::<f64>::zeros(vec![2, 3]).unwrap();
        dense.set(&[1, 2], 1.0);
        dense.set(&[2, 3], 2.0);

        let mut itr = dense.nz_iter();
        assert_eq!(itr.index(), &[1, 2]);
        assert!(itr.next());
        assert_eq!(itr.index(), &[2, 3]);
        assert_eq!(itr.value(), Some(2.0));
        assert!(itr.prev());
        assert_eq!(itr.index(), &[1, 2]);
        assert!(!itr.prev());
        assert!(!itr.valid());
    }

    #[test]
    fn test_shape_too_large_is_rejected() {
        let err = DenseTensor::<f64>::zeros(vec![2, usize::MAX / 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            sptensor_core::SptensorError::Validation(ValidationError::ShapeOverflow { .. })
        ));
    }

    #[test]
    fn test_all_zero_has_no_nonzeros() {
        let dense = DenseTensor::<f64>::zeros(vec![4, 4]).unwrap();
        assert!(!dense.nz_iter().valid());
        assert_eq!(dense.nnz(), 0);
    }

    #[test]
    fn test_materialize_and_back() {
        let coo = CooTensor::from_entries(
            vec![3, 4, 5],
            vec![([3, 2, 2], 1.0), ([1, 1, 1], 99.0), ([2, 4, 4], 100.0)],
        )
        .unwrap();
        let dense = DenseTensor::from_tensor(&coo).unwrap();
        for idx in coo.iter().indices() {
            assert_eq!(dense.get(&idx), coo.get(&idx));
        }

        // row-major order after the round trip
        let back = dense.to_coo().unwrap();
        let order: Vec<Vec<usize>> = back.records().iter().map(|e| e.index.to_vec()).collect();
        assert_eq!(order, vec![vec![1, 1, 1], vec![2, 4, 4], vec![3, 2, 2]]);
    }
}
