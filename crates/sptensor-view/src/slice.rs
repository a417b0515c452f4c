//! Slices of a wrapped tensor
//!
//! A [`SliceSpec`] gives, for every mode of the wrapped tensor, either a
//! fixed coordinate or an inclusive `begin..=end` range. Fixed modes vanish
//! from the view; a free mode `k` appears with extent `end - begin + 1` and
//! view coordinate `i` maps to `i - 1 + begin`.
//!
//! # Examples
//!
//! ```
//! use sptensor_core::Tensor;
//! use sptensor_sparse::CooTensor;
//! use sptensor_view::{SliceSpec, SliceView};
//!
//! let mut coo = CooTensor::<f64>::new(vec![3, 4, 5]).unwrap();
//! coo.set(&[2, 3, 1], 44.0);
//! coo.set(&[1, 3, 1], 7.0);
//!
//! // the mode-0 == 2 slab, columns 2..=4 of mode 1
//! let spec = SliceSpec::full(coo.dims()).fix(0, 2).range(1, 2, 4);
//! let slab = SliceView::new(&mut coo, spec).unwrap();
//! assert_eq!(slab.dims(), &[3, 5]);
//! assert_eq!(slab.get(&[2, 1]), 44.0);
//! assert_eq!(slab.nnz(), 1);
//! ```

use sptensor_core::{Index, SptensorResult, Tensor, ValidationError};

use crate::view::{Rebase, View};

/// Per-mode selection: fixed coordinate or inclusive range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceSpec {
    fixed: Vec<Option<usize>>,
    begin: Vec<usize>,
    end: Vec<usize>,
}

impl SliceSpec {
    /// Selection of the whole tensor: nothing fixed, full ranges
    pub fn full(dims: &[usize]) -> Self {
        Self {
            fixed: vec![None; dims.len()],
            begin: vec![1; dims.len()],
            end: dims.to_vec(),
        }
    }

    /// Pin `mode` to `value`, removing it from the view
    ///
    /// A `mode` outside the selection is reported when the view is built.
    pub fn fix(mut self, mode: usize, value: usize) -> Self {
        self.grow(mode);
        self.fixed[mode] = Some(value);
        self
    }

    /// Restrict `mode` to `begin..=end` and make it free again
    pub fn range(mut self, mode: usize, begin: usize, end: usize) -> Self {
        self.grow(mode);
        self.fixed[mode] = None;
        self.begin[mode] = begin;
        self.end[mode] = end;
        self
    }

    /// Number of modes this selection addresses
    pub fn nmodes(&self) -> usize {
        self.fixed.len()
    }

    // modes past the initial shape start with the empty range 1..=0
    fn grow(&mut self, mode: usize) {
        if mode >= self.fixed.len() {
            self.fixed.resize(mode + 1, None);
            self.begin.resize(mode + 1, 1);
            self.end.resize(mode + 1, 0);
        }
    }

    /// Fixed coordinate of `mode`, if pinned
    pub fn fixed(&self, mode: usize) -> Option<usize> {
        self.fixed.get(mode).copied().flatten()
    }

    /// Inclusive range of a free `mode`
    pub fn bounds(&self, mode: usize) -> (usize, usize) {
        (self.begin[mode], self.end[mode])
    }

    /// Whether a wrapped-space coordinate is selected
    pub fn contains(&self, index: &[usize]) -> bool {
        index.iter().enumerate().all(|(k, &i)| match self.fixed[k] {
            Some(f) => i == f,
            None => self.begin[k] <= i && i <= self.end[k],
        })
    }

    fn validate(&self, dims: &[usize]) -> SptensorResult<()> {
        let invalid = |mode: usize, reason: String| ValidationError::InvalidSlice { mode, reason };

        if self.nmodes() != dims.len() {
            return Err(invalid(
                self.nmodes().min(dims.len()),
                format!(
                    "selection has {} modes, tensor has {}",
                    self.nmodes(),
                    dims.len()
                ),
            )
            .into());
        }
        for (k, &d) in dims.iter().enumerate() {
            match self.fixed[k] {
                Some(f) if f == 0 || f > d => {
                    return Err(invalid(k, format!("fixed value {} outside 1..={}", f, d)).into())
                }
                Some(_) => {}
                None => {
                    let (b, e) = self.bounds(k);
                    if b == 0 || b > e || e > d {
                        return Err(
                            invalid(k, format!("range {}..={} outside 1..={}", b, e, d)).into()
                        );
                    }
                }
            }
        }
        if self.fixed.iter().all(Option::is_some) {
            return Err(invalid(0, "every mode is fixed".to_string()).into());
        }
        Ok(())
    }
}

/// Translation of a slice: fixed modes pinned, free modes offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    spec: SliceSpec,
    dims: Vec<usize>,
}

impl Slice {
    pub(crate) fn new(source_dims: &[usize], spec: SliceSpec) -> SptensorResult<Self> {
        spec.validate(source_dims)?;
        let dims = (0..source_dims.len())
            .filter(|&k| spec.fixed[k].is_none())
            .map(|k| spec.end[k] - spec.begin[k] + 1)
            .collect();
        Ok(Self { spec, dims })
    }

    /// The selection this view was built from
    pub fn spec(&self) -> &SliceSpec {
        &self.spec
    }
}

impl Rebase for Slice {
    const FILTERS: bool = true;

    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn to(&self, index: &[usize]) -> Index {
        let mut free = index.iter();
        self.spec
            .fixed
            .iter()
            .zip(&self.spec.begin)
            .map(|(fixed, &b)| match fixed {
                Some(f) => *f,
                None => free.next().map_or(b, |&i| i - 1 + b),
            })
            .collect()
    }

    fn from(&self, index: &[usize]) -> Index {
        index
            .iter()
            .zip(&self.spec.fixed)
            .zip(&self.spec.begin)
            .filter(|((_, fixed), _)| fixed.is_none())
            .map(|((&i, _), &b)| i + 1 - b)
            .collect()
    }

    fn contains(&self, index: &[usize]) -> bool {
        self.spec.contains(index)
    }
}

/// Sub-tensor of a wrapped tensor selected by a [`SliceSpec`]
pub type SliceView<V> = View<V, Slice>;

impl<V: Tensor> View<V, Slice> {
    /// Slice `source` with `spec`
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSlice`] if the selection does not
    /// match the tensor's arity, a fixed value or range falls outside its
    /// dimensions, or every mode is fixed.
    pub fn new(source: V, spec: SliceSpec) -> SptensorResult<Self> {
        let rebase = Slice::new(source.dims(), spec)?;
        Ok(View::rebased(source, rebase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sptensor_core::{SptensorError, TensorIterator};
    use sptensor_sparse::CooTensor;

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
    fn test_fixed_mode_slab() {
        let mut coo = sample();
        let spec = SliceSpec::full(coo.dims()).fix(0, 2);
        let slab = SliceView::new(&mut coo, spec).unwrap();
        assert_eq!(slab.dims(), &[4, 5]);
        assert_eq!(slab.nnz(), 2);
        assert_eq!(slab.get(&[3, 1]), 44.0);
        assert_eq!(slab.get(&[4, 4]), 100.0);
        assert_eq!(slab.get(&[1, 1]), 0.0);

        let got: Vec<Vec<usize>> = slab.entries().map(|(idx, _)| idx.to_vec()).collect();
        assert_eq!(got, vec![vec![3, 1], vec![4, 4]]);
    }

    #[test]
    fn test_range_offsets() {
        let slice = Slice::new(&[3, 4, 5], SliceSpec::full(&[3, 4, 5]).range(2, 2, 4)).unwrap();
        assert_eq!(slice.dims(), &[3, 4, 3]);
        assert_eq!(&slice.to(&[1, 1, 1])[..], &[1, 1, 2]);
        assert_eq!(&slice.from(&[3, 4, 4])[..], &[3, 4, 3]);
        assert!(!slice.contains(&[1, 1, 1]));
        assert!(slice.contains(&[1, 1, 4]));
    }

    #[test]
    fn test_translation_round_trip() {
        let spec = SliceSpec::full(&[4, 4, 4]).fix(1, 3).range(2, 2, 3);
        let slice = Slice::new(&[4, 4, 4], spec).unwrap();
        assert_eq!(slice.dims(), &[4, 2]);
        for i in 1..=4 {
            for j in 1..=2 {
                let wrapped = slice.to(&[i, j]);
                assert!(slice.contains(&wrapped));
                assert_eq!(&slice.from(&wrapped)[..], &[i, j]);
            }
        }
    }

    #[test]
    fn test_write_through_slice() {
        let mut coo = sample();
        {
            let mut slab = SliceView::new(&mut coo, SliceSpec::full(&[3, 4, 5]).fix(2, 5)).unwrap();
            slab.set(&[1, 4], 3.0);
            assert_eq!(slab.nnz(), 1);
        }
        assert_eq!(coo.get(&[1, 4, 5]), 3.0);
    }

    #[test]
    fn test_nz_cursor_skips_outside_entries() {
        let coo = sample();
        let slab = SliceView::new(coo, SliceSpec::full(&[3, 4, 5]).range(0, 2, 3)).unwrap();
        let mut itr = slab.nz_iter();
        assert_eq!(itr.index(), &[1, 3, 1]);
        assert!(itr.next());
        assert!(itr.next());
        assert_eq!(itr.index(), &[2, 2, 2]);
        assert!(itr.prev());
        assert_eq!(itr.index(), &[1, 4, 4]);
        assert!(itr.prev());
        // (1, 1, 1) lies outside the slice
        assert!(!itr.prev());
        assert!(!itr.valid());
    }

    #[test]
    fn test_invalid_specs() {
        let dims = [3, 4];
        let cases = [
            SliceSpec::full(&dims).fix(0, 4),
            SliceSpec::full(&dims).fix(0, 0),
            SliceSpec::full(&dims).range(1, 3, 2),
            SliceSpec::full(&dims).range(1, 0, 2),
            SliceSpec::full(&dims).range(1, 2, 5),
            SliceSpec::full(&dims).fix(0, 1).fix(1, 1),
            SliceSpec::full(&dims).fix(2, 1),
            SliceSpec::full(&[3, 4, 5]),
        ];
        for spec in cases {
            assert!(matches!(
                Slice::new(&dims, spec),
                Err(SptensorError::Validation(ValidationError::InvalidSlice { .. }))
            ));
        }
    }

    #[test]
    fn test_range_unfixes_mode() {
        let spec = SliceSpec::full(&[3, 3]).fix(0, 2).range(0, 1, 2);
        assert_eq!(spec.fixed(0), None);
        assert_eq!(spec.bounds(0), (1, 2));
    }
}
