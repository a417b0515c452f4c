//! Mode-n unfolding (matricization)
//!
//! The unfolding of an N-mode tensor along mode `n` is the 2-mode view whose
//! row is the mode-`n` coordinate and whose column combines every other mode
//! in mixed radix, the first remaining mode varying fastest:
//!
//! ```text
//! col = 1 + sum_k (i_{m_k} - 1) * jk[k],   jk[0] = 1,   jk[k] = jk[k-1] * dim[m_{k-1}]
//! ```
//!
//! where `m_0 < m_1 < ...` are the modes other than `n`. The view has shape
//! `[dim[n], prod_{m != n} dim[m]]`.
//!
//! # Examples
//!
//! ```
//! use sptensor_core::Tensor;
//! use sptensor_sparse::CooTensor;
//! use sptensor_view::UnfoldView;
//!
//! let mut coo = CooTensor::<f64>::new(vec![3, 4, 2]).unwrap();
//! coo.set(&[2, 3, 2], 1.0);
//!
//! let unfolded = UnfoldView::new(&mut coo, 1).unwrap();
//! assert_eq!(unfolded.dims(), &[4, 6]);
//! // column = 1 + (2 - 1) * 1 + (2 - 1) * 3
//! assert_eq!(unfolded.get(&[3, 5]), 1.0);
//! ```

use smallvec::{smallvec, SmallVec};
use sptensor_core::{Index, SptensorError, SptensorResult, Tensor, ValidationError};

use crate::view::{Rebase, View};

/// Translation of a mode-n unfolding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unfold {
    mode: usize,
    source_nmodes: usize,
    /// Modes other than `mode`, ascending
    others: Vec<usize>,
    /// Column coefficient of each entry of `others`
    jk: Vec<usize>,
    dims: [usize; 2],
}

impl Unfold {
    pub(crate) fn new(source_dims: &[usize], mode: usize) -> SptensorResult<Self> {
        if mode >= source_dims.len() {
            return Err(SptensorError::mode_out_of_range(mode, source_dims.len()));
        }

        let others: Vec<usize> = (0..source_dims.len()).filter(|&m| m != mode).collect();
        let mut jk = Vec::with_capacity(others.len());
        let mut cols: usize = 1;
        for &m in &others {
            jk.push(cols);
            cols = cols
                .checked_mul(source_dims[m])
                .ok_or_else(|| ValidationError::ShapeOverflow {
                    dims: source_dims.to_vec(),
                })?;
        }

        Ok(Self {
            mode,
            source_nmodes: source_dims.len(),
            others,
            jk,
            dims: [source_dims[mode], cols],
        })
    }

    /// The unfolded (row) mode of the wrapped tensor
    pub fn mode(&self) -> usize {
        self.mode
    }

    /// Column coefficients of the remaining modes, in mode order
    pub fn coefficients(&self) -> &[usize] {
        &self.jk
    }
}

impl Rebase for Unfold {
    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn to(&self, index: &[usize]) -> Index {
        let mut out: Index = smallvec![0; self.source_nmodes];
        out[self.mode] = index[0];
        let mut j = index[1] - 1;
        for (&m, &c) in self.others.iter().zip(&self.jk).rev() {
            out[m] = j / c + 1;
            j %= c;
        }
        out
    }

    fn from(&self, index: &[usize]) -> Index {
        let col = self
            .others
            .iter()
            .zip(&self.jk)
            .map(|(&m, &c)| (index[m] - 1) * c)
            .sum::<usize>();
        SmallVec::from_slice(&[index[self.mode], col + 1])
    }
}

/// 2-mode unfolding of a wrapped tensor
pub type UnfoldView<V> = View<V, Unfold>;

impl<V: Tensor> View<V, Unfold> {
    /// Unfold `source` along 0-based `mode`
    ///
    /// # Errors
    ///
    /// Returns an error if `mode` is not a mode of `source`, or if the column
    /// extent does not fit in `usize`.
    pub fn new(source: V, mode: usize) -> SptensorResult<Self> {
        let rebase = Unfold::new(source.dims(), mode)?;
        Ok(View::rebased(source, rebase))
    }
}
