//! Two-mode transposition
//!
//! Swapping modes `i` and `j` is its own inverse, so `to` and `from` are the
//! same map and transposing twice with the same pair restores the wrapped
//! coordinates.

use sptensor_core::{Index, SptensorError, SptensorResult, Tensor};

use crate::view::{Rebase, View};

/// Translation swapping two modes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transpose {
    modes: (usize, usize),
    dims: Vec<usize>,
}

impl Transpose {
    pub(crate) fn new(source_dims: &[usize], i: usize, j: usize) -> SptensorResult<Self> {
        let nmodes = source_dims.len();
        if let Some(&bad) = [i, j].iter().find(|&&m| m >= nmodes) {
            return Err(SptensorError::mode_out_of_range(bad, nmodes));
        }
        let mut dims = source_dims.to_vec();
        dims.swap(i, j);
        Ok(Self {
            modes: (i, j),
            dims,
        })
    }

    /// The swapped pair of 0-based modes
    pub fn modes(&self) -> (usize, usize) {
        self.modes
    }

    fn swap(&self, index: &[usize]) -> Index {
        let mut out = Index::from_slice(index);
        out.swap(self.modes.0, self.modes.1);
        out
    }
}

impl Rebase for Transpose {
    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn to(&self, index: &[usize]) -> Index {
        self.swap(index)
    }

    fn from(&self, index: &[usize]) -> Index {
        self.swap(index)
    }
}

/// Wrapped tensor with two modes swapped
pub type TransposeView<V> = View<V, Transpose>;

impl<V: Tensor> View<V, Transpose> {
    /// Swap 0-based modes `i` and `j` of `source`
    ///
    /// # Errors
    ///
    /// Returns an error if either mode is not a mode of `source`.
    pub fn new(source: V, i: usize, j: usize) -> SptensorResult<Self> {
        let rebase = Transpose::new(source.dims(), i, j)?;
        Ok(View::rebased(source, rebase))
    }
}
