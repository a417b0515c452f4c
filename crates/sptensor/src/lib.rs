//! # sptensor - Sparse Multidimensional Arrays
//!
//! Storage for N-mode tensors that keeps only their nonzero entries, behind
//! one access contract shared by every backend and every view.
//!
//! This is the **meta crate** that re-exports all sptensor components for
//! convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use sptensor::prelude::*;
//!
//! let mut coo = CooTensor::<f64>::new(vec![3, 4, 5])?;
//! coo.set(&[2, 3, 1], 44.0);
//! coo.set(&[2, 4, 4], 100.0);
//!
//! // the mode-0 == 2 slab is a 4x5 matrix
//! let slab = (&mut coo).slice(SliceSpec::full(&[3, 4, 5]).fix(0, 2))?;
//! assert_eq!(slab.dims(), &[4, 5]);
//! assert_eq!(slab.get(&[3, 1]), 44.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Tensor Interface ([`core`])
//!
//! 1-based coordinates, the [`Tensor`](core::Tensor) trait, bidirectional
//! full and nonzero cursors, errors.
//!
//! ### Storage Backends ([`sparse`])
//!
//! COO (linear search) and open hashing on arbitrary-precision coordinate
//! keys, plus the plain-text reader and writer.
//!
//! ```
//! use sptensor::sparse::{HashConfig, HashTensor};
//! use sptensor::core::Tensor;
//!
//! let config = HashConfig::new().initial_buckets(16);
//! let mut hash = HashTensor::<i64>::with_config(vec![100, 100, 100], config).unwrap();
//! hash.set(&[100, 1, 42], 7);
//! assert_eq!(hash.get(&[100, 1, 42]), 7);
//! ```
//!
//! ### View Algebra ([`view`])
//!
//! Dense materialization, identity, unfold, slice and transpose, composed by
//! coordinate translation; deep copies; pretty printing.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for configuration types

pub use sptensor_core as core;
pub use sptensor_sparse as sparse;
pub use sptensor_view as view;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use sptensor::prelude::*;
    //!
    //! let eye = IdentityTensor::<f64>::new(vec![4, 4]).unwrap();
    //! assert_eq!(eye.nnz(), 4);
    //! ```

    // Interface
    pub use crate::core::{
        Index, IndexIterator, NzIterator, Scalar, SptensorError, SptensorResult, Tensor,
        TensorIterator,
    };

    // Backends
    pub use crate::sparse::{CooTensor, HashConfig, HashTensor, ReadOptions};

    // Views
    pub use crate::view::{
        copy_into, deep_copy, DenseTensor, IdentityTensor, SliceSpec, SliceView, SpTensorView,
        TensorView, TransposeView, UnfoldView,
    };
}
