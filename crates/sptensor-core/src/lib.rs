//! # sptensor-core
//!
//! Coordinate model, element trait and the polymorphic tensor interface
//! shared by every sptensor backend and view.
//!
//! This crate provides:
//!
//! - **Coordinates** ([`Index`]) with lexicographic order and row-major
//!   linearization
//! - **Element trait** ([`Scalar`]) for stored values
//! - **Tensor interface** ([`Tensor`]) with `get`/`set`, a full row-major
//!   cursor and a nonzero cursor
//! - **Cursors** ([`IndexIterator`], [`NzIterator`]) and `std` iterator
//!   adapters
//! - **Errors** ([`SptensorError`]) for construction and I/O
//!
//! ## Conventions
//!
//! Coordinates are **1-based**: a tensor with `dims = [3, 4]` is addressed by
//! `[1..=3, 1..=4]`. Zero is represented by absence: setting a coordinate to
//! zero removes it, and reading an absent coordinate yields zero.
//!
//! ## Quick Start
//!
//! ```
//! use sptensor_core::{IndexIterator, TensorIterator};
//!
//! let mut itr = IndexIterator::new(&[2, 3]);
//! let mut visited = 0;
//! while itr.valid() {
//!     visited += 1;
//!     itr.next();
//! }
//! assert_eq!(visited, 6);
//! ```

pub mod error;
pub mod index;
pub mod iter;
pub mod scalar;
pub mod tensor;

pub use error::{IndexError, SptensorError, SptensorResult, ValidationError};
pub use index::Index;
pub use iter::{Entries, IndexIterator, Indices, NzIterator, TensorIterator};
pub use scalar::Scalar;
pub use tensor::Tensor;
