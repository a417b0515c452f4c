//! # sptensor-view
//!
//! Zero-copy views and derived tensors for sptensor backends.
//!
//! This crate provides:
//! - [`SpTensorView`]: a backend behind the view interface, plus the owning
//!   allocator [`SpTensorView::alloc`]
//! - [`DenseTensor`]: every cell stored, stride-addressed
//! - [`IdentityTensor`]: immutable superdiagonal of ones
//! - [`UnfoldView`]: mode-n matricization
//! - [`SliceView`] with [`SliceSpec`]: fixed modes and sub-ranges
//! - [`TransposeView`]: two modes swapped
//! - [`deep_copy`] / [`copy_into`]: materialize any tensor or view
//! - [`print::pretty_print`]: grid rendering
//!
//! Every item here implements [`Tensor`](sptensor_core::Tensor), so views
//! wrap backends or other views interchangeably. Views hold no values; they
//! translate coordinates and delegate.

pub mod copy;
pub mod dense;
pub mod identity;
pub mod print;
pub mod slice;
pub mod transpose;
pub mod unfold;
pub mod view;
pub mod wrap;

// Re-exports
pub use copy::{copy_into, deep_copy};
pub use dense::{DenseNzIter, DenseTensor};
pub use identity::{DiagonalIter, IdentityTensor};
pub use slice::{Slice, SliceSpec, SliceView};
pub use transpose::{Transpose, TransposeView};
pub use unfold::{Unfold, UnfoldView};
pub use view::{Rebase, TensorView, View, ViewNzIter};
pub use wrap::{SpTensorView, Wrap};
