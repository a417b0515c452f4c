//! # sptensor-sparse
//!
//! Storage backends for sparse N-mode tensors.
//!
//! This crate provides:
//! - COO (Coordinate) backend: record list with linear search
//! - Hash backend: open hashing on arbitrary-precision coordinate keys with
//!   ordered buckets and automatic doubling
//! - Plain-text reader and writer usable with any [`Tensor`]
//!
//! Both backends elide zeros: a coordinate is stored only while it holds a
//! nonzero value.
//!
//! [`Tensor`]: sptensor_core::Tensor

pub mod config;
pub mod coo;
pub mod hash;
pub mod io;

// Re-exports
pub use config::*;
pub use coo::*;
pub use hash::*;
pub use io::{read_coo, read_hash, read_tensor, write_tensor};
