//! Unified error types for sparse tensor construction and I/O
//!
//! Element access (`get`/`set`) and iteration never fail; errors only arise
//! when a tensor, view or configuration is built from arguments that cannot
//! describe a valid object, or when a serialized tensor cannot be read.
//!
//! # Examples
//!
//! ```
//! use sptensor_core::error::{SptensorError, ValidationError};
//!
//! fn check(dims: &[usize]) -> Result<(), SptensorError> {
//!     if dims.is_empty() {
//!         return Err(ValidationError::EmptyShape.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(&[]).is_err());
//! assert!(check(&[3, 4]).is_ok());
//! ```

use thiserror::Error;

/// Top-level error type for all sptensor operations
#[derive(Error, Debug)]
pub enum SptensorError {
    /// Validation errors (shape, configuration, slice bounds)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Index and mode errors
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// Underlying reader/writer failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed text tensor input
    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Validation errors for tensor properties
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Shape cannot be empty")]
    EmptyShape,

    #[error("Shape cannot contain zeros")]
    ZeroInShape,

    #[error("Shape {dims:?} has more cells than fit in usize")]
    ShapeOverflow { dims: Vec<usize> },

    #[error("Invalid slice for mode {mode}: {reason}")]
    InvalidSlice { mode: usize, reason: String },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

/// Index errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndexError {
    #[error("Index out of bounds: index {index:?} exceeds shape {shape:?}")]
    OutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Mode {mode} out of range for a {nmodes}-mode tensor")]
    ModeOutOfRange { mode: usize, nmodes: usize },

    #[error("Index dimension mismatch: expected {expected}D, got {got}D")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Result type alias for sptensor operations
pub type SptensorResult<T> = Result<T, SptensorError>;

impl SptensorError {
    /// Create a parse error for the given 1-based line number
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        SptensorError::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Create a mode-out-of-range error
    pub fn mode_out_of_range(mode: usize, nmodes: usize) -> Self {
        SptensorError::Index(IndexError::ModeOutOfRange { mode, nmodes })
    }

    /// Create an invalid-configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        SptensorError::Validation(ValidationError::InvalidConfig {
            reason: reason.into(),
        })
    }
}
