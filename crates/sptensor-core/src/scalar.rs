//! Value type constraints for tensor elements
//!
//! Storage only needs an additive identity, a zero test, equality and
//! ordering, plus text conversion for the serialized format. Arithmetic
//! beyond that is the caller's business, so any `Num` type qualifies,
//! including arbitrary-precision rationals.

use std::fmt;
use std::str::FromStr;

use scirs2_core::numeric::Num;

/// Element type stored in a tensor.
///
/// The additive identity (`Zero::zero()`) is never stored: writing it removes
/// the entry.
pub trait Scalar: Num + Clone + PartialOrd + fmt::Debug + fmt::Display + FromStr {}

impl<T> Scalar for T where T: Num + Clone + PartialOrd + fmt::Debug + fmt::Display + FromStr {}
