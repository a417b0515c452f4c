//! Bidirectional cursors over tensor coordinates
//!
//! Tensors expose two kinds of cursor:
//!
//! - the **full** cursor ([`IndexIterator`]) visits every addressable
//!   coordinate in row-major order, independent of storage;
//! - the **nonzero** cursor ([`NzIterator`]) visits only stored entries, in
//!   an order chosen by the backend.
//!
//! A cursor starts positioned on its first element (or invalid when there is
//! none). `next`/`prev` move it and report the new validity. Moving past
//! either end invalidates it permanently; the index of an invalid cursor is
//! unspecified.
//!
//! [`Indices`] and [`Entries`] adapt cursors to `std::iter::Iterator`.
//!
//! # Examples
//!
//! ```
//! use sptensor_core::iter::{IndexIterator, TensorIterator};
//!
//! let mut itr = IndexIterator::new(&[2, 2]);
//! assert_eq!(itr.index(), &[1, 1]);
//! assert!(itr.next());
//! assert_eq!(itr.index(), &[1, 2]);
//! assert!(itr.prev());
//! assert!(!itr.prev());
//! assert!(!itr.valid());
//!
//! let all: Vec<_> = IndexIterator::new(&[2, 2]).indices().collect();
//! assert_eq!(all.len(), 4);
//! ```

use crate::index::{first, Index};

/// Cursor over tensor coordinates
pub trait TensorIterator {
    /// Whether the cursor is on an addressable position
    fn valid(&self) -> bool;

    /// Advance one position; returns the new validity
    fn next(&mut self) -> bool;

    /// Retreat one position; returns the new validity
    fn prev(&mut self) -> bool;

    /// Coordinate at the current position
    fn index(&self) -> &[usize];

    /// Forward `std` iterator over the remaining coordinates
    fn indices(self) -> Indices<Self>
    where
        Self: Sized,
    {
        Indices {
            inner: self,
            started: false,
        }
    }
}

/// Cursor over stored (nonzero) entries
pub trait NzIterator<T>: TensorIterator {
    /// Value stored at the current position, `None` once invalid
    fn value(&self) -> Option<T>;
}

impl<I: TensorIterator + ?Sized> TensorIterator for Box<I> {
    fn valid(&self) -> bool {
        (**self).valid()
    }

    fn next(&mut self) -> bool {
        (**self).next()
    }

    fn prev(&mut self) -> bool {
        (**self).prev()
    }

    fn index(&self) -> &[usize] {
        (**self).index()
    }
}

impl<T, I: NzIterator<T> + ?Sized> NzIterator<T> for Box<I> {
    fn value(&self) -> Option<T> {
        (**self).value()
    }
}

/// Row-major enumerator of every coordinate in the cross-product of `dims`
///
/// The last mode varies fastest. The cursor owns a copy of the dimensions,
/// so it is independent of the tensor that produced it.
#[derive(Debug, Clone)]
pub struct IndexIterator {
    dims: Index,
    index: Index,
    valid: bool,
}

impl IndexIterator {
    /// Cursor positioned on `(1, ..., 1)`
    pub fn new(dims: &[usize]) -> Self {
        Self {
            dims: dims.iter().copied().collect(),
            index: first(dims.len()),
            valid: !dims.is_empty() && !dims.contains(&0),
        }
    }

    /// Cursor positioned on the last coordinate `dims`
    pub fn last(dims: &[usize]) -> Self {
        let mut itr = Self::new(dims);
        itr.index = itr.dims.clone();
        itr
    }

    /// Return to the first coordinate
    pub fn reset(&mut self) {
        self.index = first(self.dims.len());
        self.valid = !self.dims.is_empty() && !self.dims.contains(&0);
    }

    /// Dimensions being enumerated
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }
}

impl TensorIterator for IndexIterator {
    fn valid(&self) -> bool {
        self.valid
    }

    fn next(&mut self) -> bool {
        if !self.valid {
            return false;
        }
        for k in (0..self.dims.len()).rev() {
            if self.index[k] < self.dims[k] {
                self.index[k] += 1;
                return true;
            }
            self.index[k] = 1;
        }
        self.valid = false;
        false
    }

    fn prev(&mut self) -> bool {
        if !self.valid {
            return false;
        }
        for k in (0..self.dims.len()).rev() {
            if self.index[k] > 1 {
                self.index[k] -= 1;
                return true;
            }
            self.index[k] = self.dims[k];
        }
        self.valid = false;
        false
    }

    fn index(&self) -> &[usize] {
        &self.index
    }
}

/// `std` iterator over the coordinates of a cursor
pub struct Indices<I> {
    inner: I,
    started: bool,
}

impl<I: TensorIterator> Iterator for Indices<I> {
    type Item = Index;

    fn next(&mut self) -> Option<Index> {
        if self.started {
            TensorIterator::next(&mut self.inner);
        }
        self.started = true;
        if self.inner.valid() {
            Some(self.inner.index().iter().copied().collect())
        } else {
            None
        }
    }
}

/// `std` iterator over the `(coordinate, value)` pairs of a nonzero cursor
pub struct Entries<'a, T> {
    inner: Box<dyn NzIterator<T> + 'a>,
    started: bool,
}

impl<'a, T> Entries<'a, T> {
    pub fn new(inner: Box<dyn NzIterator<T> + 'a>) -> Self {
        Self {
            inner,
            started: false,
        }
    }
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (Index, T);

    fn next(&mut self) -> Option<(Index, T)> {
        if self.started {
            TensorIterator::next(&mut *self.inner);
        }
        self.started = true;
        let value = self.inner.value()?;
        Some((self.inner.index().iter().copied().collect(), value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_order() {
        let all: Vec<Index> = IndexIterator::new(&[2, 3]).indices().collect();
        let expected: Vec<Vec<usize>> = vec![
            vec![1, 1],
            vec![1, 2],
            vec![1, 3],
            vec![2, 1],
            vec![2, 2],
            vec![2, 3],
        ];
        assert_eq!(all.len(), expected.len());
        for (got, want) in all.iter().zip(&expected) {
            assert_eq!(&got[..], &want[..]);
        }
    }

    #[test]
    fn test_past_end_invalidates() {
        let mut itr = IndexIterator::new(&[2]);
        assert!(itr.next());
        assert!(!itr.next());
        assert!(!itr.valid());
        // an invalid cursor stays invalid
        assert!(!itr.prev());
        assert!(!itr.next());
    }

    #[test]
    fn test_backward_walk() {
        let mut itr = IndexIterator::last(&[2, 2, 2]);
        let mut count = 1;
        while itr.prev() {
            count += 1;
        }
        assert_eq!(count, 8);
    }

    #[test]
    fn test_prev_borrows() {
        let mut itr = IndexIterator::new(&[3, 4]);
        for _ in 0..4 {
            itr.next();
        }
        assert_eq!(itr.index(), &[2, 1]);
        assert!(itr.prev());
        assert_eq!(itr.index(), &[1, 4]);
    }

    #[test]
    fn test_reset() {
        let mut itr = IndexIterator::new(&[1, 1]);
        assert!(!itr.next());
        itr.reset();
        assert!(itr.valid());
        assert_eq!(itr.index(), &[1, 1]);
    }

    #[test]
    fn test_degenerate_dims() {
        assert!(!IndexIterator::new(&[]).valid());
        assert!(!IndexIterator::new(&[3, 0]).valid());
        assert_eq!(IndexIterator::new(&[0]).indices().count(), 0);
    }
}
