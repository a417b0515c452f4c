//! Open-hash sparse tensor backend
//!
//! Each coordinate is encoded into a single arbitrary-precision integer key
//! with a mixed-radix (row-major) mapping over the dimension vector, so two
//! distinct coordinates never share a key regardless of bucket count. The
//! `(key, value)` items live in `key mod nbuckets` buckets, each kept in
//! ascending key order.
//!
//! # Search
//!
//! [`HashTensor::search`] is a hash search on vectors: it picks the bucket
//! and binary-searches it, returning either the position of the key or the
//! position where it would be inserted to keep the bucket ordered.
//!
//! # Growth
//!
//! After every insertion, once `entries >= nbuckets * max_load_factor` the
//! bucket count doubles and every item is redistributed. Lookups by
//! coordinate are stable across a rehash; bucket positions are not.
//!
//! # Examples
//!
//! ```
//! use sptensor_core::Tensor;
//! use sptensor_sparse::{HashConfig, HashTensor};
//!
//! let config = HashConfig::new().initial_buckets(2);
//! let mut hash = HashTensor::<f64>::with_config(vec![10, 10], config).unwrap();
//! for i in 1..=10 {
//!     hash.set(&[i, i], i as f64);
//! }
//! assert!(hash.nbuckets() > 2);
//! assert_eq!(hash.get(&[7, 7]), 7.0);
//! assert_eq!(hash.nnz(), 10);
//! ```

use num_bigint::BigUint;
use smallvec::smallvec;

use sptensor_core::index::{self, Index};
use sptensor_core::{NzIterator, Scalar, SptensorResult, Tensor, TensorIterator};

use crate::config::HashConfig;

/// One `(key, value)` item of a hash bucket
#[derive(Debug, Clone, PartialEq)]
pub struct HashItem<T> {
    /// Encoded coordinate
    pub key: BigUint,
    /// Nonzero value
    pub value: T,
}

/// Result of [`HashTensor::search`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashSlot {
    /// Bucket selected by `key mod nbuckets`
    pub bucket: usize,
    /// Position of the key, or its insertion point when absent
    pub position: usize,
    /// Whether the key is stored
    pub found: bool,
}

/// Sparse tensor stored in an open hash table keyed on encoded coordinates
#[derive(Debug, Clone)]
pub struct HashTensor<T> {
    dims: Vec<usize>,
    buckets: Vec<Vec<HashItem<T>>>,
    curr_size: usize,
    config: HashConfig,
}

impl<T: Scalar> HashTensor<T> {
    /// Create an empty hash tensor with the default configuration
    pub fn new(dims: Vec<usize>) -> SptensorResult<Self> {
        Self::with_config(dims, HashConfig::default())
    }

    /// Create an empty hash tensor
    ///
    /// # Errors
    ///
    /// Returns an error if the shape or the configuration is invalid.
    pub fn with_config(dims: Vec<usize>, config: HashConfig) -> SptensorResult<Self> {
        index::validate_dims(&dims)?;
        config.validate()?;
        Ok(Self {
            buckets: empty_buckets(config.initial_buckets),
            dims,
            curr_size: 0,
            config,
        })
    }

    /// Copy the nonzero entries of any tensor into a new hash tensor
    pub fn from_tensor<S>(source: &S, config: HashConfig) -> SptensorResult<Self>
    where
        S: Tensor<Value = T> + ?Sized,
    {
        let mut hash = Self::with_config(source.dims().to_vec(), config)?;
        for (idx, value) in source.entries() {
            hash.set(&idx, value);
        }
        Ok(hash)
    }

    /// Mixed-radix key of a coordinate
    pub fn encode(&self, index: &[usize]) -> BigUint {
        debug_assert_eq!(index.len(), self.dims.len());
        let mut key = BigUint::default();
        for (&i, &d) in index.iter().zip(&self.dims) {
            key = key * BigUint::from(d) + BigUint::from(i - 1);
        }
        key
    }

    /// Coordinate of a key produced by [`encode`](Self::encode)
    pub fn decode(&self, key: &BigUint) -> Index {
        let mut rest = key.clone();
        let mut index: Index = smallvec![0; self.dims.len()];
        for (k, &d) in self.dims.iter().enumerate().rev() {
            let radix = BigUint::from(d);
            index[k] = small(&(&rest % &radix)) + 1;
            rest /= radix;
        }
        index
    }

    /// Locate `index`: its bucket and either its position or insertion point
    pub fn search(&self, index: &[usize]) -> HashSlot {
        self.locate(index).1
    }

    /// Current bucket count
    pub fn nbuckets(&self) -> usize {
        self.buckets.len()
    }

    /// Stored entries per bucket
    pub fn load_factor(&self) -> f64 {
        self.curr_size as f64 / self.buckets.len() as f64
    }

    /// Configuration this table was built with
    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Items of one bucket, in ascending key order
    pub fn bucket(&self, bucket: usize) -> &[HashItem<T>] {
        &self.buckets[bucket]
    }

    fn locate(&self, index: &[usize]) -> (BigUint, HashSlot) {
        let key = self.encode(index);
        let bucket = bucket_of(&key, self.buckets.len());
        let searched = self.buckets[bucket].binary_search_by(|item| item.key.cmp(&key));
        let (position, found) = match searched {
            Ok(pos) => (pos, true),
            Err(pos) => (pos, false),
        };
        (
            key,
            HashSlot {
                bucket,
                position,
                found,
            },
        )
    }

    fn needs_rehash(&self) -> bool {
        self.curr_size as f64 >= self.buckets.len() as f64 * self.config.max_load_factor
    }

    /// Double the bucket count and redistribute every item
    fn rehash(&mut self) {
        let old = self.buckets.len();
        let mut buckets = empty_buckets::<T>(old * 2);
        for item in std::mem::take(&mut self.buckets).into_iter().flatten() {
            let target = &mut buckets[bucket_of(&item.key, old * 2)];
            let pos = target
                .binary_search_by(|held| held.key.cmp(&item.key))
                .unwrap_or_else(|pos| pos);
            target.insert(pos, item);
        }
        self.buckets = buckets;
        log::debug!(
            "rehashed {} entries: {} -> {} buckets",
            self.curr_size,
            old,
            self.buckets.len()
        );
    }
}

impl<T: Scalar> Tensor for HashTensor<T> {
    type Value = T;

    fn dims(&self) -> &[usize] {
        &self.dims
    }

    fn get(&self, index: &[usize]) -> T {
        let (_, slot) = self.locate(index);
        if slot.found {
            self.buckets[slot.bucket][slot.position].value.clone()
        } else {
            T::zero()
        }
    }

    fn set(&mut self, index: &[usize], value: T) {
        debug_assert!(index::in_bounds(index, &self.dims));
        let (key, slot) = self.locate(index);
        let bucket = &mut self.buckets[slot.bucket];
        match (slot.found, value.is_zero()) {
            (false, true) => {}
            (true, true) => {
                bucket.remove(slot.position);
                self.curr_size -= 1;
            }
            (true, false) => bucket[slot.position].value = value,
            (false, false) => {
                bucket.insert(slot.position, HashItem { key, value });
                self.curr_size += 1;
                if self.needs_rehash() {
                    self.rehash();
                }
            }
        }
    }

    fn nz_iter(&self) -> Box<dyn NzIterator<T> + '_> {
        let mut itr = HashNzIter {
            tensor: self,
            pos: self.next_occupied(0).map(|b| (b, 0)),
            index: Index::new(),
        };
        itr.load_index();
        Box::new(itr)
    }

    fn nnz(&self) -> usize {
        self.curr_size
    }
}

impl<T> HashTensor<T> {
    fn next_occupied(&self, from: usize) -> Option<usize> {
        (from..self.buckets.len()).find(|&b| !self.buckets[b].is_empty())
    }

    fn prev_occupied(&self, before: usize) -> Option<usize> {
        (0..before).rev().find(|&b| !self.buckets[b].is_empty())
    }
}

/// Nonzero cursor: buckets in index order, keys ascending within a bucket
pub struct HashNzIter<'a, T> {
    tensor: &'a HashTensor<T>,
    pos: Option<(usize, usize)>,
    index: Index,
}

impl<T: Scalar> HashNzIter<'_, T> {
    fn load_index(&mut self) {
        if let Some((b, p)) = self.pos {
            self.index = self.tensor.decode(&self.tensor.buckets[b][p].key);
        }
    }
}

impl<T: Scalar> TensorIterator for HashNzIter<'_, T> {
    fn valid(&self) -> bool {
        self.pos.is_some()
    }

    fn next(&mut self) -> bool {
        self.pos = self.pos.and_then(|(b, p)| {
            if p + 1 < self.tensor.buckets[b].len() {
                Some((b, p + 1))
            } else {
                self.tensor.next_occupied(b + 1).map(|nb| (nb, 0))
            }
        });
        self.load_index();
        self.pos.is_some()
    }

    fn prev(&mut self) -> bool {
        self.pos = self.pos.and_then(|(b, p)| {
            if p > 0 {
                Some((b, p - 1))
            } else {
                self.tensor
                    .prev_occupied(b)
                    .map(|pb| (pb, self.tensor.buckets[pb].len() - 1))
            }
        });
        self.load_index();
        self.pos.is_some()
    }

    fn index(&self) -> &[usize] {
        &self.index
    }
}

impl<T: Scalar> NzIterator<T> for HashNzIter<'_, T> {
    fn value(&self) -> Option<T> {
        self.pos.map(|(b, p)| self.tensor.buckets[b][p].value.clone())
    }
}

fn empty_buckets<T>(n: usize) -> Vec<Vec<HashItem<T>>> {
    (0..n).map(|_| Vec::new()).collect()
}

fn bucket_of(key: &BigUint, nbuckets: usize) -> usize {
    small(&(key % BigUint::from(nbuckets)))
}

/// Narrow a value already known to be below some `usize` bound
fn small(value: &BigUint) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sample(config: HashConfig) -> HashTensor<f64> {
        let mut hash = HashTensor::with_config(vec![3, 4, 5], config).unwrap();
        hash.set(&[1, 1, 1], 99.0);
        hash.set(&[2, 3, 1], 44.0);
        hash.set(&[2, 4, 4], 100.0);
        hash.set(&[3, 2, 2], 1.0);
        hash
    }

    #[test]
    fn test_encode_decode() {
        let hash = HashTensor::<f64>::new(vec![3, 4, 5]).unwrap();
        assert_eq!(hash.encode(&[1, 1, 1]), BigUint::default());
        assert_eq!(hash.encode(&[3, 4, 5]), BigUint::from(59u32));
        for idx in hash.iter().indices() {
            let key = hash.encode(&idx);
            assert_eq!(hash.decode(&key), idx);
        }
    }

    #[test]
    fn test_encode_is_injective_beyond_u64() {
        let dims = vec![1 << 20; 4];
        let hash = HashTensor::<f64>::new(dims).unwrap();
        let a = hash.encode(&[1 << 20, 1 << 20, 1 << 20, 1 << 20]);
        let b = hash.encode(&[1 << 20, 1 << 20, 1 << 20, (1 << 20) - 1]);
        assert_ne!(a, b);
        assert!(a.bits() > 64);
        assert_eq!(&hash.decode(&a)[..], &[1 << 20, 1 << 20, 1 << 20, 1 << 20]);
    }

    #[test]
    fn test_get_set() {
        let hash = sample(HashConfig::default());
        assert_eq!(hash.get(&[2, 4, 4]), 100.0);
        assert_eq!(hash.get(&[1, 1, 2]), 0.0);
        assert_eq!(hash.nnz(), 4);
    }

    #[test]
    fn test_search_found_and_insertion_point() {
        let hash = sample(HashConfig::new().initial_buckets(1).max_load_factor(100.0));
        let slot = hash.search(&[2, 3, 1]);
        assert!(slot.found);
        assert_eq!(slot.bucket, 0);
        // keys 0, 30, 38, 46 in one bucket
        assert_eq!(slot.position, 1);

        let missing = hash.search(&[2, 1, 1]); // key 20
        assert!(!missing.found);
        assert_eq!(missing.position, 1);
    }

    #[test]
    fn test_buckets_stay_ordered() {
        let mut hash = HashTensor::<f64>::with_config(
            vec![20, 20],
            HashConfig::new().initial_buckets(3).max_load_factor(1000.0),
        )
        .unwrap();
        for i in (1..=20).rev() {
            hash.set(&[i, 21 - i], i as f64);
        }
        for b in 0..hash.nbuckets() {
            let keys: Vec<&BigUint> = hash.bucket(b).iter().map(|item| &item.key).collect();
            assert!(keys.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_zero_elision() {
        let mut hash = sample(HashConfig::default());
        hash.set(&[2, 3, 1], 0.0);
        assert_eq!(hash.nnz(), 3);
        assert_eq!(hash.get(&[2, 3, 1]), 0.0);
        hash.set(&[2, 3, 1], 0.0);
        assert_eq!(hash.nnz(), 3);
    }

    #[test]
    fn test_overwrite() {
        let mut hash = sample(HashConfig::default());
        hash.set(&[3, 2, 2], -5.0);
        assert_eq!(hash.get(&[3, 2, 2]), -5.0);
        assert_eq!(hash.nnz(), 4);
    }

    #[test]
    fn test_rehash_threshold() {
        let config = HashConfig::new().initial_buckets(4).max_load_factor(0.75);
        let mut hash = HashTensor::<f64>::with_config(vec![10, 10], config).unwrap();
        hash.set(&[1, 1], 1.0);
        hash.set(&[1, 2], 2.0);
        assert_eq!(hash.nbuckets(), 4);
        // 3 >= 4 * 0.75
        hash.set(&[1, 3], 3.0);
        assert_eq!(hash.nbuckets(), 8);
        // overwriting does not count as an insertion
        hash.set(&[1, 3], 4.0);
        assert_eq!(hash.nbuckets(), 8);
        for (j, v) in [(1, 1.0), (2, 2.0), (3, 4.0)] {
            assert_eq!(hash.get(&[1, j]), v);
        }
    }

    #[test]
    fn test_values_survive_many_rehashes() {
        let config = HashConfig::new().initial_buckets(1);
        let mut hash = HashTensor::<i64>::with_config(vec![50, 50], config).unwrap();
        for i in 1..=50 {
            for j in (1..=50).step_by(7) {
                hash.set(&[i, j], (i * 100 + j) as i64);
            }
        }
        assert!(hash.nbuckets() >= 512);
        assert!(hash.load_factor() < 0.75);
        for i in 1..=50 {
            for j in (1..=50).step_by(7) {
                assert_eq!(hash.get(&[i, j]), (i * 100 + j) as i64);
            }
        }
    }

    #[test]
    fn test_nz_iter_visits_each_once() {
        let hash = sample(HashConfig::new().initial_buckets(2));
        let seen: BTreeSet<Vec<usize>> = hash.entries().map(|(idx, _)| idx.to_vec()).collect();
        let expected: BTreeSet<Vec<usize>> = [
            vec![1, 1, 1],
            vec![2, 3, 1],
            vec![2, 4, 4],
            vec![3, 2, 2],
        ]
        .into_iter()
        .collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_nz_iter_backwards() {
        let hash = sample(HashConfig::new().initial_buckets(5).max_load_factor(10.0));
        let forward: Vec<Vec<usize>> = hash.entries().map(|(idx, _)| idx.to_vec()).collect();

        let mut itr = hash.nz_iter();
        while itr.next() {}
        assert!(!itr.valid());

        // walk back from the last element
        let mut itr = hash.nz_iter();
        for _ in 1..forward.len() {
            itr.next();
        }
        let mut backward = vec![itr.index().to_vec()];
        while itr.prev() {
            backward.push(itr.index().to_vec());
        }
        backward.reverse();
        assert_eq!(backward, forward);
    }

    #[test]
    fn test_empty_nz_iter() {
        let hash = HashTensor::<f64>::new(vec![4]).unwrap();
        let itr = hash.nz_iter();
        assert!(!itr.valid());
        assert_eq!(itr.value(), None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = HashConfig::new().initial_buckets(0);
        assert!(HashTensor::<f64>::with_config(vec![2], config).is_err());
        assert!(HashTensor::<f64>::new(vec![0]).is_err());
    }
}
