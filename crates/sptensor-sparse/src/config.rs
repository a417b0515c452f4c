//! Construction options for backends and the text reader

use sptensor_core::{SptensorError, SptensorResult};

/// Default number of hash buckets
pub const DEFAULT_BUCKETS: usize = 128;

/// Default load factor at which the hash table doubles
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Configuration for [`HashTensor`](crate::HashTensor)
///
/// After every insertion the table doubles its bucket count once
/// `entries >= buckets * max_load_factor`.
///
/// # Examples
///
/// ```
/// use sptensor_sparse::HashConfig;
///
/// let config = HashConfig::new().initial_buckets(16).max_load_factor(2.0);
/// assert!(config.validate().is_ok());
/// assert_eq!(HashConfig::default().initial_buckets, 128);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HashConfig {
    /// Bucket count before the first rehash (default: 128)
    pub initial_buckets: usize,
    /// Entries-per-bucket ratio that triggers doubling (default: 0.75)
    pub max_load_factor: f64,
}

impl HashConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial bucket count
    pub fn initial_buckets(mut self, n: usize) -> Self {
        self.initial_buckets = n;
        self
    }

    /// Set the load factor that triggers a rehash
    pub fn max_load_factor(mut self, factor: f64) -> Self {
        self.max_load_factor = factor;
        self
    }

    /// Check that the configuration describes a usable table
    pub fn validate(&self) -> SptensorResult<()> {
        if self.initial_buckets == 0 {
            return Err(SptensorError::invalid_config(
                "initial_buckets must be at least 1",
            ));
        }
        if !self.max_load_factor.is_finite() || self.max_load_factor <= 0.0 {
            return Err(SptensorError::invalid_config(format!(
                "max_load_factor must be a positive finite number, got {}",
                self.max_load_factor
            )));
        }
        Ok(())
    }
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            initial_buckets: DEFAULT_BUCKETS,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

/// Options for the text tensor reader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReadOptions {
    /// Fail on a malformed data line instead of stopping there (default: false)
    pub strict: bool,
}

impl ReadOptions {
    /// Lenient reader: stop at the first malformed data line
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Strict reader: a malformed data line is a parse error
    pub fn strict() -> Self {
        Self { strict: true }
    }
}
