//! Builder for cuckoo filters.
//!
//! # Type-State Pattern
//!
//! ```text
//! Initial ──.capacity()──→ Complete ──.build()──→ CuckooFilter
//! ```
//!
//! Everything except `capacity` is optional and can be set in either state.
//!
//! # Examples
//!
//! ## Minimal Configuration
//!
//! ```
//! use cuckoocraft::builder::CuckooFilterBuilder;
//!
//! let filter = CuckooFilterBuilder::new()
//!     .capacity(10_000)
//!     .build()
//!     .unwrap();
//! assert_eq!(filter.num_buckets(), 2_500);
//! ```
//!
//! ## Full Configuration
//!
//! ```
//! use cuckoocraft::builder::CuckooFilterBuilder;
//! use cuckoocraft::hash::StdHasher;
//!
//! let filter = CuckooFilterBuilder::new()
//!     .capacity(10_000)
//!     .bucket_size(8)
//!     .fingerprint_size(16)
//!     .max_displacements(1_000)
//!     .hasher(StdHasher::new())
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! assert_eq!(filter.bucket_size(), 8);
//! ```

use super::validation;
use crate::core::params::{
    CuckooConfig, DEFAULT_BUCKET_SIZE, DEFAULT_FINGERPRINT_SIZE, DEFAULT_MAX_DISPLACEMENTS,
};
use crate::error::Result;
use crate::filters::CuckooFilter;
use crate::hash::{DefaultHasher, FilterHasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::marker::PhantomData;

/// Type-state marker: capacity not set yet.
pub struct Initial;

/// Type-state marker: all required parameters set.
pub struct Complete;

/// Builder for [`CuckooFilter`] with type-state guarantees.
///
/// # Type Parameters
///
/// - `State`: Current builder state
/// - `H`: Hash function type
pub struct CuckooFilterBuilder<State, H = DefaultHasher> {
    capacity: usize,
    bucket_size: usize,
    fingerprint_size: u32,
    target_fpr: Option<f64>,
    max_displacements: usize,
    seed: Option<u64>,
    hasher: H,
    _state: PhantomData<State>,
}

impl CuckooFilterBuilder<Initial, DefaultHasher> {
    /// Create a builder with the default layout (4 slots, 8 bits, 500 kicks).
    #[must_use]
    pub fn new() -> Self {
        Self {
            capacity: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            fingerprint_size: DEFAULT_FINGERPRINT_SIZE,
            target_fpr: None,
            max_displacements: DEFAULT_MAX_DISPLACEMENTS,
            seed: None,
            hasher: DefaultHasher::new(),
            _state: PhantomData,
        }
    }
}

impl Default for CuckooFilterBuilder<Initial, DefaultHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> CuckooFilterBuilder<Initial, H> {
    /// Set the target item count.
    ///
    /// Required. Transitions to `Complete`. Prefer a value where
    /// `capacity / bucket_size` is a power of two; see
    /// [`CuckooFilter`](crate::CuckooFilter#false-negatives).
    #[must_use]
    pub fn capacity(self, capacity: usize) -> CuckooFilterBuilder<Complete, H> {
        CuckooFilterBuilder {
            capacity,
            bucket_size: self.bucket_size,
            fingerprint_size: self.fingerprint_size,
            target_fpr: self.target_fpr,
            max_displacements: self.max_displacements,
            seed: self.seed,
            hasher: self.hasher,
            _state: PhantomData,
        }
    }
}

impl<S, H> CuckooFilterBuilder<S, H> {
    /// Set the number of fingerprint slots per bucket (1-255).
    #[must_use]
    pub fn bucket_size(mut self, bucket_size: usize) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Set the fingerprint width in bits (0-32).
    ///
    /// Overrides an earlier [`false_positive_rate`](Self::false_positive_rate).
    #[must_use]
    pub fn fingerprint_size(mut self, bits: u32) -> Self {
        self.fingerprint_size = bits;
        self.target_fpr = None;
        self
    }

    /// Derive the fingerprint width from a target false positive rate at 95% load.
    ///
    /// Picks the narrowest width whose estimate `2 * 0.95 / 2^f` is at or
    /// below `fp_rate`. Overrides an earlier
    /// [`fingerprint_size`](Self::fingerprint_size).
    ///
    /// ```
    /// use cuckoocraft::builder::CuckooFilterBuilder;
    ///
    /// let filter = CuckooFilterBuilder::new()
    ///     .capacity(1_000)
    ///     .false_positive_rate(0.001)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.fingerprint_size(), 11);
    /// ```
    #[must_use]
    pub fn false_positive_rate(mut self, fp_rate: f64) -> Self {
        self.target_fpr = Some(fp_rate);
        self
    }

    /// Set the eviction budget per insert.
    #[must_use]
    pub fn max_displacements(mut self, max_displacements: usize) -> Self {
        self.max_displacements = max_displacements;
        self
    }

    /// Seed the eviction random source for reproducible layouts.
    ///
    /// Without a seed, [`build`](CuckooFilterBuilder::build) seeds from entropy.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the hash function.
    #[must_use]
    pub fn hasher<H2>(self, hasher: H2) -> CuckooFilterBuilder<S, H2> {
        CuckooFilterBuilder {
            capacity: self.capacity,
            bucket_size: self.bucket_size,
            fingerprint_size: self.fingerprint_size,
            target_fpr: self.target_fpr,
            max_displacements: self.max_displacements,
            seed: self.seed,
            hasher,
            _state: PhantomData,
        }
    }
}

impl<H: FilterHasher> CuckooFilterBuilder<Complete, H> {
    /// Resolve and validate the configuration without building a filter.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `bucket_size` is not in `1..=255`
    /// - `fingerprint_size > 32`
    /// - a target false positive rate is not in `(0, 1)`
    pub fn build_config(&self) -> Result<CuckooConfig> {
        let fingerprint_size = match self.target_fpr {
            Some(fp_rate) => validation::fingerprint_size_for(fp_rate)?,
            None => self.fingerprint_size,
        };
        let config = CuckooConfig::new(
            self.capacity,
            self.bucket_size,
            fingerprint_size,
            self.max_displacements,
        );
        config.validate()?;
        Ok(config)
    }

    /// Build the filter with a [`ChaCha8Rng`] seeded from [`seed`](Self::seed)
    /// or from entropy.
    ///
    /// # Errors
    ///
    /// See [`build_config`](Self::build_config).
    pub fn build(self) -> Result<CuckooFilter<H, ChaCha8Rng>> {
        let rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        self.build_with_rng(rng)
    }

    /// Build the filter with an injected random source. Any `seed` is ignored.
    ///
    /// # Errors
    ///
    /// See [`build_config`](Self::build_config).
    pub fn build_with_rng<R: Rng>(self, rng: R) -> Result<CuckooFilter<H, R>> {
        let config = self.build_config()?;
        tracing::debug!(
            capacity = config.capacity,
            num_buckets = config.num_buckets(),
            bucket_size = config.bucket_size,
            fingerprint_size = config.fingerprint_size,
            hasher = self.hasher.name(),
            "building CuckooFilter"
        );
        CuckooFilter::with_hasher_and_rng(config, self.hasher, rng)
    }
}
