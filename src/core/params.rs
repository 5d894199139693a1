//! Filter configuration and derived layout parameters.
//!
//! A cuckoo filter is fully described by four numbers:
//!
//! | Parameter           | Effect                                              | Default   |
//! |---------------------|-----------------------------------------------------|-----------|
//! | `capacity`          | Target item count; only sizes the bucket array      | 1,000,000 |
//! | `bucket_size`       | Fingerprint slots per bucket                        | 4         |
//! | `fingerprint_size`  | Bits per fingerprint (false positive trade-off)     | 8         |
//! | `max_displacements` | Evictions attempted before an insert fails          | 500       |
//!
//! Everything else is derived:
//!
//! ```text
//! num_buckets      = max(1, capacity / bucket_size)
//! total_slots      = num_buckets * bucket_size
//! fingerprint_mask = 2^fingerprint_size - 1   (forced to 1 when that is 0)
//! ```
//!
//! # Examples
//!
//! ```
//! use cuckoocraft::CuckooConfig;
//!
//! let config = CuckooConfig::default()
//!     .with_capacity(10_000)
//!     .with_fingerprint_size(12);
//!
//! assert_eq!(config.num_buckets(), 2_500);
//! assert_eq!(config.fingerprint_mask(), 0xFFF);
//! assert!(config.validate().is_ok());
//! ```

#![allow(clippy::module_name_repetitions)]

use crate::error::{CuckooError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default target item count.
pub const DEFAULT_CAPACITY: usize = 1_000_000;

/// Default number of fingerprint slots per bucket.
pub const DEFAULT_BUCKET_SIZE: usize = 4;

/// Default fingerprint width in bits.
pub const DEFAULT_FINGERPRINT_SIZE: u32 = 8;

/// Default number of evictions before an insert is reported as failed.
pub const DEFAULT_MAX_DISPLACEMENTS: usize = 500;

/// Largest bucket size; per-bucket occupancy is stored in a `u8`.
pub const MAX_BUCKET_SIZE: usize = u8::MAX as usize;

/// Widest fingerprint; fingerprints are stored as `u32`.
pub const MAX_FINGERPRINT_SIZE: u32 = 32;

/// Immutable configuration of a cuckoo filter.
///
/// # False Negatives
///
/// The alternate bucket is `(i XOR mix(fp)) mod num_buckets`, which maps back
/// to `i` only when `num_buckets` is a power of two. With any other bucket
/// count (the defaults included: 1,000,000 / 4 = 250,000) a successful
/// eviction chain can move a fingerprint into a bucket its item never probes,
/// so an item whose insert returned `true` may later read as absent.
///
/// Choose `capacity / bucket_size` as a power of two when false negatives
/// matter; [`is_power_of_two_layout`](Self::is_power_of_two_layout) checks it.
///
/// ```
/// use cuckoocraft::CuckooConfig;
///
/// assert!(!CuckooConfig::default().is_power_of_two_layout());
/// assert!(CuckooConfig::default().with_capacity(1 << 20).is_power_of_two_layout());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CuckooConfig {
    /// Target number of storable items.
    pub capacity: usize,
    /// Fingerprint slots per bucket.
    pub bucket_size: usize,
    /// Bits per fingerprint.
    pub fingerprint_size: u32,
    /// Eviction attempts before an insert is reported as failed.
    pub max_displacements: usize,
}

impl Default for CuckooConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            bucket_size: DEFAULT_BUCKET_SIZE,
            fingerprint_size: DEFAULT_FINGERPRINT_SIZE,
            max_displacements: DEFAULT_MAX_DISPLACEMENTS,
        }
    }
}

impl CuckooConfig {
    /// Create a configuration from all four parameters.
    #[must_use]
    pub const fn new(
        capacity: usize,
        bucket_size: usize,
        fingerprint_size: u32,
        max_displacements: usize,
    ) -> Self {
        Self {
            capacity,
            bucket_size,
            fingerprint_size,
            max_displacements,
        }
    }

    /// Set the target item count.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the number of slots per bucket.
    #[must_use]
    pub const fn with_bucket_size(mut self, bucket_size: usize) -> Self {
        self.bucket_size = bucket_size;
        self
    }

    /// Set the fingerprint width in bits.
    #[must_use]
    pub const fn with_fingerprint_size(mut self, bits: u32) -> Self {
        self.fingerprint_size = bits;
        self
    }

    /// Set the eviction budget per insert.
    #[must_use]
    pub const fn with_max_displacements(mut self, max_displacements: usize) -> Self {
        self.max_displacements = max_displacements;
        self
    }

    /// Check that the configuration describes a usable filter.
    ///
    /// `capacity == 0`, `fingerprint_size == 0` and `max_displacements == 0`
    /// are all accepted; they degrade the filter but never break it.
    ///
    /// # Errors
    ///
    /// - [`CuckooError::InvalidBucketSize`] if `bucket_size` is not in `1..=255`
    /// - [`CuckooError::InvalidFingerprintSize`] if `fingerprint_size > 32`
    pub fn validate(&self) -> Result<()> {
        if self.bucket_size == 0 || self.bucket_size > MAX_BUCKET_SIZE {
            return Err(CuckooError::invalid_bucket_size(
                self.bucket_size,
                MAX_BUCKET_SIZE,
            ));
        }
        if self.fingerprint_size > MAX_FINGERPRINT_SIZE {
            return Err(CuckooError::invalid_fingerprint_size(
                self.fingerprint_size,
                MAX_FINGERPRINT_SIZE,
            ));
        }
        Ok(())
    }

    /// Number of buckets: `max(1, capacity / bucket_size)`.
    ///
    /// A zero `bucket_size` is treated as one so the value is always defined;
    /// [`validate`](Self::validate) rejects such configurations anyway.
    #[must_use]
    #[inline]
    pub const fn num_buckets(&self) -> usize {
        let per_bucket = if self.bucket_size == 0 { 1 } else { self.bucket_size };
        let buckets = self.capacity / per_bucket;
        if buckets == 0 {
            1
        } else {
            buckets
        }
    }

    /// Whether [`num_buckets`](Self::num_buckets) is a power of two.
    ///
    /// Only such layouts keep every evicted fingerprint inside its item's
    /// two candidate buckets.
    #[must_use]
    #[inline]
    pub const fn is_power_of_two_layout(&self) -> bool {
        self.num_buckets().is_power_of_two()
    }

    /// Total fingerprint slots: `num_buckets * bucket_size`.
    #[must_use]
    #[inline]
    pub const fn total_slots(&self) -> usize {
        self.num_buckets().saturating_mul(self.bucket_size)
    }

    /// Mask applied to the fingerprint hash.
    ///
    /// A width of zero would produce an all-zero mask, which leaves no
    /// non-zero fingerprint to store; it is forced to 1 instead.
    #[must_use]
    #[inline]
    pub const fn fingerprint_mask(&self) -> u32 {
        let mask = if self.fingerprint_size >= 32 {
            u32::MAX
        } else {
            (1u32 << self.fingerprint_size) - 1
        };
        if mask == 0 {
            1
        } else {
            mask
        }
    }

    /// Same `bucket_size`, `fingerprint_size` and `num_buckets`.
    ///
    /// These three values decide which bucket a fingerprint lives in and how
    /// it is encoded, so they must agree before buckets can be merged.
    #[must_use]
    pub const fn is_compatible(&self, other: &Self) -> bool {
        self.bucket_size == other.bucket_size
            && self.fingerprint_size == other.fingerprint_size
            && self.num_buckets() == other.num_buckets()
    }
}

/// Heuristic false positive estimate: `min(1, 2 * load / 2^f)`.
///
/// Two candidate buckets are probed per lookup, and each occupied slot
/// matches a foreign fingerprint with probability `2^-f`. This is a reporting
/// approximation, not a bound.
#[must_use]
pub fn estimate_fpr(load_factor: f64, fingerprint_size: u32) -> f64 {
    if load_factor <= 0.0 {
        return 0.0;
    }
    let base = (-(fingerprint_size as f64)).exp2();
    (base * load_factor * 2.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_documented_values() {
        let config = CuckooConfig::default();
        assert_eq!(config.capacity, 1_000_000);
        assert_eq!(config.bucket_size, 4);
        assert_eq!(config.fingerprint_size, 8);
        assert_eq!(config.max_displacements, 500);
        assert_eq!(config.num_buckets(), 250_000);
    }

    #[test]
    fn test_power_of_two_layout() {
        assert!(!CuckooConfig::default().is_power_of_two_layout());
        assert!(!CuckooConfig::default().with_capacity(10_000).is_power_of_two_layout());
        assert!(CuckooConfig::default().with_capacity(8_192).is_power_of_two_layout());
        assert!(CuckooConfig::default()
            .with_capacity(4_096)
            .with_bucket_size(2)
            .is_power_of_two_layout());
        // A single bucket is 2^0.
        assert!(CuckooConfig::default().with_capacity(0).is_power_of_two_layout());
    }

    #[test]
    fn test_num_buckets_floor_division() {
        assert_eq!(CuckooConfig::default().with_capacity(10).num_buckets(), 2);
        assert_eq!(CuckooConfig::default().with_capacity(11).num_buckets(), 2);
        assert_eq!(CuckooConfig::default().with_capacity(12).num_buckets(), 3);
    }

    #[test]
    fn test_num_buckets_never_zero() {
        assert_eq!(CuckooConfig::default().with_capacity(0).num_buckets(), 1);
        assert_eq!(CuckooConfig::default().with_capacity(3).num_buckets(), 1);
    }

    #[test]
    fn test_fingerprint_mask() {
        let config = CuckooConfig::default();
        assert_eq!(config.with_fingerprint_size(1).fingerprint_mask(), 1);
        assert_eq!(config.with_fingerprint_size(8).fingerprint_mask(), 0xFF);
        assert_eq!(config.with_fingerprint_size(16).fingerprint_mask(), 0xFFFF);
        assert_eq!(config.with_fingerprint_size(32).fingerprint_mask(), u32::MAX);
    }

    #[test]
    fn test_zero_width_fingerprint_mask_forced_to_one() {
        let config = CuckooConfig::default().with_fingerprint_size(0);
        assert_eq!(config.fingerprint_mask(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bucket_size() {
        let config = CuckooConfig::default();
        assert!(config.with_bucket_size(1).validate().is_ok());
        assert!(config.with_bucket_size(255).validate().is_ok());
        assert_eq!(
            config.with_bucket_size(0).validate(),
            Err(CuckooError::invalid_bucket_size(0, 255))
        );
        assert!(config.with_bucket_size(256).validate().is_err());
    }

    #[test]
    fn test_validate_fingerprint_size() {
        let config = CuckooConfig::default();
        assert!(config.with_fingerprint_size(32).validate().is_ok());
        assert_eq!(
            config.with_fingerprint_size(33).validate(),
            Err(CuckooError::invalid_fingerprint_size(33, 32))
        );
    }

    #[test]
    fn test_zero_displacements_is_valid() {
        assert!(CuckooConfig::default()
            .with_max_displacements(0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_is_compatible() {
        let a = CuckooConfig::new(1000, 4, 8, 500);
        assert!(a.is_compatible(&CuckooConfig::new(1003, 4, 8, 10)));
        assert!(!a.is_compatible(&CuckooConfig::new(1000, 2, 8, 500)));
        assert!(!a.is_compatible(&CuckooConfig::new(1000, 4, 12, 500)));
        assert!(!a.is_compatible(&CuckooConfig::new(2000, 4, 8, 500)));
    }

    #[test]
    fn test_estimate_fpr() {
        assert_eq!(estimate_fpr(0.0, 8), 0.0);
        let fpr = estimate_fpr(0.5, 8);
        assert!((fpr - 1.0 / 256.0).abs() < 1e-12);
        assert_eq!(estimate_fpr(1.0, 0), 1.0);
    }
}
