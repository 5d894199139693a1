//! Error types for CuckooCraft operations.
//!
//! Errors are reserved for construction and validation. The normal outcomes
//! of a cuckoo filter are plain values: a full filter makes
//! [`insert`](crate::CuckooFilter::insert) return `false`, and a union of
//! incompatible filters returns `None`.
//!
//! # Error Propagation
//!
//! ```
//! use cuckoocraft::{CuckooConfig, CuckooFilter, Result};
//!
//! fn small_filter() -> Result<CuckooFilter> {
//!     let config = CuckooConfig::default().with_capacity(1_000).with_fingerprint_size(12);
//!     CuckooFilter::with_seed(config, 7)
//! }
//! # assert!(small_filter().is_ok());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for CuckooCraft operations.
pub type Result<T> = std::result::Result<T, CuckooError>;

/// Errors that can occur while configuring a cuckoo filter.
///
/// `Clone` + `PartialEq` keep errors easy to compare in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum CuckooError {
    /// Bucket size outside the supported range.
    ///
    /// A bucket must hold at least one fingerprint, and the per-bucket
    /// occupancy is tracked in a `u8`.
    InvalidBucketSize {
        /// The bucket size that was provided.
        size: usize,
        /// Maximum supported bucket size.
        max: usize,
    },

    /// Fingerprint width wider than the storage word.
    ///
    /// A width of zero is not an error: the mask is forced to 1.
    InvalidFingerprintSize {
        /// The fingerprint width in bits that was provided.
        bits: u32,
        /// Maximum supported width in bits.
        max: u32,
    },

    /// Generic invalid parameter combination.
    InvalidParameters {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// Two filters cannot be combined.
    ///
    /// Only produced by the diagnostic
    /// [`check_compatible`](crate::CuckooFilter::check_compatible);
    /// [`union`](crate::CuckooFilter::union) itself reports `None`.
    IncompatibleFilters {
        /// Description of the incompatibility.
        reason: String,
    },
}

impl fmt::Display for CuckooError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBucketSize { size, max } => {
                write!(
                    f,
                    "Invalid bucket size: {}. Must be in range [1, {}].",
                    size, max
                )
            }
            Self::InvalidFingerprintSize { bits, max } => {
                write!(
                    f,
                    "Invalid fingerprint size: {} bits. Must be at most {} bits.",
                    bits, max
                )
            }
            Self::InvalidParameters { message } => {
                write!(f, "Invalid cuckoo filter parameters: {}.", message)
            }
            Self::IncompatibleFilters { reason } => {
                write!(
                    f,
                    "Cannot combine incompatible cuckoo filters: {}.",
                    reason
                )
            }
        }
    }
}

impl std::error::Error for CuckooError {}

impl CuckooError {
    /// Create an `InvalidBucketSize` error.
    #[must_use]
    pub fn invalid_bucket_size(size: usize, max: usize) -> Self {
        Self::InvalidBucketSize { size, max }
    }

    /// Create an `InvalidFingerprintSize` error.
    #[must_use]
    pub fn invalid_fingerprint_size(bits: u32, max: u32) -> Self {
        Self::InvalidFingerprintSize { bits, max }
    }

    /// Create an `InvalidParameters` error with a formatted message.
    ///
    /// ```
    /// use cuckoocraft::CuckooError;
    ///
    /// let err = CuckooError::invalid_parameters(format!("capacity {} overflows", usize::MAX));
    /// assert!(err.to_string().contains("overflows"));
    /// ```
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create an `IncompatibleFilters` error.
    #[must_use]
    pub fn incompatible_filters(reason: impl Into<String>) -> Self {
        Self::IncompatibleFilters {
            reason: reason.into(),
        }
    }
}
