//! Builder pattern for cuckoo filter construction.
//!
//! The builder enforces at compile time that a capacity is given and
//! validates the remaining parameters when the filter is built.
//!
//! ## Error Handling
//!
//! - **Compile-time errors**: Missing capacity
//! - **Runtime errors**: Invalid parameter values (out of range)
//!
//! # Examples
//!
//! ```
//! use cuckoocraft::builder::CuckooFilterBuilder;
//!
//! let mut filter = CuckooFilterBuilder::new()
//!     .capacity(10_000)
//!     .false_positive_rate(0.001)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! filter.insert("hello");
//! assert!(filter.contains("hello"));
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod cuckoo;

pub use cuckoo::CuckooFilterBuilder;

/// Parameter checks shared by builders.
mod validation {
    use crate::core::params::MAX_FINGERPRINT_SIZE;
    use crate::error::{CuckooError, Result};

    /// Load factor a filter with 4-slot buckets reliably reaches.
    pub const DESIGN_LOAD: f64 = 0.95;

    /// Validate a target false positive rate.
    ///
    /// # Errors
    ///
    /// Returns error if `fp_rate` is not in (0, 1).
    #[inline]
    pub fn validate_fp_rate(fp_rate: f64) -> Result<()> {
        if !(fp_rate > 0.0 && fp_rate < 1.0) {
            return Err(CuckooError::invalid_parameters(format!(
                "False positive rate {} must be in (0, 1)",
                fp_rate
            )));
        }
        Ok(())
    }

    /// Narrowest fingerprint width whose estimate at [`DESIGN_LOAD`] meets `fp_rate`.
    ///
    /// # Errors
    ///
    /// Returns error if `fp_rate` is not in (0, 1) or needs more than 32 bits.
    pub fn fingerprint_size_for(fp_rate: f64) -> Result<u32> {
        validate_fp_rate(fp_rate)?;
        let bits = (2.0 * DESIGN_LOAD / fp_rate).log2().ceil().max(1.0);
        if bits > f64::from(MAX_FINGERPRINT_SIZE) {
            return Err(CuckooError::invalid_fingerprint_size(
                bits as u32,
                MAX_FINGERPRINT_SIZE,
            ));
        }
        Ok(bits as u32)
    }
}

/// Prelude for convenient builder imports.
pub mod prelude {
    pub use super::CuckooFilterBuilder;
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use crate::core::params::estimate_fpr;

    #[test]
    fn test_validate_fp_rate() {
        assert!(validate_fp_rate(0.01).is_ok());
        assert!(validate_fp_rate(0.5).is_ok());
        assert!(validate_fp_rate(0.0).is_err());
        assert!(validate_fp_rate(1.0).is_err());
        assert!(validate_fp_rate(-0.1).is_err());
        assert!(validate_fp_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_fingerprint_size_for() {
        assert_eq!(fingerprint_size_for(0.01).unwrap(), 8);
        assert_eq!(fingerprint_size_for(0.001).unwrap(), 11);
        assert_eq!(fingerprint_size_for(0.9).unwrap(), 2);
        assert_eq!(fingerprint_size_for(0.99).unwrap(), 1);
        assert!(fingerprint_size_for(1e-12).is_err());
    }

    #[test]
    fn test_chosen_width_meets_target() {
        for target in [0.1, 0.03, 0.01, 0.001, 1e-5] {
            let bits = fingerprint_size_for(target).unwrap();
            assert!(estimate_fpr(DESIGN_LOAD, bits) <= target);
            assert!(estimate_fpr(DESIGN_LOAD, bits - 1) > target);
        }
    }
}
