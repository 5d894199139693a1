//! Cuckoo filter implementation.
//!
//! - [`CuckooFilter`] - approximate membership with deletion, backed by
//!   fixed-size buckets of fingerprints
//! - [`FilterStats`] - detached statistics snapshot
//!
//! # Choosing Parameters
//!
//! | bucket_size | fingerprint_size | Max practical load | Est. FPR there  |
//! |-------------|------------------|--------------------|-----------------|
//! | 2           | 8                | ~84%               | ~0.66%          |
//! | 4 (default) | 8 (default)      | ~95%               | ~0.74%          |
//! | 4           | 12               | ~95%               | ~0.046%         |
//! | 4           | 16               | ~95%               | ~0.003%         |
//! | 8           | 16               | ~98%               | ~0.003%         |
//!
//! Larger buckets raise attainable load at the cost of more comparisons per
//! lookup. Each extra fingerprint bit halves the estimated FPR.
//!
//! # Examples
//!
//! ```
//! use cuckoocraft::filters::CuckooFilter;
//!
//! let mut filter = CuckooFilter::new(10_000);
//! filter.insert("temporary");
//! assert!(filter.contains("temporary"));
//!
//! filter.delete("temporary");
//! assert!(!filter.contains("temporary"));
//! ```

pub mod cuckoo;
pub mod stats;

pub use cuckoo::CuckooFilter;
pub use stats::FilterStats;
