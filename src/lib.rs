//! CuckooCraft: cuckoo filters for negative-lookup short-circuiting.
//!
//! A cuckoo filter is a probabilistic set that answers "definitely absent" or
//! "possibly present" for an item, supports deletion, and stores only a short
//! fingerprint per item. Its main job here is to sit in front of a slow
//! backing store and skip reads for keys that were never written.
//!
//! - **False positives**: possible, at a rate controlled by `fingerprint_size`
//! - **False negatives**: none for items that were inserted and not deleted
//!   when `capacity / bucket_size` is a power of two, except after a failed
//!   insertion at very high load. Other bucket counts, the default layout
//!   included, can lose items during successful evictions too (see
//!   [`CuckooFilter`](filters::CuckooFilter#false-negatives))
//!
//! # Quick Start
//!
//! ```
//! use cuckoocraft::CuckooFilter;
//!
//! let mut filter = CuckooFilter::new(10_000);
//!
//! filter.insert("hello");
//! filter.insert("world");
//!
//! assert!(filter.contains("hello"));
//! assert!(!filter.contains("goodbye"));
//!
//! filter.delete("hello");
//! assert!(!filter.contains("hello"));
//! ```
//!
//! # Configuration
//!
//! ```
//! use cuckoocraft::{CuckooConfig, CuckooFilter};
//!
//! let config = CuckooConfig::default()
//!     .with_capacity(100_000)
//!     .with_bucket_size(4)
//!     .with_fingerprint_size(12)
//!     .with_max_displacements(500);
//!
//! // Reproducible eviction choices.
//! let filter = CuckooFilter::with_seed(config, 42)?;
//! assert_eq!(filter.total_slots(), 100_000);
//! # Ok::<(), cuckoocraft::CuckooError>(())
//! ```
//!
//! # Concurrency
//!
//! [`CuckooFilter`] takes `&mut self` to mutate and holds no locks. To share
//! one between threads, wrap it in [`SharedCuckooFilter`], which serializes
//! every call behind a single mutex.
//!
//! ```
//! use cuckoocraft::{CuckooFilter, SharedCuckooFilter};
//! use std::sync::Arc;
//!
//! let filter = Arc::new(SharedCuckooFilter::new(CuckooFilter::new(1_000)));
//! let worker = Arc::clone(&filter);
//! std::thread::spawn(move || worker.insert("from-thread")).join().unwrap();
//! assert!(filter.lookup("from-thread"));
//! ```
//!
//! # Logging
//!
//! The crate emits [`tracing`] events: `trace` for individual operations,
//! `debug` for exhausted eviction chains, union overflow and `clear`. No
//! subscriber is installed.
//!
//! # Feature Flags
//!
//! | Feature  | Enables                                              |
//! |----------|------------------------------------------------------|
//! | `serde`  | `Serialize`/`Deserialize` for config, stats, fingerprints |

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::len_zero)]
#![allow(clippy::bool_assert_comparison)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Configuration, items, fingerprints and bucket storage
pub mod core;

/// Error types and result aliases
pub mod error;

/// The cuckoo filter and its statistics
pub mod filters;

/// Hash functions and index derivation
pub mod hash;

/// Mutex-guarded sharing and the negative-lookup guard
pub mod sync;

/// Validated filter construction
pub mod builder;

pub use builder::CuckooFilterBuilder;
pub use crate::core::{CuckooConfig, FilterItem, Fingerprint};
pub use error::{CuckooError, Result};
pub use filters::{CuckooFilter, FilterStats};
pub use hash::{FilterHasher, StdHasher, XxHasher};
pub use sync::{composite_key, NegativeLookupGuard, SharedCuckooFilter};

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use cuckoocraft::prelude::*;
///
/// let mut filter = CuckooFilterBuilder::new().capacity(1_000).seed(1).build()?;
/// filter.insert("hello");
/// assert!(filter.contains("hello"));
/// # Ok::<(), CuckooError>(())
/// ```
pub mod prelude {
    pub use crate::builder::CuckooFilterBuilder;
    pub use crate::core::{CuckooConfig, FilterItem, Fingerprint};
    pub use crate::error::{CuckooError, Result};
    pub use crate::filters::{CuckooFilter, FilterStats};
    pub use crate::hash::{FilterHasher, StdHasher, XxHasher};
    pub use crate::sync::{NegativeLookupGuard, SharedCuckooFilter};
}
