//! Thread-safe access to cuckoo filters.
//!
//! [`CuckooFilter`](crate::CuckooFilter) is a plain data structure: it takes
//! `&mut self` to mutate and holds no locks. This module supplies the
//! exclusion boundary for callers that share one filter.
//!
//! # Module Organization
//!
//! - [`SharedCuckooFilter`] - one `parking_lot::Mutex` around a filter; every
//!   operation takes `&self`
//! - [`NegativeLookupGuard`] - per-caller adapter mapping cache-client
//!   writes, deletes and reads onto a shared filter
//!
//! # Examples
//!
//! ```
//! use cuckoocraft::sync::SharedCuckooFilter;
//! use cuckoocraft::CuckooFilter;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let filter = Arc::new(SharedCuckooFilter::new(CuckooFilter::new(100_000)));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let filter = Arc::clone(&filter);
//!         thread::spawn(move || {
//!             for i in 0..1_000 {
//!                 filter.insert(&format!("{t}:{i}"));
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert_eq!(filter.len(), 4_000);
//! ```

pub mod guard;
pub mod shared;

pub use guard::{composite_key, NegativeLookupGuard};
pub use shared::SharedCuckooFilter;
