//! Core types for cuckoo filters.
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── params.rs       - CuckooConfig, defaults, validation, FPR estimate
//! ├── item.rs         - FilterItem: canonical byte form of insertable items
//! ├── fingerprint.rs  - Non-zero fingerprint type
//! ├── bucket.rs       - Flat fixed-capacity bucket storage
//! └── mod.rs          - This file (public API)
//! ```
//!
//! Storage is single-threaded: mutation takes `&mut self`. Shared access goes
//! through [`crate::sync`].

pub(crate) mod bucket;
pub mod fingerprint;
pub mod item;
pub mod params;

pub use bucket::Bucket;
pub use fingerprint::Fingerprint;
pub use item::FilterItem;
pub use params::{estimate_fpr, CuckooConfig};
