//! Hash functions and index derivation for cuckoo filters.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── hasher.rs  - FilterHasher trait and StdHasher (seeded FNV-1a + fmix64)
//! ├── xxhash.rs  - XXHash3 hasher (default)
//! ├── mix.rs     - MurmurHash3 integer finalizers
//! ├── engine.rs  - Bucket index / fingerprint / alternate index derivation
//! └── mod.rs     - This file (public API)
//! ```
//!
//! # Choosing a Hash Function
//!
//! | Hash Function  | Speed     | Quality   | Notes                          |
//! |----------------|-----------|-----------|--------------------------------|
//! | [`XxHasher`]   | Very Fast | Excellent | Default                        |
//! | [`StdHasher`]  | Medium    | Good      | No external dependency inside  |
//!
//! Both are deterministic across processes and platforms, so a filter's
//! layout depends only on its configuration, its hasher seed, and the
//! eviction random source.
//!
//! # Examples
//!
//! ```
//! use cuckoocraft::hash::{FilterHasher, FingerprintEngine, XxHasher};
//!
//! let engine = FingerprintEngine::new(XxHasher::new(), 1_000, 0xFF);
//! let c = engine.candidates("user:42");
//! assert!(c.primary < 1_000 && c.alternate < 1_000);
//! assert_eq!(XxHasher::new().name(), "XXHash3");
//! ```

pub mod engine;
pub mod hasher;
pub mod mix;
pub mod xxhash;

pub use engine::{Candidates, FingerprintEngine};
pub use hasher::{FilterHasher, StdHasher};
pub use xxhash::XxHasher;

/// Hasher used when none is specified.
pub type DefaultHasher = XxHasher;
