//! Hash function trait and the portable fallback hasher.
//!
//! Hash functions operate on byte slices, so the caller decides how an item is
//! serialized (see [`FilterItem`](crate::core::FilterItem)).
//!
//! # Separation of Concerns
//!
//! - **`FilterHasher`**: turns bytes plus a seed into a 64-bit digest
//! - **`FingerprintEngine`**: derives bucket indices and fingerprints from digests
//! - **`CuckooFilter`**: composes engine + bucket store + random source
//!
//! # Examples
//!
//! ```
//! use cuckoocraft::hash::{FilterHasher, StdHasher};
//!
//! let hasher = StdHasher::new();
//! let index_hash = hasher.hash_bytes_with_seed(b"hello", 1);
//! let fp_hash = hasher.hash_bytes_with_seed(b"hello", 2);
//! assert_ne!(index_hash, fp_hash);
//! ```

#![allow(clippy::module_name_repetitions)]

use super::mix::fmix64;

/// Base hasher trait for cuckoo filter hash functions.
///
/// # Requirements
///
/// - **Avalanche property**: a single input bit flips ~50% of output bits
/// - **Seed independence**: different seeds give statistically independent outputs
/// - **Determinism**: same input and seed give the same output across runs
///
/// The primary index and the fingerprint are computed from two different
/// seeds, so weak seeding directly degrades the filter.
pub trait FilterHasher: Send + Sync {
    /// Hash bytes to a 64-bit value.
    fn hash_bytes(&self, bytes: &[u8]) -> u64 {
        self.hash_bytes_with_seed(bytes, 0)
    }

    /// Hash bytes under an explicit seed.
    fn hash_bytes_with_seed(&self, bytes: &[u8], seed: u64) -> u64;

    /// Human-readable name for debugging.
    fn name(&self) -> &'static str;
}

/// FNV-1a state used by [`StdHasher`].
#[derive(Debug, Clone)]
struct Fnv1a {
    state: u64,
}

impl Fnv1a {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Portable hasher: seeded FNV-1a followed by an avalanche finalizer.
///
/// FNV-1a alone mixes its last bytes poorly into the high bits, which matter
/// after `% num_buckets` on large tables; the `fmix64` finalizer fixes that.
/// Prefer [`XxHasher`](super::XxHasher), the default, for throughput.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdHasher {
    seed: u64,
}

impl StdHasher {
    /// Create a hasher with the default seed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            seed: 0x517c_c1b7_2722_0a95,
        }
    }

    /// Create a hasher with an explicit seed.
    ///
    /// ```
    /// use cuckoocraft::hash::{FilterHasher, StdHasher};
    ///
    /// let h1 = StdHasher::with_seed(0).hash_bytes(b"test");
    /// let h2 = StdHasher::with_seed(42).hash_bytes(b"test");
    /// assert_ne!(h1, h2);
    /// ```
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }
}

impl Default for StdHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterHasher for StdHasher {
    #[inline]
    fn hash_bytes_with_seed(&self, bytes: &[u8], seed: u64) -> u64 {
        let mut fnv = Fnv1a::new();
        fnv.write(&(self.seed ^ seed).to_le_bytes());
        fnv.write(bytes);
        fmix64(fnv.state)
    }

    #[inline]
    fn name(&self) -> &'static str {
        "StdHasher"
    }
}
