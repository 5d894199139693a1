//! Bucket index and fingerprint derivation.
//!
//! Every item maps to one fingerprint and two candidate buckets:
//!
//! ```text
//! bytes  = canonical(item)
//! i1     = H(bytes, INDEX_SEED)       mod num_buckets
//! fp     = H(bytes, FINGERPRINT_SEED) & mask      (0 → 1)
//! i2     = (i1 XOR fmix32(fp))        mod num_buckets
//! ```
//!
//! The alternate index depends only on the current index and the
//! fingerprint, never on the item, which is what lets eviction move a stored
//! fingerprint without knowing the item it came from.
//!
//! Because of the final modulo, `alt(alt(i, fp), fp) == i` only holds when
//! `num_buckets` is a power of two. Insert, lookup and delete all start from
//! the same `i1`, so they agree on the pair `(i1, i2)` for a fresh item. An
//! evicted fingerprint is moved with `alt(current, fp)` instead, and with
//! other bucket counts that can land outside `(i1, i2)`, where lookup no
//! longer finds it.

use super::hasher::FilterHasher;
use super::mix::fmix32;
use crate::core::{FilterItem, Fingerprint};

/// Seed for the primary bucket index digest.
const INDEX_SEED: u64 = 0x243f_6a88_85a3_08d3;

/// Seed for the fingerprint digest; must differ from [`INDEX_SEED`].
const FINGERPRINT_SEED: u64 = 0x1319_8a2e_0370_7344;

/// Fingerprint and candidate buckets for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidates {
    /// The item's fingerprint.
    pub fingerprint: Fingerprint,
    /// Primary bucket index.
    pub primary: usize,
    /// Alternate bucket index.
    pub alternate: usize,
}

/// Hash/fingerprint engine bound to a bucket count and fingerprint mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintEngine<H> {
    hasher: H,
    num_buckets: usize,
    mask: u32,
}

impl<H: FilterHasher> FingerprintEngine<H> {
    /// Create an engine for `num_buckets` buckets (at least 1) and `mask`.
    ///
    /// A zero mask is forced to 1.
    #[must_use]
    pub fn new(hasher: H, num_buckets: usize, mask: u32) -> Self {
        Self {
            hasher,
            num_buckets: num_buckets.max(1),
            mask: mask.max(1),
        }
    }

    /// The underlying hasher.
    #[must_use]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Number of buckets indices are reduced to.
    #[must_use]
    #[inline]
    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    /// Primary bucket of an item.
    #[must_use]
    #[inline]
    pub fn primary_index<T: FilterItem + ?Sized>(&self, item: &T) -> usize {
        self.primary_index_bytes(&item.canonical_bytes())
    }

    /// Fingerprint of an item.
    #[must_use]
    #[inline]
    pub fn fingerprint<T: FilterItem + ?Sized>(&self, item: &T) -> Fingerprint {
        self.fingerprint_bytes(&item.canonical_bytes())
    }

    /// Alternate bucket for a fingerprint currently associated with `index`.
    ///
    /// ```
    /// use cuckoocraft::core::Fingerprint;
    /// use cuckoocraft::hash::{FingerprintEngine, XxHasher};
    ///
    /// let engine = FingerprintEngine::new(XxHasher::new(), 1024, 0xFF);
    /// let fp = Fingerprint::new(42).unwrap();
    /// let alt = engine.alt_index(17, fp);
    /// // Power-of-two bucket counts make the mapping an involution.
    /// assert_eq!(engine.alt_index(alt, fp), 17);
    /// ```
    #[must_use]
    #[inline]
    pub fn alt_index(&self, index: usize, fp: Fingerprint) -> usize {
        let mixed = index as u64 ^ u64::from(fmix32(fp.get()));
        (mixed % self.num_buckets as u64) as usize
    }

    /// Fingerprint plus both candidate buckets, hashing the item once.
    #[must_use]
    #[inline]
    pub fn candidates<T: FilterItem + ?Sized>(&self, item: &T) -> Candidates {
        let bytes = item.canonical_bytes();
        let fingerprint = self.fingerprint_bytes(&bytes);
        let primary = self.primary_index_bytes(&bytes);
        Candidates {
            fingerprint,
            primary,
            alternate: self.alt_index(primary, fingerprint),
        }
    }

    #[inline]
    fn primary_index_bytes(&self, bytes: &[u8]) -> usize {
        let digest = self.hasher.hash_bytes_with_seed(bytes, INDEX_SEED);
        (digest % self.num_buckets as u64) as usize
    }

    #[inline]
    fn fingerprint_bytes(&self, bytes: &[u8]) -> Fingerprint {
        let digest = self.hasher.hash_bytes_with_seed(bytes, FINGERPRINT_SEED);
        Fingerprint::from_hash(digest as u32, self.mask)
    }
}
