//! Cuckoo filter with randomized displacement and deletion support.
//!
//! A cuckoo filter stores a short fingerprint of each item in one of two
//! candidate buckets. Unlike a standard Bloom filter it supports deletion,
//! and for low target false positive rates it uses less space than a
//! counting Bloom filter.
//!
//! # Operations
//!
//! | Operation | Cost (common case) | Cost (worst case)           |
//! |-----------|--------------------|-----------------------------|
//! | insert    | O(bucket_size)     | O(max_displacements)        |
//! | lookup    | O(bucket_size)     | O(bucket_size)              |
//! | delete    | O(bucket_size)     | O(bucket_size)              |
//!
//! # Insertion
//!
//! ```text
//! 1. fp, i1 = hash(item); i2 = alt(i1, fp)
//! 2. room in i1?  → store, done
//! 3. room in i2?  → store, done
//! 4. repeat max_displacements times:
//!      pick i ∈ {current, alt(current, carried)} at random
//!      room in i?  → store carried, done
//!      swap carried with a random slot of i
//!      current = alt(i, evicted)
//! 5. report failure
//! ```
//!
//! A failed insert is a normal outcome at high load: `insert` returns `false`
//! and the filter does not grow.
//!
//! # Failed Eviction Chains
//!
//! Swaps performed during a failed chain are **not rolled back**. The new
//! fingerprint has been placed somewhere along the chain, and the fingerprint
//! still being carried when the budget runs out is dropped. `len()` is left
//! unchanged (one in, one out), but the dropped fingerprint belonged to a
//! previously inserted item, which may now read as absent. Keep the load
//! factor below ~0.9 with `bucket_size = 4` and this effectively never
//! happens; [`failed_inserts`](CuckooFilter::failed_inserts) counts it when it
//! does.
//!
//! # Non-Power-of-Two Bucket Counts
//!
//! `alt(alt(i, fp), fp) == i` only holds when `num_buckets` is a power of
//! two. Otherwise a fingerprint evicted from its item's alternate bucket can
//! be moved to a third bucket that lookups for that item never probe, even
//! when the chain succeeds. See the `# False Negatives` section on
//! [`CuckooFilter`].
//!
//! # Deleting Colliding Items
//!
//! Fingerprints are not unique per item. If two items share a bucket and a
//! fingerprint, deleting one removes a single copy that may have been stored
//! for the other. This is inherent to fingerprint-based filters. Only delete
//! items that were inserted.
//!
//! # Examples
//!
//! ```
//! use cuckoocraft::{CuckooConfig, CuckooFilter};
//!
//! let config = CuckooConfig::default().with_capacity(10_000);
//! let mut filter = CuckooFilter::with_seed(config, 42).unwrap();
//!
//! assert!(filter.insert("hello"));
//! assert!(filter.lookup("hello"));
//! assert!(!filter.lookup("world"));
//!
//! assert!(filter.delete("hello"));
//! assert!(!filter.lookup("hello"));
//! assert_eq!(filter.len(), 0);
//! ```
//!
//! # References
//!
//! - Fan, B., Andersen, D. G., Kaminsky, M., & Mitzenmacher, M. D. (2014).
//!   "Cuckoo Filter: Practically Better Than Bloom". CoNEXT.

#![allow(clippy::module_name_repetitions)]

use crate::core::bucket::{Bucket, BucketStore};
use crate::core::params::{estimate_fpr, CuckooConfig};
use crate::core::{FilterItem, Fingerprint};
use crate::error::{CuckooError, Result};
use crate::filters::stats::FilterStats;
use crate::hash::{FilterHasher, FingerprintEngine, XxHasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// Cuckoo filter over byte-canonicalized items.
///
/// # Type Parameters
///
/// * `H` - Hash function (default [`XxHasher`])
/// * `R` - Random source for eviction choices (default [`ChaCha8Rng`])
///
/// # Thread Safety
///
/// Mutation needs `&mut self`. To share a filter between threads, wrap it in
/// [`SharedCuckooFilter`](crate::sync::SharedCuckooFilter) or a `Mutex`.
///
/// # False Negatives
///
/// Items that were inserted and not deleted can still read as absent in two
/// cases:
///
/// * a failed eviction chain dropped their fingerprint
///   (counted by [`failed_inserts`](Self::failed_inserts))
/// * the layout's bucket count is not a power of two, and a *successful*
///   eviction chain relocated their fingerprint outside its candidate pair
///
/// The second case is silent: `failed_inserts()` stays at zero. It affects
/// the default layout (`capacity / 4` buckets) for most capacities. Pick
/// `capacity / bucket_size` as a power of two (see
/// [`CuckooConfig::is_power_of_two_layout`]) when a missed item is costly,
/// as it is in front of a backing store.
///
/// # Cloning
///
/// `clone()` is a deep copy: configuration, bucket contents, counters and
/// the random source state. The two filters evolve independently.
#[derive(Debug, Clone)]
pub struct CuckooFilter<H = XxHasher, R = ChaCha8Rng> {
    config: CuckooConfig,
    engine: FingerprintEngine<H>,
    buckets: BucketStore,
    /// Fingerprints currently stored.
    size: usize,
    /// Inserts that exhausted `max_displacements`.
    failed_inserts: u64,
    rng: R,
}

impl CuckooFilter<XxHasher, ChaCha8Rng> {
    /// Create a filter for `capacity` items with default parameters.
    ///
    /// Uses 4 slots per bucket, 8-bit fingerprints, 500 displacements, and an
    /// entropy-seeded random source.
    ///
    /// ```
    /// use cuckoocraft::CuckooFilter;
    ///
    /// let filter = CuckooFilter::new(100_000);
    /// assert_eq!(filter.num_buckets(), 25_000);
    /// assert!(filter.is_empty());
    /// ```
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let config = CuckooConfig::default().with_capacity(capacity);
        Self::assemble(config, XxHasher::new(), ChaCha8Rng::from_entropy())
    }

    /// Create a filter from a configuration with an entropy-seeded random source.
    ///
    /// # Errors
    ///
    /// Returns the error of [`CuckooConfig::validate`].
    pub fn from_config(config: CuckooConfig) -> Result<Self> {
        Self::with_hasher_and_rng(config, XxHasher::new(), ChaCha8Rng::from_entropy())
    }

    /// Create a filter whose eviction choices are reproducible from `seed`.
    ///
    /// # Errors
    ///
    /// Returns the error of [`CuckooConfig::validate`].
    pub fn with_seed(config: CuckooConfig, seed: u64) -> Result<Self> {
        Self::with_hasher_and_rng(config, XxHasher::new(), ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> CuckooFilter<XxHasher, R> {
    /// Create a filter with an injected random source.
    ///
    /// # Errors
    ///
    /// Returns the error of [`CuckooConfig::validate`].
    pub fn with_rng(config: CuckooConfig, rng: R) -> Result<Self> {
        Self::with_hasher_and_rng(config, XxHasher::new(), rng)
    }
}

impl<H: FilterHasher, R: Rng> CuckooFilter<H, R> {
    /// Create a filter with a custom hasher and random source.
    ///
    /// # Errors
    ///
    /// Returns the error of [`CuckooConfig::validate`].
    pub fn with_hasher_and_rng(config: CuckooConfig, hasher: H, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, hasher, rng))
    }

    fn assemble(config: CuckooConfig, hasher: H, rng: R) -> Self {
        let num_buckets = config.num_buckets();
        if !config.is_power_of_two_layout() {
            tracing::warn!(
                num_buckets,
                capacity = config.capacity,
                bucket_size = config.bucket_size,
                "bucket count is not a power of two; evicted fingerprints may become unreachable"
            );
        }
        Self {
            engine: FingerprintEngine::new(hasher, num_buckets, config.fingerprint_mask()),
            buckets: BucketStore::new(num_buckets, config.bucket_size),
            config,
            size: 0,
            failed_inserts: 0,
            rng,
        }
    }

    /// Insert an item.
    ///
    /// # Returns
    ///
    /// * `true` - the fingerprint was stored
    /// * `false` - both candidate buckets were full and `max_displacements`
    ///   evictions did not free a slot; see the module docs for what a
    ///   failed chain leaves behind
    ///
    /// Inserting the same item twice stores two copies of its fingerprint;
    /// each copy needs its own `delete`.
    pub fn insert<T: FilterItem + ?Sized>(&mut self, item: &T) -> bool {
        let c = self.engine.candidates(item);
        tracing::trace!(
            fingerprint = c.fingerprint.get(),
            primary = c.primary,
            alternate = c.alternate,
            "CuckooFilter::insert"
        );

        if self.buckets.push(c.primary, c.fingerprint) || self.buckets.push(c.alternate, c.fingerprint) {
            self.size += 1;
            return true;
        }

        self.displace(c.fingerprint, c.primary)
    }

    /// Cuckoo eviction loop, entered when both candidate buckets are full.
    fn displace(&mut self, fingerprint: Fingerprint, start: usize) -> bool {
        let mut carried = fingerprint;
        let mut current = start;

        for kick in 0..self.config.max_displacements {
            let target = if self.rng.gen_bool(0.5) {
                current
            } else {
                self.engine.alt_index(current, carried)
            };

            // A previous kick may have freed this bucket.
            if self.buckets.push(target, carried) {
                self.size += 1;
                tracing::trace!(kicks = kick, bucket = target, "cuckoo eviction settled");
                return true;
            }

            // `target` is full, so it holds at least one fingerprint.
            let slot = self.rng.gen_range(0..self.buckets.len_of(target));
            let evicted = self.buckets.replace(target, slot, carried);
            carried = evicted;
            current = self.engine.alt_index(target, evicted);
        }

        self.failed_inserts += 1;
        debug_assert_eq!(self.size, self.buckets.occupied());
        tracing::debug!(
            max_displacements = self.config.max_displacements,
            dropped_fingerprint = carried.get(),
            load_factor = self.load_factor(),
            "cuckoo eviction chain exhausted"
        );
        false
    }

    /// Insert every item, returning how many inserts succeeded.
    pub fn insert_batch<'a, T, I>(&mut self, items: I) -> usize
    where
        T: FilterItem + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items.into_iter().filter(|item| self.insert(*item)).count()
    }
}

impl<H: FilterHasher, R> CuckooFilter<H, R> {
    /// Check whether an item might be in the filter.
    ///
    /// * `true` - the item **might** be present (false positives possible)
    /// * `false` - the item is absent, unless its fingerprint was dropped by a
    ///   failed eviction chain, relocated out of reach in a non-power-of-two
    ///   layout, or deleted through a colliding item
    #[must_use]
    #[inline]
    pub fn lookup<T: FilterItem + ?Sized>(&self, item: &T) -> bool {
        let c = self.engine.candidates(item);
        let present = self.buckets.contains(c.primary, c.fingerprint)
            || self.buckets.contains(c.alternate, c.fingerprint);
        tracing::trace!(fingerprint = c.fingerprint.get(), present, "CuckooFilter::lookup");
        present
    }

    /// Alias for [`lookup`](Self::lookup).
    #[must_use]
    #[inline]
    pub fn contains<T: FilterItem + ?Sized>(&self, item: &T) -> bool {
        self.lookup(item)
    }

    /// Look up every item.
    #[must_use]
    pub fn lookup_batch<'a, T, I>(&self, items: I) -> Vec<bool>
    where
        T: FilterItem + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items.into_iter().map(|item| self.lookup(item)).collect()
    }

    /// Remove one copy of an item's fingerprint.
    ///
    /// The primary bucket is searched first, then the alternate.
    ///
    /// # Returns
    ///
    /// `true` if a matching fingerprint was removed, `false` if neither
    /// candidate bucket held it (`len()` is unchanged).
    pub fn delete<T: FilterItem + ?Sized>(&mut self, item: &T) -> bool {
        let c = self.engine.candidates(item);
        let removed = self.buckets.remove(c.primary, c.fingerprint)
            || self.buckets.remove(c.alternate, c.fingerprint);
        if removed {
            self.size -= 1;
        }
        tracing::trace!(fingerprint = c.fingerprint.get(), removed, "CuckooFilter::delete");
        removed
    }

    /// Number of fingerprints currently stored.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the filter stores nothing.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Fraction of slots occupied, in `[0, 1]`.
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        let total = self.total_slots();
        if total == 0 {
            return 0.0;
        }
        self.size as f64 / total as f64
    }

    /// Estimated false positive rate: `min(1, 2 * load_factor / 2^fingerprint_size)`.
    ///
    /// A reporting heuristic, not a bound.
    #[must_use]
    pub fn false_positive_rate(&self) -> f64 {
        estimate_fpr(self.load_factor(), self.config.fingerprint_size)
    }

    /// Snapshot of size, layout and occupancy statistics.
    ///
    /// Walks every bucket to count filled ones: O(num_buckets).
    #[must_use]
    pub fn stats(&self) -> FilterStats {
        let filled_buckets = self.buckets.filled_buckets();
        let num_buckets = self.num_buckets();
        FilterStats {
            size: self.size,
            capacity: self.config.capacity,
            num_buckets,
            bucket_size: self.config.bucket_size,
            fingerprint_size: self.config.fingerprint_size,
            total_slots: self.total_slots(),
            load_factor: self.load_factor(),
            estimated_fpr: self.false_positive_rate(),
            filled_buckets,
            bucket_utilization: filled_buckets as f64 / num_buckets as f64,
            failed_inserts: self.failed_inserts,
        }
    }

    /// Empty every bucket. Configuration is unchanged.
    pub fn clear(&mut self) {
        tracing::debug!(size = self.size, "CuckooFilter::clear");
        self.buckets.clear();
        self.size = 0;
        self.failed_inserts = 0;
    }

    /// Explain why two filters cannot be merged.
    ///
    /// # Errors
    ///
    /// [`CuckooError::IncompatibleFilters`] naming the first mismatch among
    /// `bucket_size`, `fingerprint_size`, `num_buckets` and the hasher.
    pub fn check_compatible(&self, other: &Self) -> Result<()>
    where
        H: PartialEq,
    {
        let (a, b) = (&self.config, &other.config);
        if a.bucket_size != b.bucket_size {
            return Err(CuckooError::incompatible_filters(format!(
                "bucket_size {} != {}",
                a.bucket_size, b.bucket_size
            )));
        }
        if a.fingerprint_size != b.fingerprint_size {
            return Err(CuckooError::incompatible_filters(format!(
                "fingerprint_size {} != {}",
                a.fingerprint_size, b.fingerprint_size
            )));
        }
        if a.num_buckets() != b.num_buckets() {
            return Err(CuckooError::incompatible_filters(format!(
                "num_buckets {} != {}",
                a.num_buckets(),
                b.num_buckets()
            )));
        }
        if self.engine.hasher() != other.engine.hasher() {
            return Err(CuckooError::incompatible_filters(format!(
                "hashers differ ({})",
                self.engine.hasher().name()
            )));
        }
        Ok(())
    }

    /// Best-effort union of two compatible filters.
    ///
    /// Returns `None` when the filters differ in `bucket_size`,
    /// `fingerprint_size`, `num_buckets` or hasher.
    ///
    /// Otherwise the result is a copy of `self` with each fingerprint of
    /// `other`'s bucket `i` appended to bucket `i` **while it has room**.
    /// Fingerprints that don't fit are dropped without relocation, so when
    /// the combined occupancy of a bucket exceeds `bucket_size` the result
    /// under-represents `other`. Compare `result.len()` with
    /// `self.len() + other.len()` to detect that.
    ///
    /// ```
    /// use cuckoocraft::{CuckooConfig, CuckooFilter};
    ///
    /// let config = CuckooConfig::default().with_capacity(1_000);
    /// let mut a = CuckooFilter::with_seed(config, 1).unwrap();
    /// let mut b = CuckooFilter::with_seed(config, 2).unwrap();
    /// a.insert("left");
    /// b.insert("right");
    ///
    /// let merged = a.union(&b).unwrap();
    /// assert!(merged.lookup("left") && merged.lookup("right"));
    ///
    /// let other = CuckooFilter::with_seed(config.with_bucket_size(2), 3).unwrap();
    /// assert!(a.union(&other).is_none());
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Option<Self>
    where
        H: PartialEq + Clone,
        R: Clone,
    {
        if self.check_compatible(other).is_err() {
            return None;
        }

        let mut result = self.clone();
        let mut dropped = 0usize;
        for (index, bucket) in other.buckets.iter().enumerate() {
            for fp in bucket.iter() {
                if result.buckets.push(index, fp) {
                    result.size += 1;
                } else {
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            tracing::debug!(dropped, "CuckooFilter::union dropped fingerprints from full buckets");
        }
        Some(result)
    }

    /// Read-only view of bucket `index`, or `None` if out of range.
    #[must_use]
    pub fn bucket(&self, index: usize) -> Option<Bucket<'_>> {
        (index < self.num_buckets()).then(|| self.buckets.bucket(index))
    }

    /// Iterate read-only views of all buckets in index order.
    pub fn buckets(&self) -> impl ExactSizeIterator<Item = Bucket<'_>> + '_ {
        self.buckets.iter()
    }

    /// The configuration this filter was built with.
    #[must_use]
    pub fn config(&self) -> &CuckooConfig {
        &self.config
    }

    /// Target item count the filter was sized for.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Number of buckets.
    #[must_use]
    pub fn num_buckets(&self) -> usize {
        self.buckets.num_buckets()
    }

    /// Slots per bucket.
    #[must_use]
    pub fn bucket_size(&self) -> usize {
        self.buckets.bucket_size()
    }

    /// Bits per fingerprint.
    #[must_use]
    pub fn fingerprint_size(&self) -> u32 {
        self.config.fingerprint_size
    }

    /// Eviction budget per insert.
    #[must_use]
    pub fn max_displacements(&self) -> usize {
        self.config.max_displacements
    }

    /// `num_buckets * bucket_size`.
    #[must_use]
    pub fn total_slots(&self) -> usize {
        self.num_buckets() * self.bucket_size()
    }

    /// Inserts that exhausted their displacement budget since construction
    /// or the last [`clear`](Self::clear).
    #[must_use]
    pub fn failed_inserts(&self) -> u64 {
        self.failed_inserts
    }

    /// The hash/fingerprint engine.
    #[must_use]
    pub fn engine(&self) -> &FingerprintEngine<H> {
        &self.engine
    }
}

impl<H: FilterHasher, R> fmt::Display for CuckooFilter<H, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CuckooFilter(size={}, load_factor={:.3}, est_fpr={:.6})",
            self.size,
            self.load_factor(),
            self.false_positive_rate()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::StdHasher;
    use rand::rngs::StdRng;

    fn seeded(capacity: usize, bucket_size: usize, fingerprint_size: u32) -> CuckooFilter {
        let config = CuckooConfig::default()
            .with_capacity(capacity)
            .with_bucket_size(bucket_size)
            .with_fingerprint_size(fingerprint_size);
        CuckooFilter::with_seed(config, 0xC0FFEE).unwrap()
    }

    fn occupied(filter: &CuckooFilter) -> usize {
        filter.buckets().map(|b| b.len()).sum()
    }

    #[test]
    fn test_new() {
        let filter = CuckooFilter::new(10_000);
        assert_eq!(filter.len(), 0);
        assert!(filter.is_empty());
        assert_eq!(filter.capacity(), 10_000);
        assert_eq!(filter.num_buckets(), 2_500);
        assert_eq!(filter.bucket_size(), 4);
        assert_eq!(filter.fingerprint_size(), 8);
        assert_eq!(filter.max_displacements(), 500);
        assert_eq!(filter.total_slots(), 10_000);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CuckooConfig::default().with_bucket_size(0);
        assert!(CuckooFilter::with_seed(config, 1).is_err());
        let config = CuckooConfig::default().with_fingerprint_size(64);
        assert!(CuckooFilter::from_config(config).is_err());
    }

    #[test]
    fn test_insert_lookup_delete_scenario() {
        let mut filter = seeded(10_000, 4, 8);
        assert!(filter.insert("hello"));
        assert!(filter.lookup("hello"));
        assert!(!filter.lookup("world"));
        assert!(filter.delete("hello"));
        assert!(!filter.lookup("hello"));
        assert_eq!(filter.len(), 0);
    }

    #[test]
    fn test_contains_alias() {
        let mut filter = seeded(1_000, 4, 8);
        filter.insert(&12345u32);
        assert!(filter.contains(&12345u32));
        assert!(filter.contains("12345"));
    }

    #[test]
    fn test_accepts_text_bytes_and_integers() {
        let mut filter = seeded(1_000, 4, 16);
        assert!(filter.insert("text"));
        assert!(filter.insert(&String::from("owned")));
        assert!(filter.insert(b"raw".as_slice()));
        assert!(filter.insert(&-99i64));
        assert!(filter.lookup("text"));
        assert!(filter.lookup("owned"));
        assert!(filter.lookup(&b"raw".to_vec()));
        assert!(filter.lookup("-99"));
    }

    #[test]
    fn test_delete_absent_returns_false() {
        let mut filter = seeded(1_000, 4, 16);
        filter.insert("present");
        assert!(!filter.delete("absent"));
        assert_eq!(filter.len(), 1);
    }

    #[test]
    fn test_duplicate_inserts_need_matching_deletes() {
        let mut filter = seeded(1_000, 4, 8);
        assert!(filter.insert("dup"));
        assert!(filter.insert("dup"));
        assert_eq!(filter.len(), 2);
        assert!(filter.delete("dup"));
        assert!(filter.lookup("dup"));
        assert!(filter.delete("dup"));
        assert!(!filter.lookup("dup"));
    }

    #[test]
    fn test_no_false_negatives_below_capacity() {
        // 2048 buckets: alternate indices are an exact involution.
        let mut filter = seeded(8_192, 4, 12);
        let items: Vec<String> = (0..6_500).map(|i| format!("item_{i}")).collect();
        for item in &items {
            assert!(filter.insert(item));
        }
        assert_eq!(filter.failed_inserts(), 0);
        for item in &items {
            assert!(filter.lookup(item), "false negative for {item}");
        }
    }

    #[test]
    fn test_size_matches_occupied_slots() {
        let mut filter = seeded(2_000, 4, 8);
        for i in 0..1_500u32 {
            filter.insert(&i);
        }
        for i in (0..1_500u32).step_by(3) {
            filter.delete(&i);
        }
        assert_eq!(filter.len(), occupied(&filter));
    }

    #[test]
    fn test_filling_a_tiny_filter_fails_gracefully() {
        // One bucket of two slots: the third distinct insert cannot fit.
        let config = CuckooConfig::new(2, 2, 16, 20);
        let mut filter = CuckooFilter::with_seed(config, 9).unwrap();
        assert!(filter.insert("a"));
        assert!(filter.insert("b"));
        assert!(!filter.insert("c"));
        assert_eq!(filter.len(), 2);
        assert_eq!(filter.failed_inserts(), 1);
        assert_eq!(occupied(&filter), 2);
    }

    #[test]
    fn test_failed_chain_is_not_rolled_back_and_count_is_stable() {
        let config = CuckooConfig::new(64, 4, 8, 50);
        let mut filter = CuckooFilter::with_seed(config, 3).unwrap();
        let mut stored = 0usize;
        for i in 0..400u32 {
            if filter.insert(&i) {
                stored += 1;
            }
        }
        assert!(filter.failed_inserts() > 0);
        assert_eq!(filter.len(), stored);
        assert_eq!(filter.len(), occupied(&filter));
        assert!(filter.len() <= filter.total_slots());
    }

    #[test]
    fn test_zero_displacements_fails_when_both_buckets_full() {
        let config = CuckooConfig::new(1, 1, 16, 0);
        let mut filter = CuckooFilter::with_seed(config, 1).unwrap();
        assert!(filter.insert("first"));
        assert!(!filter.insert("second"));
        assert!(filter.lookup("first"));
    }

    #[test]
    fn test_same_seed_same_layout() {
        let config = CuckooConfig::new(256, 4, 8, 100);
        let mut a = CuckooFilter::with_seed(config, 77).unwrap();
        let mut b = CuckooFilter::with_seed(config, 77).unwrap();
        let results_a: Vec<bool> = (0..300u32).map(|i| a.insert(&i)).collect();
        let results_b: Vec<bool> = (0..300u32).map(|i| b.insert(&i)).collect();
        assert_eq!(results_a, results_b);
        for (x, y) in a.buckets().zip(b.buckets()) {
            assert_eq!(x.iter().collect::<Vec<_>>(), y.iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_injected_rng_type() {
        let config = CuckooConfig::default().with_capacity(100);
        let mut filter = CuckooFilter::with_rng(config, StdRng::seed_from_u64(5)).unwrap();
        assert!(filter.insert("x"));
        assert!(filter.lookup("x"));
    }

    #[test]
    fn test_custom_hasher() {
        let config = CuckooConfig::default().with_capacity(100);
        let mut filter =
            CuckooFilter::with_hasher_and_rng(config, StdHasher::new(), ChaCha8Rng::seed_from_u64(1))
                .unwrap();
        assert!(filter.insert("std"));
        assert!(filter.lookup("std"));
        assert_eq!(filter.engine().hasher().name(), "StdHasher");
    }

    #[test]
    fn test_load_factor_and_fpr() {
        let mut filter = seeded(1_000, 4, 8);
        assert_eq!(filter.load_factor(), 0.0);
        assert_eq!(filter.false_positive_rate(), 0.0);
        for i in 0..500u32 {
            filter.insert(&i);
        }
        assert!((filter.load_factor() - 0.5).abs() < 1e-12);
        assert!((filter.false_positive_rate() - 2.0 * 0.5 / 256.0).abs() < 1e-12);
    }

    #[test]
    fn test_fpr_capped_at_one() {
        let config = CuckooConfig::new(8, 4, 0, 10);
        let mut filter = CuckooFilter::with_seed(config, 1).unwrap();
        for i in 0..8u32 {
            filter.insert(&i);
        }
        assert_eq!(filter.false_positive_rate(), 1.0);
    }

    #[test]
    fn test_zero_width_fingerprints_collapse_to_one_value() {
        let config = CuckooConfig::new(100, 4, 0, 10);
        let mut filter = CuckooFilter::with_seed(config, 1).unwrap();
        filter.insert("anything");
        assert!(filter
            .buckets()
            .flat_map(|b| b.iter().collect::<Vec<_>>())
            .all(|fp| fp == Fingerprint::ONE));
    }

    #[test]
    fn test_stats() {
        let mut filter = seeded(1_000, 4, 8);
        for i in 0..100u32 {
            filter.insert(&i);
        }
        let stats = filter.stats();
        assert_eq!(stats.size, 100);
        assert_eq!(stats.capacity, 1_000);
        assert_eq!(stats.num_buckets, 250);
        assert_eq!(stats.bucket_size, 4);
        assert_eq!(stats.fingerprint_size, 8);
        assert_eq!(stats.total_slots, 1_000);
        assert!((stats.load_factor - 0.1).abs() < 1e-12);
        assert_eq!(stats.estimated_fpr, filter.false_positive_rate());
        assert!(stats.filled_buckets > 0 && stats.filled_buckets <= 100);
        assert!((stats.bucket_utilization - stats.filled_buckets as f64 / 250.0).abs() < 1e-12);
        assert_eq!(stats.failed_inserts, 0);
    }

    #[test]
    fn test_clear() {
        let mut filter = seeded(1_000, 4, 8);
        let keys: Vec<String> = (0..50).map(|i| format!("k{i}")).collect();
        filter.insert_batch(&keys);
        let config = *filter.config();

        filter.clear();
        assert_eq!(filter.len(), 0);
        assert_eq!(*filter.config(), config);
        assert_eq!(filter.stats().filled_buckets, 0);
        for key in &keys {
            assert!(!filter.lookup(key));
        }
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = seeded(1_000, 4, 16);
        original.insert("shared");
        let mut copy = original.clone();
        copy.insert("copy-only");
        original.delete("shared");

        assert!(copy.lookup("shared"));
        assert!(copy.lookup("copy-only"));
        assert!(!original.lookup("copy-only"));
        assert!(!original.lookup("shared"));
        assert_eq!(copy.len(), 2);
        assert_eq!(original.len(), 0);
    }

    #[test]
    fn test_union_of_disjoint_filters() {
        let config = CuckooConfig::new(1_000, 4, 16, 500);
        let mut a = CuckooFilter::with_seed(config, 1).unwrap();
        let mut b = CuckooFilter::with_seed(config, 2).unwrap();
        for i in 0..10 {
            a.insert(&format!("a{i}"));
            b.insert(&format!("b{i}"));
        }

        let merged = a.union(&b).expect("compatible filters");
        assert_eq!(merged.len(), 20);
        for i in 0..10 {
            assert!(merged.lookup(&format!("a{i}")));
            assert!(merged.lookup(&format!("b{i}")));
        }
        // Inputs are untouched.
        assert_eq!(a.len(), 10);
        assert_eq!(b.len(), 10);
    }

    #[test]
    fn test_union_drops_overflow() {
        let config = CuckooConfig::new(4, 4, 16, 10);
        let mut a = CuckooFilter::with_seed(config, 1).unwrap();
        let mut b = CuckooFilter::with_seed(config, 2).unwrap();
        for i in 0..4u32 {
            assert!(a.insert(&i));
            assert!(b.insert(&(i + 100)));
        }
        let merged = a.union(&b).unwrap();
        assert_eq!(merged.len(), 4);
        assert_eq!(occupied(&merged), 4);
    }

    #[test]
    fn test_union_rejects_mismatched_layouts() {
        let base = CuckooConfig::new(1_000, 4, 8, 500);
        let a = CuckooFilter::with_seed(base, 1).unwrap();
        for other in [
            base.with_bucket_size(2),
            base.with_fingerprint_size(12),
            base.with_capacity(2_000),
        ] {
            let b = CuckooFilter::with_seed(other, 1).unwrap();
            assert!(a.union(&b).is_none());
            assert!(matches!(
                a.check_compatible(&b),
                Err(CuckooError::IncompatibleFilters { .. })
            ));
        }
    }

    #[test]
    fn test_union_rejects_different_hasher_seeds() {
        let config = CuckooConfig::new(100, 4, 8, 10);
        let rng = || ChaCha8Rng::seed_from_u64(1);
        let a = CuckooFilter::with_hasher_and_rng(config, XxHasher::with_seed(1), rng()).unwrap();
        let b = CuckooFilter::with_hasher_and_rng(config, XxHasher::with_seed(2), rng()).unwrap();
        assert!(a.union(&b).is_none());
    }

    #[test]
    fn test_batch_operations() {
        let mut filter = seeded(1_000, 4, 16);
        let items = ["apple", "banana", "cherry"];
        assert_eq!(filter.insert_batch(items.iter()), 3);
        assert_eq!(
            filter.lookup_batch(["apple", "kiwi", "cherry"].iter()),
            vec![true, false, true]
        );
    }

    #[test]
    fn test_bucket_views() {
        let mut filter = seeded(40, 4, 16);
        filter.insert("v");
        assert!(filter.bucket(filter.num_buckets()).is_none());
        let primary = filter.engine().primary_index("v");
        let fp = filter.engine().fingerprint("v");
        assert!(filter.bucket(primary).unwrap().contains(fp));
        assert_eq!(filter.buckets().len(), 10);
    }

    #[test]
    fn test_display() {
        let mut filter = seeded(1_000, 4, 8);
        assert_eq!(
            filter.to_string(),
            "CuckooFilter(size=0, load_factor=0.000, est_fpr=0.000000)"
        );
        filter.insert("x");
        assert!(filter.to_string().starts_with("CuckooFilter(size=1, "));
    }
}
