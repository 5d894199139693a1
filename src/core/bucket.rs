//! Fixed-capacity bucket storage.
//!
//! All buckets live in one flat slot array with an occupancy count per
//! bucket, so a filter performs exactly two allocations regardless of its
//! bucket count.
//!
//! # Memory Layout
//!
//! ```text
//! bucket_size = 4
//!
//! slots: [ a  b  0  0 | c  0  0  0 | d  e  f  g | ... ]
//! lens:  [     2      |     1      |     4      | ... ]
//!          bucket 0     bucket 1     bucket 2
//! ```
//!
//! Occupied slots always form a prefix of their bucket; removal moves the
//! last occupied slot into the hole. Order inside a bucket carries no meaning.
//!
//! # Invariants
//!
//! - `lens[i] <= bucket_size` for every bucket
//! - slots at positions `>= lens[i]` inside bucket `i` hold `0`
//! - slots below `lens[i]` hold non-zero fingerprints

use super::fingerprint::Fingerprint;

/// Flat storage for `num_buckets` buckets of `bucket_size` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BucketStore {
    slots: Box<[u32]>,
    lens: Box<[u8]>,
    bucket_size: usize,
}

impl BucketStore {
    /// Allocate empty storage.
    ///
    /// `bucket_size` must be in `1..=255`; callers validate the configuration first.
    pub(crate) fn new(num_buckets: usize, bucket_size: usize) -> Self {
        debug_assert!(bucket_size >= 1 && bucket_size <= u8::MAX as usize);
        Self {
            slots: vec![0u32; num_buckets * bucket_size].into_boxed_slice(),
            lens: vec![0u8; num_buckets].into_boxed_slice(),
            bucket_size,
        }
    }

    #[inline]
    pub(crate) fn num_buckets(&self) -> usize {
        self.lens.len()
    }

    #[inline]
    pub(crate) fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    #[inline]
    fn occupied_slots(&self, index: usize) -> &[u32] {
        let start = index * self.bucket_size;
        &self.slots[start..start + usize::from(self.lens[index])]
    }

    /// Number of fingerprints in bucket `index`.
    #[inline]
    pub(crate) fn len_of(&self, index: usize) -> usize {
        usize::from(self.lens[index])
    }

    /// Append `fp` to bucket `index`; `false` if the bucket is full.
    #[inline]
    pub(crate) fn push(&mut self, index: usize, fp: Fingerprint) -> bool {
        let len = self.len_of(index);
        if len >= self.bucket_size {
            return false;
        }
        self.slots[index * self.bucket_size + len] = fp.get();
        // len < bucket_size <= 255
        self.lens[index] += 1;
        true
    }

    #[inline]
    pub(crate) fn contains(&self, index: usize, fp: Fingerprint) -> bool {
        self.occupied_slots(index).contains(&fp.get())
    }

    /// Remove one occurrence of `fp` from bucket `index`.
    pub(crate) fn remove(&mut self, index: usize, fp: Fingerprint) -> bool {
        let start = index * self.bucket_size;
        let len = self.len_of(index);
        let bucket = &mut self.slots[start..start + len];
        match bucket.iter().position(|&slot| slot == fp.get()) {
            Some(pos) => {
                bucket.swap(pos, len - 1);
                bucket[len - 1] = 0;
                self.lens[index] -= 1;
                true
            }
            None => false,
        }
    }

    /// Put `fp` into occupied slot `slot` of bucket `index`, returning the
    /// fingerprint it replaced.
    ///
    /// `slot` must be below the bucket's occupancy.
    pub(crate) fn replace(&mut self, index: usize, slot: usize, fp: Fingerprint) -> Fingerprint {
        debug_assert!(slot < self.len_of(index));
        let cell = &mut self.slots[index * self.bucket_size + slot];
        let evicted = *cell;
        *cell = fp.get();
        // Occupied slots never hold 0.
        Fingerprint::new(evicted).unwrap_or(Fingerprint::ONE)
    }

    /// Read-only view of bucket `index`.
    #[inline]
    pub(crate) fn bucket(&self, index: usize) -> Bucket<'_> {
        Bucket {
            slots: self.occupied_slots(index),
        }
    }

    pub(crate) fn iter(&self) -> impl ExactSizeIterator<Item = Bucket<'_>> + '_ {
        (0..self.num_buckets()).map(move |i| self.bucket(i))
    }

    /// Total fingerprints stored across all buckets.
    pub(crate) fn occupied(&self) -> usize {
        self.lens.iter().map(|&len| usize::from(len)).sum()
    }

    /// Buckets holding at least one fingerprint.
    pub(crate) fn filled_buckets(&self) -> usize {
        self.lens.iter().filter(|&&len| len > 0).count()
    }

    pub(crate) fn clear(&mut self) {
        self.slots.fill(0);
        self.lens.fill(0);
    }
}

/// Borrowed view of one bucket's fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket<'a> {
    slots: &'a [u32],
}

impl<'a> Bucket<'a> {
    /// Number of fingerprints held.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the bucket holds nothing.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `fp` is held in this bucket.
    #[must_use]
    #[inline]
    pub fn contains(&self, fp: Fingerprint) -> bool {
        self.slots.contains(&fp.get())
    }

    /// Iterate the held fingerprints (order is unspecified).
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Fingerprint> + 'a {
        self.slots
            .iter()
            .map(|&raw| Fingerprint::new(raw).unwrap_or(Fingerprint::ONE))
    }
}
