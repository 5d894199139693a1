//! Mutex-guarded cuckoo filter for shared callers.
//!
//! [`CuckooFilter`] holds no locks: bucket mutation (append, remove, swap)
//! is not atomic, and an eviction chain touches many buckets. When a filter
//! fronts a store used by several threads, every operation has to be
//! serialized. `SharedCuckooFilter` is that boundary: one
//! `parking_lot::Mutex` held for the full duration of each call.
//!
//! ### Locking Protocol
//!
//! | Operation     | Lock held                | Duration                  |
//! |---------------|--------------------------|---------------------------|
//! | `insert()`    | self                     | Whole eviction chain      |
//! | `lookup()`    | self                     | Two bucket scans          |
//! | `delete()`    | self                     | Two bucket scans          |
//! | `clear()`     | self                     | Full bucket sweep         |
//! | `stats()`     | self                     | Full bucket sweep         |
//! | `union()`     | other, released; then self | Clone + merge           |
//!
//! `union()` never holds both locks at once, so `a.union(&b)` racing with
//! `b.union(&a)` cannot deadlock.
//!
//! # Examples
//!
//! ```
//! use cuckoocraft::sync::SharedCuckooFilter;
//! use cuckoocraft::CuckooFilter;
//! use std::sync::Arc;
//!
//! let filter = Arc::new(SharedCuckooFilter::new(CuckooFilter::new(10_000)));
//!
//! let writer = Arc::clone(&filter);
//! std::thread::spawn(move || {
//!     writer.insert("concurrent");
//! })
//! .join()
//! .unwrap();
//!
//! assert!(filter.lookup("concurrent"));
//! ```

use crate::core::FilterItem;
use crate::filters::{CuckooFilter, FilterStats};
use crate::hash::{FilterHasher, XxHasher};

use parking_lot::Mutex;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// A [`CuckooFilter`] behind a single mutex.
///
/// `Send + Sync` whenever `H` and `R` are `Send`.
#[derive(Debug)]
pub struct SharedCuckooFilter<H = XxHasher, R = ChaCha8Rng> {
    inner: Mutex<CuckooFilter<H, R>>,
}

impl<H, R> SharedCuckooFilter<H, R> {
    /// Take ownership of a filter.
    #[must_use]
    pub fn new(filter: CuckooFilter<H, R>) -> Self {
        Self {
            inner: Mutex::new(filter),
        }
    }

    /// Release the filter.
    #[must_use]
    pub fn into_inner(self) -> CuckooFilter<H, R> {
        self.inner.into_inner()
    }

    /// Run `f` with exclusive access, for compound operations that must not
    /// interleave with other callers.
    ///
    /// ```
    /// use cuckoocraft::sync::SharedCuckooFilter;
    /// use cuckoocraft::CuckooFilter;
    ///
    /// let shared = SharedCuckooFilter::new(CuckooFilter::new(1_000));
    /// // Insert only if absent, atomically.
    /// let inserted = shared.with_filter(|f| !f.lookup("k") && f.insert("k"));
    /// assert!(inserted);
    /// ```
    pub fn with_filter<T>(&self, f: impl FnOnce(&mut CuckooFilter<H, R>) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

impl<H: FilterHasher, R: Rng> SharedCuckooFilter<H, R> {
    /// See [`CuckooFilter::insert`].
    pub fn insert<T: FilterItem + ?Sized>(&self, item: &T) -> bool {
        self.inner.lock().insert(item)
    }

    /// Insert all items under one lock acquisition.
    pub fn insert_batch<'a, T, I>(&self, items: I) -> usize
    where
        T: FilterItem + ?Sized + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.inner.lock().insert_batch(items)
    }
}

impl<H: FilterHasher, R> SharedCuckooFilter<H, R> {
    /// See [`CuckooFilter::lookup`].
    #[must_use]
    pub fn lookup<T: FilterItem + ?Sized>(&self, item: &T) -> bool {
        self.inner.lock().lookup(item)
    }

    /// Alias for [`lookup`](Self::lookup).
    #[must_use]
    pub fn contains<T: FilterItem + ?Sized>(&self, item: &T) -> bool {
        self.lookup(item)
    }

    /// See [`CuckooFilter::delete`].
    pub fn delete<T: FilterItem + ?Sized>(&self, item: &T) -> bool {
        self.inner.lock().delete(item)
    }

    /// See [`CuckooFilter::len`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// See [`CuckooFilter::is_empty`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// See [`CuckooFilter::load_factor`].
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.inner.lock().load_factor()
    }

    /// See [`CuckooFilter::clear`].
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    /// See [`CuckooFilter::stats`].
    #[must_use]
    pub fn stats(&self) -> FilterStats {
        self.inner.lock().stats()
    }

    /// Deep copy of the current filter.
    #[must_use]
    pub fn snapshot(&self) -> CuckooFilter<H, R>
    where
        H: Clone,
        R: Clone,
    {
        self.inner.lock().clone()
    }

    /// Union of this filter with a snapshot of `other`.
    ///
    /// See [`CuckooFilter::union`] for the best-effort semantics.
    #[must_use]
    pub fn union(&self, other: &Self) -> Option<CuckooFilter<H, R>>
    where
        H: PartialEq + Clone,
        R: Clone,
    {
        let theirs = other.snapshot();
        let ours = self.inner.lock();
        ours.union(&theirs)
    }
}

impl<H, R> From<CuckooFilter<H, R>> for SharedCuckooFilter<H, R> {
    fn from(filter: CuckooFilter<H, R>) -> Self {
        Self::new(filter)
    }
}
