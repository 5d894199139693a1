//! Negative-lookup short-circuit for a cache client.
//!
//! A cache client in front of a slower backing store keeps one shared filter
//! of every key it has written. Before a read goes to the store, the client
//! asks the filter; a "definitely absent" answer skips the round trip.
//!
//! | Client event                    | Guard call        | Filter call |
//! |---------------------------------|-------------------|-------------|
//! | Write to the store succeeded    | `record_write`    | `insert`    |
//! | Delete from the store succeeded | `record_delete`   | `delete`    |
//! | About to read from the store    | `may_exist`       | `lookup`    |
//!
//! Keys are fingerprinted together with the caller's identity
//! (`"{key}:{identity}"`), so two callers writing the same logical key get
//! independent entries and a delete by one never clears the other.
//!
//! # Examples
//!
//! ```
//! use cuckoocraft::sync::{NegativeLookupGuard, SharedCuckooFilter};
//! use cuckoocraft::CuckooFilter;
//! use std::sync::Arc;
//!
//! let filter = Arc::new(SharedCuckooFilter::new(CuckooFilter::new(10_000)));
//! let alice = NegativeLookupGuard::new(Arc::clone(&filter), "alice");
//! let bob = NegativeLookupGuard::new(filter, "bob");
//!
//! alice.record_write("session");
//! assert!(alice.may_exist("session"));
//! assert!(!bob.may_exist("session"));
//! ```

use super::shared::SharedCuckooFilter;
use crate::hash::{FilterHasher, XxHasher};

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Build the fingerprinted item for a cache key owned by `identity`.
///
/// ```
/// use cuckoocraft::sync::composite_key;
///
/// assert_eq!(composite_key("user:42", "tenant-a"), "user:42:tenant-a");
/// ```
#[must_use]
pub fn composite_key(key: &str, identity: &str) -> String {
    let mut composite = String::with_capacity(key.len() + identity.len() + 1);
    composite.push_str(key);
    composite.push(':');
    composite.push_str(identity);
    composite
}

/// One caller's view of a shared negative-lookup filter.
#[derive(Debug)]
pub struct NegativeLookupGuard<H = XxHasher, R = ChaCha8Rng> {
    filter: Arc<SharedCuckooFilter<H, R>>,
    identity: String,
    lookups: AtomicU64,
    skipped: AtomicU64,
}

impl<H, R> NegativeLookupGuard<H, R> {
    /// Bind `identity` to a shared filter.
    #[must_use]
    pub fn new(filter: Arc<SharedCuckooFilter<H, R>>, identity: impl Into<String>) -> Self {
        Self {
            filter,
            identity: identity.into(),
            lookups: AtomicU64::new(0),
            skipped: AtomicU64::new(0),
        }
    }

    /// The caller identity mixed into every key.
    #[must_use]
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The shared filter.
    #[must_use]
    pub fn filter(&self) -> &Arc<SharedCuckooFilter<H, R>> {
        &self.filter
    }

    /// Reads checked through [`may_exist`](Self::may_exist).
    #[must_use]
    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Reads answered "absent", i.e. backing-store round trips avoided.
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped.load(Ordering::Relaxed)
    }

    fn key_for(&self, key: &str) -> String {
        composite_key(key, &self.identity)
    }
}

impl<H: FilterHasher, R: Rng> NegativeLookupGuard<H, R> {
    /// Record a successful write of `key`.
    ///
    /// Returns `false` if the filter was too full to take it; later reads of
    /// `key` may then be skipped wrongly, so callers should treat this as a
    /// signal to rebuild with a larger capacity.
    ///
    /// A `true` return does not guarantee that later reads of `key` see it
    /// when the filter's bucket count is not a power of two: a later write
    /// can relocate its fingerprint out of reach. Size the shared filter
    /// with [`CuckooConfig::is_power_of_two_layout`](crate::CuckooConfig::is_power_of_two_layout)
    /// in mind.
    pub fn record_write(&self, key: &str) -> bool {
        let stored = self.filter.insert(&self.key_for(key));
        if !stored {
            tracing::debug!(identity = %self.identity, key, "negative-lookup filter rejected write");
        }
        stored
    }
}

impl<H: FilterHasher, R> NegativeLookupGuard<H, R> {
    /// Record a successful delete of `key`.
    ///
    /// Only call this for keys previously passed to
    /// [`record_write`](Self::record_write).
    pub fn record_delete(&self, key: &str) -> bool {
        self.filter.delete(&self.key_for(key))
    }

    /// Whether a read of `key` needs to reach the backing store.
    ///
    /// `false` means the key was never written (or was deleted) by this
    /// identity and the store lookup can be skipped. That holds only for
    /// power-of-two layouts that never saw a failed write. With any other
    /// bucket count, a key recorded by [`record_write`](Self::record_write)
    /// can read as absent and its store read would be skipped wrongly.
    #[must_use]
    pub fn may_exist(&self, key: &str) -> bool {
        let present = self.filter.lookup(&self.key_for(key));
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if !present {
            self.skipped.fetch_add(1, Ordering::Relaxed);
        }
        tracing::trace!(identity = %self.identity, key, present, "negative-lookup check");
        present
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CuckooConfig;
    use crate::filters::CuckooFilter;

    fn shared() -> Arc<SharedCuckooFilter> {
        let config = CuckooConfig::default()
            .with_capacity(4_096)
            .with_fingerprint_size(16);
        Arc::new(SharedCuckooFilter::new(
            CuckooFilter::with_seed(config, 1).unwrap(),
        ))
    }

    #[test]
    fn test_composite_key() {
        assert_eq!(composite_key("k", "id"), "k:id");
        assert_eq!(composite_key("", ""), ":");
    }

    #[test]
    fn test_write_read_delete_cycle() {
        let guard = NegativeLookupGuard::new(shared(), "alice");
        assert!(!guard.may_exist("k"));
        assert!(guard.record_write("k"));
        assert!(guard.may_exist("k"));
        assert!(guard.record_delete("k"));
        assert!(!guard.may_exist("k"));
        assert_eq!(guard.lookups(), 3);
        assert_eq!(guard.skipped(), 2);
    }

    #[test]
    fn test_identities_are_isolated() {
        let filter = shared();
        let alice = NegativeLookupGuard::new(Arc::clone(&filter), "alice");
        let bob = NegativeLookupGuard::new(Arc::clone(&filter), "bob");

        alice.record_write("shared-key");
        bob.record_write("shared-key");
        assert_eq!(filter.len(), 2);

        bob.record_delete("shared-key");
        assert!(alice.may_exist("shared-key"));
        assert!(!bob.may_exist("shared-key"));
    }

    #[test]
    fn test_guard_uses_composite_key() {
        let filter = shared();
        let guard = NegativeLookupGuard::new(Arc::clone(&filter), "tenant");
        guard.record_write("user:1");
        assert!(filter.lookup("user:1:tenant"));
        assert!(!filter.lookup("user:1"));
        assert_eq!(guard.identity(), "tenant");
    }
}
