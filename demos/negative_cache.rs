//! Negative-lookup filter in front of a simulated slow store.
//!
//! Several callers share one filter. Each write records its key; reads of
//! keys the filter rules out never reach the store.
//!
//! Run with: cargo run --example negative_cache

use cuckoocraft::{CuckooFilterBuilder, NegativeLookupGuard, SharedCuckooFilter};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

/// Stand-in for the backing store: counts round trips.
#[derive(Default)]
struct SlowStore {
    rows: Mutex<HashMap<String, String>>,
    round_trips: Mutex<u64>,
}

impl SlowStore {
    fn put(&self, key: String, value: String) {
        *self.round_trips.lock() += 1;
        self.rows.lock().insert(key, value);
    }

    fn get(&self, key: &str) -> Option<String> {
        *self.round_trips.lock() += 1;
        self.rows.lock().get(key).cloned()
    }
}

fn main() -> cuckoocraft::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // 2^15 buckets of 4 slots: every recorded write stays reachable.
    let filter = CuckooFilterBuilder::new()
        .capacity(1 << 17)
        .false_positive_rate(0.001)
        .build()?;
    let filter = Arc::new(SharedCuckooFilter::new(filter));
    let store = Arc::new(SlowStore::default());

    let handles: Vec<_> = ["tenant-a", "tenant-b", "tenant-c"]
        .into_iter()
        .map(|identity| {
            let guard = NegativeLookupGuard::new(Arc::clone(&filter), identity);
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..5_000 {
                    let key = format!("item:{i}");
                    store.put(cuckoocraft::composite_key(&key, identity), format!("v{i}"));
                    guard.record_write(&key);
                }

                // Half the reads are for keys that were never written.
                let mut found = 0;
                for i in 0..10_000 {
                    let key = format!("item:{i}");
                    if guard.may_exist(&key)
                        && store.get(&cuckoocraft::composite_key(&key, identity)).is_some()
                    {
                        found += 1;
                    }
                }
                (identity, found, guard.lookups(), guard.skipped())
            })
        })
        .collect();

    for handle in handles {
        match handle.join() {
            Ok((identity, found, lookups, skipped)) => println!(
                "{identity}: {found} hits, {skipped} of {lookups} reads skipped the store"
            ),
            Err(_) => eprintln!("worker panicked"),
        }
    }

    println!("store round trips: {}", *store.round_trips.lock());
    println!("{}", filter.stats());
    Ok(())
}
