//! Shared data generators and constants for the benchmarks.
//!
//! All generators are seeded so runs are comparable.
#![allow(dead_code)]

use cuckoocraft::{CuckooConfig, CuckooFilter};
use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for generated data.
pub const DATA_SEED: u64 = 0xBE4C_4A11;

/// Seed for filter eviction choices.
pub const FILTER_SEED: u64 = 7;

/// Filter capacities exercised by size-scaling benchmarks.
pub const SIZES: &[usize] = &[1_000, 10_000, 100_000, 1_000_000];

/// Load factors at which insert and query costs are measured.
pub const LOAD_FACTORS: &[f64] = &[0.10, 0.50, 0.80, 0.90, 0.95];

/// (bucket_size, fingerprint_size) layouts compared against each other.
pub const LAYOUTS: &[(usize, u32)] = &[(2, 8), (4, 8), (4, 12), (4, 16), (8, 16)];

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(DATA_SEED)
}

/// Random alphanumeric strings of `len` bytes.
pub fn generate_strings(count: usize, len: usize) -> Vec<String> {
    let mut rng = rng();
    (0..count)
        .map(|_| {
            (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect()
        })
        .collect()
}

/// Cache-style composite keys: `"user:<n>:session:<m>"`.
pub fn generate_cache_keys(count: usize) -> Vec<String> {
    let mut rng = rng();
    (0..count)
        .map(|i| format!("user:{}:session:{}", i, rng.gen::<u32>()))
        .collect()
}

/// Random integers.
pub fn generate_u64s(count: usize) -> Vec<u64> {
    let mut rng = rng();
    (0..count).map(|_| rng.gen()).collect()
}

/// Keys guaranteed disjoint from [`generate_strings`] output (different length).
pub fn generate_absent_strings(count: usize, len: usize) -> Vec<String> {
    generate_strings(count, len + 1)
}

/// Seeded filter with the default layout.
pub fn filter_with_capacity(capacity: usize) -> CuckooFilter {
    let config = CuckooConfig::default().with_capacity(capacity);
    CuckooFilter::with_seed(config, FILTER_SEED).expect("valid config")
}

/// Seeded filter pre-filled to `load` with generated strings.
///
/// Returns the filter and the inserted items.
pub fn filled_filter(config: CuckooConfig, load: f64) -> (CuckooFilter, Vec<String>) {
    let mut filter = CuckooFilter::with_seed(config, FILTER_SEED).expect("valid config");
    let target = (filter.total_slots() as f64 * load) as usize;
    let items = generate_strings(target, 24);
    filter.insert_batch(&items);
    (filter, items)
}
