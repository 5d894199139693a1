//! Cuckoo filter capacity planning example.
//!
//! Fills filters of several layouts until the first failed insert and
//! reports the load reached, memory per item, and measured vs estimated
//! false positive rate.
//!
//! Run with: cargo run --example capacity_planning

use cuckoocraft::{CuckooConfig, CuckooFilter};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("Cuckoo Filter Capacity Planning\n");

    let layouts = vec![
        ("Tiny buckets", 2, 8),
        ("Default", 4, 8),
        ("Low FPR", 4, 16),
        ("Deep buckets", 8, 12),
    ];

    for (name, bucket_size, fingerprint_size) in layouts {
        let config = CuckooConfig::default()
            .with_capacity(1 << 16)
            .with_bucket_size(bucket_size)
            .with_fingerprint_size(fingerprint_size);
        let mut filter = match CuckooFilter::with_seed(config, 42) {
            Ok(filter) => filter,
            Err(err) => {
                eprintln!("{name}: {err}");
                continue;
            }
        };

        let mut inserted = 0u64;
        while filter.insert(&format!("member-{inserted}")) {
            inserted += 1;
        }

        let probes = 200_000u64;
        let hits = (0..probes)
            .filter(|i| filter.lookup(&format!("probe-{i}")))
            .count();
        let stats = filter.stats();
        let bits_per_item =
            (stats.total_slots as f64 * f64::from(fingerprint_size)) / stats.size as f64;

        println!("{name} (bucket_size={bucket_size}, fingerprint_size={fingerprint_size})");
        println!("  first failure after:  {inserted} inserts");
        println!("  max load factor:      {:.2}%", stats.load_factor * 100.0);
        println!("  bits per item:        {bits_per_item:.2}");
        println!("  estimated FPR:        {:.6}", stats.estimated_fpr);
        println!("  measured FPR:         {:.6}", hits as f64 / probes as f64);
        println!();
    }
}
