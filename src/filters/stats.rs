//! Point-in-time filter statistics.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Statistics snapshot returned by [`CuckooFilter::stats`](super::CuckooFilter::stats).
///
/// Detached from the filter: later mutations don't change it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterStats {
    /// Fingerprints stored.
    pub size: usize,
    /// Target item count the filter was sized for.
    pub capacity: usize,
    /// Number of buckets.
    pub num_buckets: usize,
    /// Slots per bucket.
    pub bucket_size: usize,
    /// Bits per fingerprint.
    pub fingerprint_size: u32,
    /// `num_buckets * bucket_size`.
    pub total_slots: usize,
    /// `size / total_slots`.
    pub load_factor: f64,
    /// Heuristic false positive rate at the current load.
    pub estimated_fpr: f64,
    /// Buckets holding at least one fingerprint.
    pub filled_buckets: usize,
    /// `filled_buckets / num_buckets`.
    pub bucket_utilization: f64,
    /// Inserts that exhausted their displacement budget.
    pub failed_inserts: u64,
}

impl FilterStats {
    /// Slots still free.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.total_slots.saturating_sub(self.size)
    }
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CuckooFilter stats:")?;
        writeln!(f, "  size:               {} / {} slots", self.size, self.total_slots)?;
        writeln!(f, "  capacity:           {}", self.capacity)?;
        writeln!(
            f,
            "  layout:             {} buckets x {} slots, {}-bit fingerprints",
            self.num_buckets, self.bucket_size, self.fingerprint_size
        )?;
        writeln!(f, "  load factor:        {:.2}%", self.load_factor * 100.0)?;
        writeln!(f, "  estimated FPR:      {:.6}", self.estimated_fpr)?;
        writeln!(
            f,
            "  filled buckets:     {} ({:.2}%)",
            self.filled_buckets,
            self.bucket_utilization * 100.0
        )?;
        write!(f, "  failed inserts:     {}", self.failed_inserts)
    }
}
