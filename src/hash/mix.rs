//! Integer avalanche finalizers.
//!
//! The alternate bucket of a fingerprint is `index ^ mix(fp)`. The mix must be
//! a real bit mixer: with an identity hash, fingerprints 17 and 18 would land
//! in neighbouring buckets and displaced entries would pile up locally.
//! Both finalizers below are MurmurHash3's `fmix` steps, fixed constants
//! included, so results are identical across platforms and runs.

/// MurmurHash3 32-bit finalizer.
///
/// ```
/// use cuckoocraft::hash::mix::fmix32;
///
/// assert_eq!(fmix32(0), 0);
/// assert_ne!(fmix32(1), 1);
/// ```
#[must_use]
#[inline]
pub const fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

/// MurmurHash3 64-bit finalizer.
#[must_use]
#[inline]
pub const fn fmix64(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^= h >> 33;
    h
}
