//! Compact, non-zero item fingerprints.
//!
//! A fingerprint is a short hash of an item stored in place of the item. The
//! value `0` marks an empty slot, so a fingerprint is never zero: a masked
//! hash of zero is remapped to `1`. That remap makes `1` slightly more likely
//! than other values (by `2^-f`), which is accepted.

use std::fmt;
use std::num::NonZeroU32;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A non-zero fingerprint of at most 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fingerprint(NonZeroU32);

impl Fingerprint {
    /// The fingerprint that replaces a zero hash.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Wrap a raw value, rejecting the reserved `0`.
    #[must_use]
    #[inline]
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(nz) => Some(Self(nz)),
            None => None,
        }
    }

    /// Mask a hash down to a fingerprint, remapping `0` to `1`.
    ///
    /// ```
    /// use cuckoocraft::core::Fingerprint;
    ///
    /// assert_eq!(Fingerprint::from_hash(0x1234, 0xFF).get(), 0x34);
    /// assert_eq!(Fingerprint::from_hash(0x1200, 0xFF).get(), 1);
    /// ```
    #[must_use]
    #[inline]
    pub const fn from_hash(hash: u32, mask: u32) -> Self {
        match Self::new(hash & mask) {
            Some(fp) => fp,
            None => Self::ONE,
        }
    }

    /// The raw non-zero value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.get())
    }
}

impl From<Fingerprint> for u32 {
    fn from(fp: Fingerprint) -> Self {
        fp.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_rejected() {
        assert_eq!(Fingerprint::new(0), None);
        assert_eq!(Fingerprint::new(5).map(Fingerprint::get), Some(5));
    }

    #[test]
    fn test_from_hash_masks() {
        assert_eq!(Fingerprint::from_hash(u32::MAX, 0xF).get(), 0xF);
        assert_eq!(Fingerprint::from_hash(0xABCD, 0xFFFF).get(), 0xABCD);
    }

    #[test]
    fn test_from_hash_remaps_zero() {
        assert_eq!(Fingerprint::from_hash(0x100, 0xFF), Fingerprint::ONE);
        assert_eq!(Fingerprint::from_hash(0, u32::MAX), Fingerprint::ONE);
    }

    #[test]
    fn test_single_value_space() {
        // A mask of 1 leaves exactly one representable fingerprint.
        for hash in [0u32, 1, 2, 3, 0xFFFF_FFFE] {
            assert_eq!(Fingerprint::from_hash(hash, 1), Fingerprint::ONE);
        }
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Fingerprint::from_hash(0xff, 0xff).to_string(), "0xff");
    }
}
