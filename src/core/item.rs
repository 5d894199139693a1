//! Canonical byte encoding of filter items.
//!
//! The filter hashes bytes, not Rust values. Every accepted item type is
//! first reduced to a canonical byte sequence:
//!
//! | Item type                      | Canonical bytes                 |
//! |--------------------------------|---------------------------------|
//! | `str`, `String`                | UTF-8 bytes                     |
//! | `[u8]`, `Vec<u8>`, `[u8; N]`   | the bytes themselves            |
//! | integers                       | decimal text, e.g. `-42` → `"-42"` |
//!
//! Integers are rendered as decimal text so that `12345` and `"12345"` are the
//! same item. Callers that mix numeric and textual keys rely on this.
//!
//! ```
//! use cuckoocraft::core::FilterItem;
//!
//! assert_eq!(&*12345u32.canonical_bytes(), b"12345");
//! assert_eq!(&*"12345".canonical_bytes(), b"12345");
//! assert_eq!(&*(-7i64).canonical_bytes(), b"-7");
//! ```

use std::borrow::Cow;

/// A value that can be stored in a cuckoo filter.
pub trait FilterItem {
    /// Bytes fed to the hash functions.
    fn canonical_bytes(&self) -> Cow<'_, [u8]>;
}

impl FilterItem for str {
    #[inline]
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl FilterItem for String {
    #[inline]
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl FilterItem for [u8] {
    #[inline]
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl FilterItem for Vec<u8> {
    #[inline]
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<const N: usize> FilterItem for [u8; N] {
    #[inline]
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<T: FilterItem + ?Sized> FilterItem for &T {
    #[inline]
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        (**self).canonical_bytes()
    }
}

impl<T: FilterItem + ?Sized> FilterItem for Box<T> {
    #[inline]
    fn canonical_bytes(&self) -> Cow<'_, [u8]> {
        (**self).canonical_bytes()
    }
}

macro_rules! impl_filter_item_for_integers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FilterItem for $ty {
                #[inline]
                fn canonical_bytes(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_string().into_bytes())
                }
            }
        )*
    };
}

impl_filter_item_for_integers!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
