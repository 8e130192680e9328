// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stable item identities.

use alloc::string::String;
use core::fmt::Debug;
use core::hash::Hash;

/// Items that can name themselves with a stable key.
///
/// Two items with the same key share one page handle. The key must not change
/// while the item sits in the collection; hosts whose items are mutable
/// view-models usually return an id field rather than hashing content.
pub trait Identity {
    /// Key type used by the arena.
    type Key: Clone + Debug + Eq + Hash;

    /// Returns this item's key.
    fn identity(&self) -> Self::Key;
}

macro_rules! identity_by_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Identity for $ty {
                type Key = Self;

                fn identity(&self) -> Self {
                    *self
                }
            }
        )*
    };
}

identity_by_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, char, &'static str);

impl Identity for String {
    type Key = Self;

    fn identity(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::Identity;

    #[test]
    fn values_are_their_own_identity() {
        assert_eq!(42_u32.identity(), 42);
        assert_eq!("page".identity(), "page");
        assert_eq!("page".to_string().identity(), "page");
    }
}
