// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item source mirror and collection change notifications.

use alloc::vec::Vec;

use crate::ChangeError;

/// A change notification from the host's observable collection.
///
/// Indices follow the usual collection-changed conventions: they describe the
/// collection *before* the change for `Remove`/`Move`/`Replace` and the
/// insertion point for `Add`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CollectionChange<T> {
    /// `item` was inserted at `index`.
    Add {
        /// Insertion index.
        index: usize,
        /// Inserted item.
        item: T,
    },
    /// The item at `index` was removed.
    Remove {
        /// Removed index.
        index: usize,
    },
    /// The item at `from` moved to `to`.
    Move {
        /// Source index.
        from: usize,
        /// Destination index.
        to: usize,
    },
    /// The item at `index` was replaced by `item`.
    Replace {
        /// Replaced index.
        index: usize,
        /// New item.
        item: T,
    },
    /// The collection changed wholesale; these are its new contents.
    Reset(Vec<T>),
}

impl<T> CollectionChange<T> {
    /// Checks the change against a collection of `len` items.
    pub fn validate(&self, len: usize) -> Result<(), ChangeError> {
        let out_of_range = |index: usize, limit: usize| {
            if index < limit {
                Ok(())
            } else {
                Err(ChangeError::IndexOutOfRange { index, len })
            }
        };
        match *self {
            Self::Add { index, .. } => out_of_range(index, len + 1),
            Self::Remove { index } | Self::Replace { index, .. } => out_of_range(index, len),
            Self::Move { from, to } => {
                out_of_range(from, len)?;
                out_of_range(to, len)
            }
            Self::Reset(_) => Ok(()),
        }
    }
}

/// Local mirror of the host's items source.
///
/// `None` models an unbound source, which several policies treat differently
/// from an empty one.
#[derive(Clone, Debug, Default)]
pub struct ItemSource<T> {
    items: Option<Vec<T>>,
}

impl<T> ItemSource<T> {
    /// Creates a mirror of `items`.
    #[must_use]
    pub const fn new(items: Option<Vec<T>>) -> Self {
        Self { items }
    }

    /// Returns `true` if an items source is bound.
    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.items.is_some()
    }

    /// Number of items; `0` when unbound.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    /// The mirrored items, or `None` when unbound.
    #[must_use]
    pub fn items(&self) -> Option<&[T]> {
        self.items.as_deref()
    }

    /// Item at `index`.
    #[must_use]
    pub fn item_at(&self, index: usize) -> Option<&T> {
        self.items.as_ref()?.get(index)
    }

    /// Rebinds the mirror.
    pub fn set(&mut self, items: Option<Vec<T>>) {
        self.items = items;
    }

    /// Applies `change`, returning the removed or replaced item if any.
    ///
    /// The mirror is left untouched when the change is rejected.
    pub fn apply(&mut self, change: &CollectionChange<T>) -> Result<Option<T>, ChangeError>
    where
        T: Clone,
    {
        if let CollectionChange::Reset(items) = change {
            self.items = Some(items.clone());
            return Ok(None);
        }
        let items = self.items.as_mut().ok_or(ChangeError::NoItemsSource)?;
        change.validate(items.len())?;
        Ok(match change {
            CollectionChange::Add { index, item } => {
                items.insert(*index, item.clone());
                None
            }
            CollectionChange::Remove { index } => Some(items.remove(*index)),
            CollectionChange::Move { from, to } => {
                let item = items.remove(*from);
                items.insert(*to, item);
                None
            }
            CollectionChange::Replace { index, item } => {
                Some(core::mem::replace(&mut items[*index], item.clone()))
            }
            CollectionChange::Reset(_) => None,
        })
    }
}

impl<T: PartialEq> ItemSource<T> {
    /// Index of the first item equal to `item`.
    #[must_use]
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.items.as_ref()?.iter().position(|it| it == item)
    }

    /// Returns `true` if some item equals `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.index_of(item).is_some()
    }
}
