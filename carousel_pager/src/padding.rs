// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Infinite-scroll padding.
//!
//! With infinite scrolling on and at least two real items, the page snapshot
//! is wrapped in sentinels: a copy of the last item in front and a copy of the
//! first item behind.
//!
//! ```text
//! real:    [A, B, C]
//! padded:  [C, A, B, C, A]
//!           ^           ^
//!           sentinels
//! ```
//!
//! Logical positions index the real items; padded pages are offset by one.
//! When the widget settles on a sentinel the carousel silently snaps to the
//! real page it mirrors, which is what makes the list appear endless.

use alloc::vec::Vec;

/// Returns `true` if a snapshot of `real_len` items carries sentinels.
#[must_use]
pub const fn is_padded(infinite: bool, real_len: usize) -> bool {
    infinite && real_len > 1
}

/// Number of pages the widget shows for `real_len` items.
#[must_use]
pub const fn padded_len(real_len: usize, infinite: bool) -> usize {
    if is_padded(infinite, real_len) {
        real_len + 2
    } else {
        real_len
    }
}

/// Maps a logical position to its page.
#[must_use]
pub const fn to_padded(logical: usize, real_len: usize, infinite: bool) -> usize {
    if is_padded(infinite, real_len) {
        logical + 1
    } else {
        logical
    }
}

/// Maps a page to the logical position it shows.
///
/// Sentinels map to the item they duplicate, so the result is always a real
/// index (or `0` for an empty carousel).
#[must_use]
pub const fn to_logical(page: usize, real_len: usize, infinite: bool) -> usize {
    if is_padded(infinite, real_len) {
        if page == 0 {
            real_len - 1
        } else if page > real_len {
            0
        } else {
            page - 1
        }
    } else if page >= real_len {
        real_len.saturating_sub(1)
    } else {
        page
    }
}

/// Returns the real page to jump to when the widget rests on a sentinel.
///
/// The head sentinel snaps to the real last page (`count - 2` in padded
/// terms), the tail sentinel to the real first page (`1`).
#[must_use]
pub const fn snap_target(page: usize, real_len: usize, infinite: bool) -> Option<usize> {
    if !is_padded(infinite, real_len) {
        return None;
    }
    let count = real_len + 2;
    if page == 0 {
        Some(count - 2)
    } else if page >= count - 1 {
        Some(1)
    } else {
        None
    }
}

/// The page snapshot a paging widget reads from.
///
/// Non-infinite snapshots are patched in lockstep with collection changes;
/// padded ones are rebuilt, because every change moves a sentinel's identity.
#[derive(Clone, Debug)]
pub struct PageAdapter<T> {
    source: Vec<T>,
    padded: bool,
}

impl<T> Default for PageAdapter<T> {
    fn default() -> Self {
        Self {
            source: Vec::new(),
            padded: false,
        }
    }
}

impl<T: Clone> PageAdapter<T> {
    /// Builds a snapshot of `items`, padding it when `infinite` allows.
    #[must_use]
    pub fn new(items: Option<&[T]>, infinite: bool) -> Self {
        let items = items.unwrap_or_default();
        let padded = is_padded(infinite, items.len());
        let mut source = Vec::with_capacity(padded_len(items.len(), infinite));
        if let (true, Some(last)) = (padded, items.last()) {
            source.push(last.clone());
        }
        source.extend_from_slice(items);
        if let (true, Some(first)) = (padded, items.first()) {
            source.push(first.clone());
        }
        Self { source, padded }
    }
}

impl<T> PageAdapter<T> {
    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Returns `true` if there are no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns `true` if the snapshot carries sentinels.
    #[must_use]
    pub const fn is_padded(&self) -> bool {
        self.padded
    }

    /// Number of real items behind the pages.
    #[must_use]
    pub fn real_len(&self) -> usize {
        if self.padded {
            self.source.len() - 2
        } else {
            self.source.len()
        }
    }

    /// Item shown on `page`.
    #[must_use]
    pub fn item_at(&self, page: usize) -> Option<&T> {
        self.source.get(page)
    }

    /// All pages, sentinels included.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.source
    }

    /// Inserts a page. Only valid on unpadded snapshots.
    pub(crate) fn insert(&mut self, index: usize, item: T) {
        debug_assert!(!self.padded, "padded snapshots are rebuilt, not patched");
        self.source.insert(index.min(self.source.len()), item);
    }

    /// Removes a page. Only valid on unpadded snapshots.
    pub(crate) fn remove(&mut self, index: usize) -> Option<T> {
        debug_assert!(!self.padded, "padded snapshots are rebuilt, not patched");
        (index < self.source.len()).then(|| self.source.remove(index))
    }

    /// Moves a page. Only valid on unpadded snapshots.
    pub(crate) fn move_page(&mut self, from: usize, to: usize) {
        debug_assert!(!self.padded, "padded snapshots are rebuilt, not patched");
        if from < self.source.len() && to < self.source.len() {
            let item = self.source.remove(from);
            self.source.insert(to, item);
        }
    }

    /// Replaces a page. Only valid on unpadded snapshots.
    pub(crate) fn replace(&mut self, index: usize, item: T) -> Option<T> {
        debug_assert!(!self.padded, "padded snapshots are rebuilt, not patched");
        self.source
            .get_mut(index)
            .map(|slot| core::mem::replace(slot, item))
    }
}
