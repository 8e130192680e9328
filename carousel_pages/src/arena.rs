// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational arena of page handles keyed by item identity.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;
use thiserror::Error;

/// Generational handle for a page slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageKey(u32, u32);

impl PageKey {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Page keys are intentionally 32-bit; a carousel never holds 2^32 live pages."
    )]
    const fn new(idx: usize, generation: u32) -> Self {
        Self(idx as u32, generation)
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }

    const fn generation(self) -> u32 {
        self.1
    }
}

/// Errors reported by [`PageArena`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The key's page was released, evicted, or cleared.
    #[error("page key {0:?} no longer refers to a live page")]
    StaleKey(PageKey),
}

#[derive(Clone, Debug)]
struct Page<K, H> {
    identity: K,
    handle: H,
    refs: u32,
}

#[derive(Clone, Debug)]
struct Slot<K, H> {
    generation: u32,
    page: Option<Page<K, H>>,
}

/// Page handles keyed by item identity.
///
/// Each distinct identity owns at most one handle. Acquiring an identity that
/// is already live bumps its reference count and returns the existing key, so
/// a sentinel page and the real page it mirrors resolve to the same handle.
#[derive(Clone, Debug)]
pub struct PageArena<K, H> {
    slots: Vec<Slot<K, H>>,
    free_list: Vec<usize>,
    by_identity: HashMap<K, usize>,
}

impl<K, H> Default for PageArena<K, H>
where
    K: Clone + Debug + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, H> PageArena<K, H>
where
    K: Clone + Debug + Eq + Hash,
{
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            by_identity: HashMap::new(),
        }
    }

    /// Number of live pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_identity.len()
    }

    /// Returns `true` if no page is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }

    /// Returns the page for `identity`, creating it with `create` on first use.
    ///
    /// Every call adds one reference; balance it with [`release`](Self::release).
    pub fn acquire(&mut self, identity: K, create: impl FnOnce() -> H) -> PageKey {
        if let Some(&idx) = self.by_identity.get(&identity) {
            let slot = &mut self.slots[idx];
            if let Some(page) = slot.page.as_mut() {
                page.refs += 1;
                return PageKey::new(idx, slot.generation);
            }
        }

        let page = Page {
            identity: identity.clone(),
            handle: create(),
            refs: 1,
        };
        let idx = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.generation += 1;
            slot.page = Some(page);
            idx
        } else {
            self.slots.push(Slot {
                generation: 1,
                page: Some(page),
            });
            self.slots.len() - 1
        };
        self.by_identity.insert(identity, idx);
        PageKey::new(idx, self.slots[idx].generation)
    }

    /// Drops one reference to `key`'s page.
    ///
    /// Returns the handle once the last reference is gone so the caller can
    /// dispose of it, or `None` while other slots still show the page.
    pub fn release(&mut self, key: PageKey) -> Result<Option<H>, ArenaError> {
        let page = self.page_mut(key).ok_or(ArenaError::StaleKey(key))?;
        page.refs = page.refs.saturating_sub(1);
        if page.refs > 0 {
            return Ok(None);
        }
        Ok(self.vacate(key.idx()))
    }

    /// Forces the page for `identity` out regardless of its reference count.
    ///
    /// Used when the item behind a page is replaced; keys handed out for it
    /// become stale.
    pub fn evict(&mut self, identity: &K) -> Option<H> {
        let idx = *self.by_identity.get(identity)?;
        self.vacate(idx)
    }

    /// Evicts every page whose identity fails `keep`, returning the handles.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) -> Vec<H> {
        let victims: SmallVec<[usize; 8]> = self
            .by_identity
            .iter()
            .filter(|&(identity, _)| !keep(identity))
            .map(|(_, &idx)| idx)
            .collect();
        victims
            .into_iter()
            .filter_map(|idx| self.vacate(idx))
            .collect()
    }

    /// Evicts every page, returning the handles for disposal.
    ///
    /// Slot generations survive so keys handed out before the clear stay stale.
    pub fn clear(&mut self) -> Vec<H> {
        self.by_identity.clear();
        let mut handles = Vec::new();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if let Some(page) = slot.page.take() {
                handles.push(page.handle);
                self.free_list.push(idx);
            }
        }
        handles
    }

    /// Returns the handle behind `key`.
    #[must_use]
    pub fn get(&self, key: PageKey) -> Option<&H> {
        self.page(key).map(|page| &page.handle)
    }

    /// Returns the handle behind `key` mutably.
    pub fn get_mut(&mut self, key: PageKey) -> Option<&mut H> {
        self.page_mut(key).map(|page| &mut page.handle)
    }

    /// Returns the identity `key` was acquired for.
    #[must_use]
    pub fn identity(&self, key: PageKey) -> Option<&K> {
        self.page(key).map(|page| &page.identity)
    }

    fn page(&self, key: PageKey) -> Option<&Page<K, H>> {
        let slot = self.slots.get(key.idx())?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.page.as_ref()
    }

    fn page_mut(&mut self, key: PageKey) -> Option<&mut Page<K, H>> {
        let slot = self.slots.get_mut(key.idx())?;
        if slot.generation != key.generation() {
            return None;
        }
        slot.page.as_mut()
    }

    fn vacate(&mut self, idx: usize) -> Option<H> {
        let page = self.slots.get_mut(idx)?.page.take()?;
        self.by_identity.remove(&page.identity);
        self.free_list.push(idx);
        Some(page.handle)
    }
}
