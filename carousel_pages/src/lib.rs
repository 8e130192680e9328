// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel Pages: an identity-keyed arena for page handles.
//!
//! Paging widgets realize one view per page and recycle them as the user moves
//! through the carousel. Indices are a poor key for those views: inserting or
//! removing an item shifts every index after it, and an infinite carousel shows
//! the same item at two indices (the real page and its sentinel duplicate).
//!
//! [`PageArena`] keys handles by a stable item identity instead:
//!
//! - [`Identity`] extracts the key from an item (a content value, a database id,
//!   or anything else that stays stable while the item is in the collection).
//! - [`PageArena::acquire`] returns a generational [`PageKey`], creating the
//!   handle on first use and sharing it between every slot showing that item.
//! - [`PageArena::release`] drops one reference and hands the handle back for
//!   disposal when nothing references it anymore.
//! - [`PageArena::evict`], [`PageArena::retain`], and [`PageArena::clear`]
//!   force handles out (for a replaced item, items that left the collection,
//!   or a template change), returning them for disposal.
//!
//! Keys from evicted slots become stale; later lookups through them fail with
//! [`ArenaError::StaleKey`] instead of aliasing a newer page.
//!
//! ## Minimal example
//!
//! ```rust
//! use carousel_pages::PageArena;
//!
//! // Handles are plain strings here; a real host stores native views.
//! let mut arena: PageArena<u32, &str> = PageArena::new();
//!
//! let real = arena.acquire(7, || "view for item 7");
//! // The sentinel duplicate of item 7 shares the same handle.
//! let sentinel = arena.acquire(7, || unreachable!());
//! assert_eq!(real, sentinel);
//! assert_eq!(arena.len(), 1);
//!
//! // The first release keeps the handle alive, the second returns it.
//! assert_eq!(arena.release(real), Ok(None));
//! assert_eq!(arena.release(real), Ok(Some("view for item 7")));
//! assert!(arena.is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arena;
mod identity;

pub use arena::{ArenaError, PageArena, PageKey};
pub use identity::Identity;
