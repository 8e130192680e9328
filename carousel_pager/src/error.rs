// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! None of these escape [`Carousel`](crate::Carousel): it logs them and heals
//! by rebuilding its page adapter. They are public so widget adapters and
//! tests can produce and inspect them.

use thiserror::Error;

/// Failure reported by a [`PagingWidget`](crate::PagingWidget).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The widget could not splice a page in at this index.
    #[error("cannot insert page {page} into a widget holding {count} pages")]
    InsertRejected {
        /// Requested page index.
        page: usize,
        /// Pages the widget held.
        count: usize,
    },
}

/// A collection change that does not fit the mirrored items.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChangeError {
    /// An index past the end of the collection.
    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Items in the mirror before the change.
        len: usize,
    },
    /// An incremental change arrived while no items source is bound.
    #[error("no items source is bound")]
    NoItemsSource,
}
