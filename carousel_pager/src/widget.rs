// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The native paging widget, as seen by the carousel.

use crate::{Transition, WidgetError};

/// A platform paging widget driven by a [`Carousel`](crate::Carousel).
///
/// Page indices are padded: they include the infinite-scroll sentinels.
/// Implementations forward the widget's own callbacks back into the carousel
/// (`on_scroll_state_changed`, `on_page_scrolled`, `on_page_selected`) and
/// call its page adapter methods when the widget needs page content.
///
/// Calls made from inside the carousel must not re-enter it. Widgets that
/// raise callbacks synchronously should queue them until the call returns.
pub trait PagingWidget<T> {
    /// Native handle for a materialized page.
    type Page;

    /// Pages the widget currently believes it holds.
    fn page_count(&self) -> usize;

    /// Page the widget currently shows.
    fn current_page(&self) -> usize;

    /// Moves to `page`.
    fn set_current_page(&mut self, page: usize, transition: Transition);

    /// Drops all pages and re-reads the page count.
    fn reload(&mut self, page_count: usize);

    /// Splices a single page in at `page` without a full reload.
    fn insert_page(&mut self, page: usize) -> Result<(), WidgetError>;

    /// Enables or disables user swiping.
    fn set_paging_enabled(&mut self, enabled: bool);

    /// Materializes the page showing `item`.
    fn create_page(&mut self, item: &T) -> Self::Page;

    /// Releases a page handle that no slot references any more.
    fn dispose_page(&mut self, page: Self::Page);
}
