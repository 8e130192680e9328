// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carousel Pager: a headless carousel engine for native paging widgets.
//!
//! Platform pagers (a `ViewPager`, a page view controller, a scroll view with
//! paging) own their pages, their gestures, and their animations. What they do
//! not own is the logic that keeps them in step with a control's properties
//! and an observable item collection. This crate is that logic, with no UI
//! toolkit attached:
//!
//! - [`Carousel`]: the controller. It mirrors the items, owns the logical
//!   position, and drives a [`PagingWidget`] implemented by the host.
//! - [`PageAdapter`] and the [`padding`] helpers: the page snapshot the widget
//!   reads, padded with sentinel duplicates when infinite scrolling is on so a
//!   swipe past either end wraps around.
//! - [`PositionSync`]: position bookkeeping that tells the carousel's own
//!   writes apart from host assignments, so property echoes do not turn into
//!   navigation.
//! - [`ScrollProgress`]: signed percent-complete reporting for drags and
//!   programmatic transitions.
//! - [`autoplay`] and [`visibility`]: the autoplay timer and the arrow and
//!   indicator policies.
//!
//! Page handles are keyed by item identity through [`carousel_pages`], so a
//! sentinel and the real page it mirrors share one native view.
//!
//! The host forwards property changes, collection changes, widget callbacks,
//! and clock ticks, then drains [`CarouselEvent`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use carousel_pager::{
//!     Carousel, CarouselConfig, CarouselEvent, PagingWidget, ScrollState, Transition, WidgetError,
//! };
//!
//! /// A pager that jumps instantly.
//! #[derive(Default)]
//! struct Pager {
//!     pages: usize,
//!     current: usize,
//! }
//!
//! impl PagingWidget<&'static str> for Pager {
//!     type Page = String;
//!     fn page_count(&self) -> usize { self.pages }
//!     fn current_page(&self) -> usize { self.current }
//!     fn set_current_page(&mut self, page: usize, _: Transition) { self.current = page; }
//!     fn reload(&mut self, page_count: usize) { self.pages = page_count; }
//!     fn insert_page(&mut self, _: usize) -> Result<(), WidgetError> {
//!         self.pages += 1;
//!         Ok(())
//!     }
//!     fn set_paging_enabled(&mut self, _: bool) {}
//!     fn create_page(&mut self, item: &&'static str) -> String { item.to_uppercase() }
//!     fn dispose_page(&mut self, _: String) {}
//! }
//!
//! let config = CarouselConfig { infinite_scrolling: true, ..CarouselConfig::default() };
//! let mut carousel = Carousel::new(config, Some(vec!["a", "b", "c"]));
//! carousel.attach(Pager::default());
//! // Three items plus a sentinel at each end.
//! assert_eq!(carousel.widget().unwrap().page_count(), 5);
//!
//! // The user swipes backwards past the first item, onto the head sentinel.
//! carousel.on_scroll_state_changed(ScrollState::Dragging);
//! carousel.widget_mut().unwrap().current = 0;
//! carousel.on_scroll_state_changed(ScrollState::Idle);
//!
//! // The carousel snapped to the real last page.
//! assert_eq!(carousel.position(), 2);
//! assert_eq!(carousel.widget().unwrap().current_page(), 3);
//! assert_eq!(
//!     carousel.drain_events().last(),
//!     Some(&CarouselEvent::PositionSelected(2))
//! );
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable the `libm` feature when
//! building without `std`.

#![no_std]

extern crate alloc;

pub mod autoplay;
mod carousel;
mod config;
mod error;
mod event;
pub mod padding;
mod paging;
mod source;
mod sync;
pub mod visibility;
mod widget;

pub use carousel::{Carousel, REMOVAL_SETTLE_DELAY_MS};
pub use carousel_pages::{Identity, PageKey};
pub use config::{AutoplayWrap, CarouselConfig, Orientation, PropertyChange};
pub use error::{ChangeError, WidgetError};
pub use event::CarouselEvent;
pub use padding::PageAdapter;
pub use paging::{
    NavDirection, ScrollDirection, ScrollProgress, ScrollState, Transition, nav_direction,
};
pub use source::{CollectionChange, ItemSource};
pub use sync::{PositionSync, SyncToken, clamp_position};
pub use visibility::{Arrows, Indicators};
pub use widget::PagingWidget;
