// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mode flags and host property changes.

use alloc::vec::Vec;

use kurbo::Size;

/// Axis the carousel pages along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Pages move left and right.
    #[default]
    Horizontal,
    /// Pages move up and down.
    Vertical,
}

/// How autoplay leaves the last real page.
///
/// Widgets differ in how they wrap: a pager backed by a padded adapter can keep
/// stepping forward onto the tail sentinel, while one that only knows the real
/// items has to jump back explicitly.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AutoplayWrap {
    /// Step onto the tail sentinel and let the settle snap land on the first page.
    #[default]
    Sentinel,
    /// Navigate straight back to the first page.
    Rewind,
}

/// Mode flags read by the carousel.
///
/// The defaults match a freshly created control: animated, swipeable,
/// horizontal, finite, no autoplay, arrows and indicators hidden.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Pad the pages with sentinels so swiping wraps around.
    pub infinite_scrolling: bool,
    /// Seconds between autoplay steps; `0` disables autoplay.
    pub autoplay_interval_secs: u32,
    /// Animate programmatic page changes.
    pub animate_transition: bool,
    /// Let the user swipe between pages.
    pub is_swipe_enabled: bool,
    /// Paging axis.
    pub orientation: Orientation,
    /// Show the previous/next arrows.
    pub show_arrows: bool,
    /// Show the page indicators.
    pub show_indicators: bool,
    /// How autoplay wraps past the last page.
    pub autoplay_wrap: AutoplayWrap,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            infinite_scrolling: false,
            autoplay_interval_secs: 0,
            animate_transition: true,
            is_swipe_enabled: true,
            orientation: Orientation::Horizontal,
            show_arrows: false,
            show_indicators: false,
            autoplay_wrap: AutoplayWrap::Sentinel,
        }
    }
}

impl CarouselConfig {
    /// Autoplay period in milliseconds.
    #[must_use]
    pub const fn autoplay_delay_ms(&self) -> u64 {
        self.autoplay_interval_secs as u64 * 1000
    }
}

/// A change to one of the host control's properties.
///
/// Hosts forward every property notification through
/// [`Carousel::set_property`](crate::Carousel::set_property).
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyChange<T> {
    /// The position was assigned.
    Position(usize),
    /// The selected item was assigned.
    SelectedItem(Option<T>),
    /// A different collection (or none) was bound.
    ItemsSource(Option<Vec<T>>),
    /// The item template or template selector changed; pages must be rebuilt.
    ItemTemplate,
    /// Infinite scrolling was toggled.
    InfiniteScrolling(bool),
    /// The autoplay interval changed, in seconds.
    AutoplayInterval(u32),
    /// Transition animation was toggled.
    AnimateTransition(bool),
    /// Swiping was toggled.
    IsSwipeEnabled(bool),
    /// The paging axis changed.
    Orientation(Orientation),
    /// Arrows were shown or hidden.
    ShowArrows(bool),
    /// Indicators were shown or hidden.
    ShowIndicators(bool),
    /// The control was laid out at a new size.
    Bounds(Size),
}
