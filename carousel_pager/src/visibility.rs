// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arrow and indicator state.
//!
//! Both are pure functions of the position, the item count, and the mode
//! flags. Hosts re-read them after every event and lay the controls out
//! themselves.

bitflags::bitflags! {
    /// Which navigation arrows are shown.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Arrows: u8 {
        /// The previous arrow.
        const PREV = 0b0000_0001;
        /// The next arrow.
        const NEXT = 0b0000_0010;
    }
}

/// Computes arrow visibility.
///
/// `count` is `None` while no items source is bound. An infinite carousel
/// shows both arrows once it holds two items; a finite one hides the arrow
/// pointing past either end.
#[must_use]
pub fn arrows(position: usize, count: Option<usize>, infinite: bool, show_arrows: bool) -> Arrows {
    let Some(count) = count else {
        return Arrows::empty();
    };
    if !show_arrows || count == 0 || (infinite && count < 2) {
        return Arrows::empty();
    }
    if infinite {
        return Arrows::all();
    }
    let mut arrows = Arrows::empty();
    arrows.set(Arrows::PREV, position > 0);
    arrows.set(Arrows::NEXT, position < count - 1);
    arrows
}

/// Indicator strip state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Indicators {
    /// Show the strip.
    pub visible: bool,
    /// One indicator per real item.
    pub count: usize,
    /// Highlighted indicator.
    pub current: usize,
}

/// Computes indicator state. Sentinels never get an indicator of their own.
#[must_use]
pub const fn indicators(position: usize, count: usize, show_indicators: bool) -> Indicators {
    Indicators {
        visible: show_indicators && count > 0,
        count,
        current: if count == 0 { 0 } else { position },
    }
}
