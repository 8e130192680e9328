// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications for the host control.

use crate::ScrollDirection;

/// A notification queued by the carousel.
///
/// Events accumulate until the host calls
/// [`Carousel::drain_events`](crate::Carousel::drain_events).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CarouselEvent {
    /// The widget settled; this is the new logical position.
    PositionSelected(usize),
    /// Scroll progress during a drag or programmatic transition.
    Scrolled {
        /// Signed percent complete; negative towards the previous page.
        percent: f64,
        /// Perceived direction.
        direction: ScrollDirection,
    },
    /// A forward drag ended on the last page of a finite carousel.
    LoadMore,
}
