// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll states, transitions, and scroll-progress reporting.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Size};

use crate::Orientation;

/// Scroll state reported by the paging widget.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollState {
    /// At rest on a page.
    #[default]
    Idle,
    /// The user is dragging.
    Dragging,
    /// Released and animating towards a page.
    Settling,
}

/// Direction of a programmatic page transition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NavDirection {
    /// Towards higher pages.
    #[default]
    Forward,
    /// Towards lower pages.
    Reverse,
}

/// How the widget should move to a page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Animate the change.
    pub animated: bool,
    /// Direction the animation should read in.
    pub direction: NavDirection,
}

impl Transition {
    /// An instant, unanimated jump. Used for sentinel snaps and resyncs.
    pub const SILENT: Self = Self {
        animated: false,
        direction: NavDirection::Forward,
    };

    /// A transition in `direction`, animated when `animated` is set.
    #[must_use]
    pub const fn new(animated: bool, direction: NavDirection) -> Self {
        Self {
            animated,
            direction,
        }
    }
}

/// Direction reported alongside scroll progress.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScrollDirection {
    /// Horizontal, towards the previous page.
    Left,
    /// Horizontal, towards the next page.
    Right,
    /// Vertical, towards the previous page.
    Up,
    /// Vertical, towards the next page.
    Down,
}

impl ScrollDirection {
    /// Direction of forward movement along `orientation`.
    #[must_use]
    pub const fn forward(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::Right,
            Orientation::Vertical => Self::Down,
        }
    }

    /// Direction of backward movement along `orientation`.
    #[must_use]
    pub const fn backward(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::Left,
            Orientation::Vertical => Self::Up,
        }
    }

    /// Direction matching a navigation direction.
    #[must_use]
    pub const fn of(direction: NavDirection, orientation: Orientation) -> Self {
        match direction {
            NavDirection::Forward => Self::forward(orientation),
            NavDirection::Reverse => Self::backward(orientation),
        }
    }

    /// Returns `true` for `Left` and `Up`.
    #[must_use]
    pub const fn is_backward(self) -> bool {
        matches!(self, Self::Left | Self::Up)
    }
}

/// Picks the direction for a programmatic move from `previous` to `target`.
///
/// An explicit `hint` (from an arrow click) wins. Otherwise wrapping between
/// the last and first page of an infinite carousel keeps reading in the wrap
/// direction, and everything else compares the two positions, defaulting to
/// forward.
#[must_use]
pub const fn nav_direction(
    target: usize,
    previous: usize,
    count: usize,
    infinite: bool,
    hint: Option<NavDirection>,
) -> NavDirection {
    if let Some(hint) = hint {
        return hint;
    }
    if infinite && count > 1 {
        if target == 0 && previous == count - 1 {
            return NavDirection::Forward;
        }
        if target == count - 1 && previous == 0 {
            return NavDirection::Reverse;
        }
    }
    if target < previous {
        NavDirection::Reverse
    } else {
        NavDirection::Forward
    }
}

/// Programmatic transitions produce this many page-scrolled callbacks.
const PROGRAMMATIC_CALLBACKS: u8 = 2;

/// Turns raw widget scroll callbacks into signed percent-complete reports.
///
/// Two callback shapes are supported: page-relative offsets
/// ([`on_page_scrolled`](Self::on_page_scrolled)) and absolute content offsets
/// of a three-page scroll view ([`on_content_offset`](Self::on_content_offset)).
/// Reported percentages are negative for backward directions.
#[derive(Clone, Debug)]
pub struct ScrollProgress {
    orientation: Orientation,
    direction: ScrollDirection,
    programmatic: bool,
    callbacks: u8,
    last_percent: f64,
    last_offset: f64,
}

impl ScrollProgress {
    /// Creates a tracker for `orientation`.
    #[must_use]
    pub const fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            direction: ScrollDirection::forward(orientation),
            programmatic: false,
            callbacks: 0,
            last_percent: 0.0,
            last_offset: 0.0,
        }
    }

    /// Last perceived direction.
    #[must_use]
    pub const fn direction(&self) -> ScrollDirection {
        self.direction
    }

    /// Returns `true` while a programmatic transition is being reported.
    #[must_use]
    pub const fn is_programmatic(&self) -> bool {
        self.programmatic
    }

    /// Switches axis, forgetting direction history.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        *self = Self::new(orientation);
    }

    /// Notes the direction of an explicit step, such as an arrow click.
    pub fn set_direction(&mut self, direction: NavDirection) {
        self.direction = ScrollDirection::of(direction, self.orientation);
    }

    /// Starts reporting a programmatic transition.
    pub fn begin_programmatic(&mut self, direction: NavDirection) {
        self.set_direction(direction);
        self.programmatic = true;
        self.callbacks = 0;
    }

    /// Stops reporting a programmatic transition early, when the user takes
    /// over or the widget comes to rest.
    pub fn finish_programmatic(&mut self) {
        self.programmatic = false;
        self.callbacks = 0;
    }

    /// Handles a page-relative scroll callback.
    ///
    /// `page` is the leftmost (topmost) visible page and `offset` the fraction
    /// of it scrolled out of view; `current` is the page the carousel believes
    /// it is on. Returns a report while `dragging` or during a programmatic
    /// transition.
    pub fn on_page_scrolled(
        &mut self,
        page: usize,
        current: usize,
        offset: f64,
        dragging: bool,
    ) -> Option<(f64, ScrollDirection)> {
        let percent = if self.programmatic {
            let percent = f64::from(self.callbacks) * 100.0;
            self.callbacks += 1;
            percent
        } else if page < current {
            self.direction = ScrollDirection::backward(self.orientation);
            ((1.0 - offset) * 100.0).floor()
        } else {
            self.direction = ScrollDirection::forward(self.orientation);
            (offset * 100.0).floor()
        };

        let report = (dragging || self.programmatic).then(|| (self.signed(percent), self.direction));

        if self.callbacks == PROGRAMMATIC_CALLBACKS {
            self.programmatic = false;
            self.callbacks = 0;
        }
        report
    }

    /// Handles a content-offset callback from a three-page scroll view.
    ///
    /// The resting page sits one `page` extent into the content, so progress is
    /// the distance from there. Only growing percentages are reported; a drop
    /// starts a new gesture.
    pub fn on_content_offset(&mut self, offset: Point, page: Size) -> Option<(f64, ScrollDirection)> {
        let (position, extent) = match self.orientation {
            Orientation::Horizontal => (offset.x, page.width),
            Orientation::Vertical => (offset.y, page.height),
        };
        if extent <= 0.0 {
            return None;
        }
        let percent = ((position - extent).abs() / extent * 100.0).floor();
        self.direction = if self.last_offset > position {
            ScrollDirection::backward(self.orientation)
        } else {
            ScrollDirection::forward(self.orientation)
        };
        self.last_offset = position;

        if percent <= 100.0 && percent > self.last_percent {
            self.last_percent = percent;
            Some((self.signed(percent), self.direction))
        } else {
            self.last_percent = 0.0;
            None
        }
    }

    fn signed(&self, percent: f64) -> f64 {
        if self.direction.is_backward() {
            -percent
        } else {
            percent
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::{NavDirection, ScrollDirection, ScrollProgress, nav_direction};
    use crate::Orientation;

    #[test]
    fn direction_defaults_forward_and_honors_hints_and_wraps() {
        assert_eq!(nav_direction(2, 1, 3, false, None), NavDirection::Forward);
        assert_eq!(nav_direction(1, 1, 3, false, None), NavDirection::Forward);
        assert_eq!(nav_direction(0, 2, 3, false, None), NavDirection::Reverse);
        // Wrapping forward from the last page in infinite mode.
        assert_eq!(nav_direction(0, 2, 3, true, None), NavDirection::Forward);
        assert_eq!(nav_direction(2, 0, 3, true, None), NavDirection::Reverse);
        assert_eq!(
            nav_direction(2, 1, 3, false, Some(NavDirection::Reverse)),
            NavDirection::Reverse
        );
    }

    #[test]
    fn drag_progress_is_floored_and_signed() {
        let mut progress = ScrollProgress::new(Orientation::Horizontal);
        // Dragging towards the next page.
        assert_eq!(
            progress.on_page_scrolled(1, 1, 0.257, true),
            Some((25.0, ScrollDirection::Right))
        );
        // Dragging back: the previous page is the leftmost visible one.
        assert_eq!(
            progress.on_page_scrolled(0, 1, 0.75, true),
            Some((-25.0, ScrollDirection::Left))
        );
        // Not dragging and not programmatic: nothing reported.
        assert_eq!(progress.on_page_scrolled(1, 1, 0.5, false), None);
    }

    #[test]
    fn programmatic_progress_reports_twice() {
        let mut progress = ScrollProgress::new(Orientation::Vertical);
        progress.begin_programmatic(NavDirection::Forward);
        assert_eq!(
            progress.on_page_scrolled(0, 0, 0.3, false),
            Some((0.0, ScrollDirection::Down))
        );
        assert_eq!(
            progress.on_page_scrolled(0, 0, 0.9, false),
            Some((100.0, ScrollDirection::Down))
        );
        assert!(!progress.is_programmatic());
        // A duplicate native callback after the pair is ignored.
        assert_eq!(progress.on_page_scrolled(1, 1, 0.0, false), None);
    }

    #[test]
    fn content_offset_reports_growing_progress() {
        let mut progress = ScrollProgress::new(Orientation::Horizontal);
        let page = Size::new(200.0, 100.0);
        // Resting offset is one page in; start there.
        assert_eq!(progress.on_content_offset(Point::new(200.0, 0.0), page), None);
        assert_eq!(
            progress.on_content_offset(Point::new(250.0, 0.0), page),
            Some((25.0, ScrollDirection::Right))
        );
        assert_eq!(
            progress.on_content_offset(Point::new(300.0, 0.0), page),
            Some((50.0, ScrollDirection::Right))
        );
        // Moving back towards the resting offset shrinks progress: not reported.
        assert_eq!(progress.on_content_offset(Point::new(260.0, 0.0), page), None);
        assert_eq!(
            progress.on_content_offset(Point::new(150.0, 0.0), page),
            Some((-25.0, ScrollDirection::Left))
        );
        assert_eq!(progress.on_content_offset(Point::ZERO, Size::ZERO), None);
    }
}
