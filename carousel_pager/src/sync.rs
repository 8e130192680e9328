// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Position bookkeeping shared by the carousel's three position writers.
//!
//! The position changes from three directions: the host assigns it, the widget
//! settles on a page, and collection changes shift it. Writes made by the
//! carousel itself are reported back to the host, whose property system tends
//! to echo them straight back as assignments. [`SyncToken`] records which kind
//! of write is in flight so an echo is recognized instead of being treated as
//! a fresh request to navigate.

/// Which kind of position write is in flight.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SyncToken {
    /// Nothing pending.
    #[default]
    Idle,
    /// The carousel wrote `position`; an assignment of the same value is an echo.
    ApplyingInternal {
        /// Value written.
        position: usize,
    },
    /// The host asked for `target` and the widget is on its way there.
    ApplyingExternal {
        /// Requested position.
        target: usize,
    },
}

/// Clamps a requested position into `0..count`.
///
/// Negative requests (an item lookup that found nothing) land on the first
/// page, requests past the end on the last one, and an empty carousel always
/// sits at `0`.
#[must_use]
pub const fn clamp_position(requested: isize, count: usize) -> usize {
    if count == 0 || requested < 0 {
        return 0;
    }
    let requested = requested.unsigned_abs();
    if requested > count - 1 {
        count - 1
    } else {
        requested
    }
}

/// Logical position plus the bookkeeping needed to route writes to it.
#[derive(Clone, Debug, Default)]
pub struct PositionSync {
    position: usize,
    previous: usize,
    token: SyncToken,
}

impl PositionSync {
    /// Starts at `position`.
    #[must_use]
    pub const fn new(position: usize) -> Self {
        Self {
            position,
            previous: position,
            token: SyncToken::Idle,
        }
    }

    /// Current logical position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Position the widget was last sent to; drives transition direction.
    #[must_use]
    pub const fn previous(&self) -> usize {
        self.previous
    }

    /// Write currently in flight.
    #[must_use]
    pub const fn token(&self) -> SyncToken {
        self.token
    }

    /// Records a write made by the carousel itself.
    pub fn write_internal(&mut self, position: usize) {
        self.position = position;
        self.token = SyncToken::ApplyingInternal { position };
    }

    /// Classifies an assignment coming from the host.
    ///
    /// Returns the clamped target when the widget has to move, or `None` when
    /// the assignment is an echo of the carousel's own write or does not change
    /// anything.
    pub fn accept_external(&mut self, requested: usize, count: usize) -> Option<usize> {
        if let SyncToken::ApplyingInternal { position } = self.token {
            self.token = SyncToken::Idle;
            if position == requested {
                return None;
            }
        }
        let target = clamp_position(isize::try_from(requested).unwrap_or(isize::MAX), count);
        if target == self.position {
            return None;
        }
        self.position = target;
        self.token = SyncToken::ApplyingExternal { target };
        Some(target)
    }

    /// Remembers where the widget was sent.
    pub fn navigated(&mut self, position: usize) {
        self.previous = position;
    }

    /// Adopts the position the widget came to rest on.
    ///
    /// Returns `true` if it differs from an outstanding external target, which
    /// happens when a swipe interrupts a programmatic transition.
    pub fn settled(&mut self, position: usize) -> bool {
        let interrupted =
            matches!(self.token, SyncToken::ApplyingExternal { target } if target != position);
        self.position = position;
        self.previous = position;
        self.token = SyncToken::Idle;
        interrupted
    }

    /// Re-clamps after the collection changed size, as an internal write.
    pub fn clamp(&mut self, count: usize) {
        let clamped = clamp_position(isize::try_from(self.position).unwrap_or(isize::MAX), count);
        self.write_internal(clamped);
        self.previous = clamped;
    }
}
