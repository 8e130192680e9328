// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Autoplay timer.
//!
//! The timer does not own a clock. The host polls it from its UI loop with a
//! monotonic millisecond timestamp, so every tick already runs on the thread
//! that owns the carousel.

use crate::AutoplayWrap;

/// A repeating timer polled with host timestamps.
#[derive(Clone, Debug, Default)]
pub struct Autoplay {
    delay_ms: u64,
    next_due: Option<u64>,
}

impl Autoplay {
    /// Creates a stopped timer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delay_ms: 0,
            next_due: None,
        }
    }

    /// Returns `true` while the timer is scheduled.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Period of the running timer.
    #[must_use]
    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Timestamp of the next tick.
    #[must_use]
    pub const fn next_due(&self) -> Option<u64> {
        self.next_due
    }

    /// (Re)starts the timer with its first tick `delay_ms` after `now`.
    ///
    /// A zero delay stops it instead.
    pub fn start(&mut self, now: u64, delay_ms: u64) {
        if delay_ms == 0 {
            self.stop();
            return;
        }
        self.delay_ms = delay_ms;
        self.next_due = Some(now.saturating_add(delay_ms));
    }

    /// Stops the timer.
    pub fn stop(&mut self) {
        self.next_due = None;
    }

    /// Returns `true` if a tick is due at `now`, scheduling the next one.
    ///
    /// Missed periods collapse into a single tick.
    pub fn poll(&mut self, now: u64) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let mut next = due.saturating_add(self.delay_ms);
        if next <= now {
            next = now.saturating_add(self.delay_ms);
        }
        self.next_due = Some(next);
        true
    }
}

/// Returns `true` if autoplay should run.
///
/// Autoplay only runs on an attached, infinite carousel with a positive
/// interval and more than one item.
#[must_use]
pub const fn is_eligible(attached: bool, infinite: bool, interval_secs: u32, count: usize) -> bool {
    attached && infinite && interval_secs > 0 && count > 1
}

/// What an autoplay tick does.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum AutoplayStep {
    /// Move to this position.
    Advance(usize),
    /// Move onto the tail sentinel; the settle snap completes the wrap.
    ThroughSentinel,
    /// Jump back to the first position.
    Rewind,
}

/// Decides the step taken by a tick at `position`.
#[must_use]
pub const fn next_step(
    position: usize,
    count: usize,
    infinite: bool,
    wrap: AutoplayWrap,
) -> Option<AutoplayStep> {
    if count < 2 {
        return None;
    }
    if position < count - 1 {
        return Some(AutoplayStep::Advance(position + 1));
    }
    match wrap {
        AutoplayWrap::Sentinel if infinite => Some(AutoplayStep::ThroughSentinel),
        _ => Some(AutoplayStep::Rewind),
    }
}
