// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The carousel controller.

use alloc::vec::Vec;
use core::fmt;

use carousel_pages::{Identity, PageArena, PageKey};
use kurbo::{Point, Size};
use tracing::{debug, trace, warn};

use crate::autoplay::{self, Autoplay, AutoplayStep};
use crate::padding::{self, PageAdapter};
use crate::sync::{PositionSync, SyncToken, clamp_position};
use crate::visibility::{self, Arrows, Indicators};
use crate::{
    CarouselConfig, CarouselEvent, ChangeError, CollectionChange, ItemSource, NavDirection,
    PagingWidget, PropertyChange, ScrollProgress, ScrollState, Transition, nav_direction,
};

/// How long a removed current page stays in the widget while it animates
/// away, in milliseconds.
pub const REMOVAL_SETTLE_DELAY_MS: u64 = 100;

/// A removed page still shown while the widget animates to its neighbor.
#[derive(Copy, Clone, Debug)]
struct PendingRemoval {
    index: usize,
    due_ms: u64,
}

/// Keeps a logical position, an item collection, and a native paging widget
/// consistent.
///
/// The carousel is driven entirely by the host:
///
/// - property assignments arrive through [`set_property`](Self::set_property)
///   (or the [`set_position`](Self::set_position) and
///   [`set_selected_item`](Self::set_selected_item) shorthands),
/// - collection changes through [`apply_change`](Self::apply_change),
/// - widget callbacks through the `on_*` methods and the page adapter methods
///   ([`instantiate_page`](Self::instantiate_page),
///   [`destroy_page`](Self::destroy_page)),
/// - time through [`tick`](Self::tick).
///
/// Notifications for the host control queue up until
/// [`drain_events`](Self::drain_events).
pub struct Carousel<T, W>
where
    T: Identity,
    W: PagingWidget<T>,
{
    config: CarouselConfig,
    items: ItemSource<T>,
    adapter: PageAdapter<T>,
    sync: PositionSync,
    selected: Option<T>,
    state: ScrollState,
    progress: ScrollProgress,
    autoplay: Autoplay,
    pages: PageArena<T::Key, W::Page>,
    widget: Option<W>,
    bounds: Size,
    pending_removal: Option<PendingRemoval>,
    now_ms: u64,
    nav_hint: Option<NavDirection>,
    events: Vec<CarouselEvent>,
}

impl<T, W> fmt::Debug for Carousel<T, W>
where
    T: Identity + fmt::Debug,
    W: PagingWidget<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("config", &self.config)
            .field("items", &self.items)
            .field("sync", &self.sync)
            .field("selected", &self.selected)
            .field("state", &self.state)
            .field("autoplay", &self.autoplay)
            .field("pages", &self.pages.len())
            .field("attached", &self.widget.is_some())
            .field("pending_removal", &self.pending_removal)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl<T, W> Carousel<T, W>
where
    T: Identity + Clone + PartialEq,
    W: PagingWidget<T>,
{
    /// Creates a detached carousel over `items` at position `0`.
    #[must_use]
    pub fn new(config: CarouselConfig, items: Option<Vec<T>>) -> Self {
        let items = ItemSource::new(items);
        let adapter = PageAdapter::new(items.items(), config.infinite_scrolling);
        let selected = items.item_at(0).cloned();
        let progress = ScrollProgress::new(config.orientation);
        Self {
            config,
            items,
            adapter,
            sync: PositionSync::new(0),
            selected,
            state: ScrollState::Idle,
            progress,
            autoplay: Autoplay::new(),
            pages: PageArena::new(),
            widget: None,
            bounds: Size::ZERO,
            pending_removal: None,
            now_ms: 0,
            nav_hint: None,
            events: Vec::new(),
        }
    }

    // --- Accessors ---

    /// Current mode flags.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Current logical position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.sync.position()
    }

    /// Item at the current position.
    #[must_use]
    pub fn selected_item(&self) -> Option<&T> {
        self.selected.as_ref()
    }

    /// Mirrored items, or `None` when no source is bound.
    #[must_use]
    pub fn items(&self) -> Option<&[T]> {
        self.items.items()
    }

    /// Number of real items.
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.count()
    }

    /// The page snapshot the widget reads from.
    #[must_use]
    pub fn adapter(&self) -> &PageAdapter<T> {
        &self.adapter
    }

    /// Position write currently in flight.
    #[must_use]
    pub fn sync_token(&self) -> SyncToken {
        self.sync.token()
    }

    /// Last scroll state reported by the widget.
    #[must_use]
    pub fn scroll_state(&self) -> ScrollState {
        self.state
    }

    /// Returns `true` while the autoplay timer is scheduled.
    #[must_use]
    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_running()
    }

    /// Returns `true` while a removed page is still animating out.
    #[must_use]
    pub fn has_pending_removal(&self) -> bool {
        self.pending_removal.is_some()
    }

    /// Returns `true` if a widget is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.widget.is_some()
    }

    /// The attached widget.
    #[must_use]
    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    /// The attached widget, mutably.
    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }

    /// Which arrows the host should show.
    #[must_use]
    pub fn arrows(&self) -> Arrows {
        visibility::arrows(
            self.position(),
            self.items.is_bound().then_some(self.items.count()),
            self.config.infinite_scrolling,
            self.config.show_arrows,
        )
    }

    /// Indicator strip state.
    #[must_use]
    pub fn indicators(&self) -> Indicators {
        visibility::indicators(self.position(), self.count(), self.config.show_indicators)
    }

    /// Takes every queued notification.
    pub fn drain_events(&mut self) -> Vec<CarouselEvent> {
        core::mem::take(&mut self.events)
    }

    // --- Widget lifetime ---

    /// Attaches `widget`, returning the one it replaces.
    ///
    /// The widget is reloaded with the current pages and moved to the current
    /// position without animation.
    pub fn attach(&mut self, widget: W) -> Option<W> {
        let previous = self.detach();
        self.widget = Some(widget);
        self.sync.clamp(self.count());
        self.reset_adapter();
        if let Some(widget) = self.widget.as_mut() {
            widget.set_paging_enabled(self.config.is_swipe_enabled);
        }
        self.send_position_selected();
        self.add_autoplay();
        previous
    }

    /// Re-applies the current page once the widget has been laid out.
    pub fn on_loaded(&mut self) {
        if self.adapter.is_empty() {
            return;
        }
        let page = self.page_of(self.position());
        if let Some(widget) = self.widget.as_mut() {
            widget.set_current_page(page, Transition::SILENT);
        }
    }

    /// Detaches the widget after disposing every page handle.
    pub fn detach(&mut self) -> Option<W> {
        let mut widget = self.widget.take()?;
        self.autoplay.stop();
        for page in self.pages.clear() {
            widget.dispose_page(page);
        }
        self.finish_removal();
        self.state = ScrollState::Idle;
        debug!("Carousel detached from its widget");
        Some(widget)
    }

    // --- Host properties ---

    /// Applies a host property change.
    pub fn set_property(&mut self, change: PropertyChange<T>) {
        match change {
            PropertyChange::Position(position) => self.set_position(position),
            PropertyChange::SelectedItem(item) => self.set_selected_item(item),
            PropertyChange::ItemsSource(items) => {
                self.remove_autoplay();
                self.pending_removal = None;
                self.items.set(items);
                self.sync.clamp(self.count());
                self.reset_adapter();
                self.send_position_selected();
                self.add_autoplay();
            }
            PropertyChange::ItemTemplate => {
                let pages = self.pages.clear();
                self.dispose_pages(pages);
                self.reset_adapter();
                self.send_position_selected();
            }
            PropertyChange::InfiniteScrolling(infinite) => {
                self.remove_autoplay();
                self.config.infinite_scrolling = infinite;
                self.reset_adapter();
                self.add_autoplay();
            }
            PropertyChange::AutoplayInterval(secs) => {
                self.remove_autoplay();
                self.config.autoplay_interval_secs = secs;
                self.add_autoplay();
            }
            PropertyChange::AnimateTransition(animate) => self.config.animate_transition = animate,
            PropertyChange::IsSwipeEnabled(enabled) => {
                self.config.is_swipe_enabled = enabled;
                if let Some(widget) = self.widget.as_mut() {
                    widget.set_paging_enabled(enabled);
                }
            }
            PropertyChange::Orientation(orientation) => {
                self.remove_autoplay();
                self.config.orientation = orientation;
                self.progress.set_orientation(orientation);
                self.reset_adapter();
                self.send_position_selected();
                self.add_autoplay();
            }
            PropertyChange::ShowArrows(show) => self.config.show_arrows = show,
            PropertyChange::ShowIndicators(show) => self.config.show_indicators = show,
            PropertyChange::Bounds(size) => {
                if size.height <= 0.0 || size == self.bounds {
                    return;
                }
                self.bounds = size;
                self.remove_autoplay();
                self.reset_adapter();
                self.send_position_selected();
                self.add_autoplay();
            }
        }
    }

    /// Host assignment of the position.
    ///
    /// Out-of-range values clamp. Echoes of the carousel's own writes and
    /// assignments of the current value are ignored; anything else moves the
    /// widget, and `PositionSelected` follows once it settles.
    pub fn set_position(&mut self, position: usize) {
        self.finish_removal();
        let hint = self.nav_hint.take();
        let count = self.count();
        let previous = self.sync.previous();
        let Some(target) = self.sync.accept_external(position, count) else {
            return;
        };
        self.derive_selected();

        if self.widget.is_none() || count == 0 {
            self.sync.settled(target);
            return;
        }
        let direction = nav_direction(
            target,
            previous,
            count,
            self.config.infinite_scrolling,
            hint,
        );
        self.sync.navigated(target);
        self.navigate(
            self.page_of(target),
            Transition::new(self.config.animate_transition, direction),
        );
    }

    /// Host assignment of the selected item.
    ///
    /// The item's index becomes the new position; an item missing from the
    /// collection selects the first page.
    pub fn set_selected_item(&mut self, item: Option<T>) {
        if item == self.selected {
            return;
        }
        let requested = item
            .as_ref()
            .and_then(|item| self.items.index_of(item))
            .map_or(-1, |index| isize::try_from(index).unwrap_or(isize::MAX));
        let target = clamp_position(requested, self.count());
        if target == self.position() {
            self.derive_selected();
        } else {
            self.set_position(target);
        }
    }

    /// Steps to the previous page, wrapping through the head sentinel when
    /// infinite.
    pub fn previous(&mut self) {
        self.finish_removal();
        self.remove_autoplay();
        let position = self.position();
        if position > 0 {
            self.progress.set_direction(NavDirection::Reverse);
            self.nav_hint = Some(NavDirection::Reverse);
            self.set_position(position - 1);
        } else if self.adapter.is_padded() {
            self.navigate(
                0,
                Transition::new(self.config.animate_transition, NavDirection::Reverse),
            );
        }
        self.add_autoplay();
    }

    /// Steps to the next page, wrapping through the tail sentinel when
    /// infinite.
    pub fn next(&mut self) {
        self.finish_removal();
        self.remove_autoplay();
        let position = self.position();
        if position + 1 < self.count() {
            self.progress.set_direction(NavDirection::Forward);
            self.nav_hint = Some(NavDirection::Forward);
            self.set_position(position + 1);
        } else if self.adapter.is_padded() {
            self.navigate(
                self.adapter.len() - 1,
                Transition::new(self.config.animate_transition, NavDirection::Forward),
            );
        }
        self.add_autoplay();
    }

    /// Advances the host clock, running due autoplay steps and finishing
    /// overdue removals.
    pub fn tick(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        if self
            .pending_removal
            .is_some_and(|removal| now_ms >= removal.due_ms)
        {
            self.finish_removal();
        }
        if self.autoplay.poll(now_ms) {
            self.autoplay_step();
        }
    }

    // --- Collection changes ---

    /// Applies a change to the items collection.
    ///
    /// A change that does not fit the mirrored items is rejected with an
    /// error, after the carousel has rebuilt its pages from the mirror.
    pub fn apply_change(&mut self, change: CollectionChange<T>) -> Result<(), ChangeError> {
        self.finish_removal();
        self.remove_autoplay();
        let result = match self.items.apply(&change) {
            Ok(_) => {
                self.patch(change);
                Ok(())
            }
            Err(err) => {
                debug!("Rejected collection change: {err}; rebuilding pages");
                self.sync.clamp(self.count());
                self.reset_adapter();
                Err(err)
            }
        };
        self.derive_selected();
        self.add_autoplay();
        result
    }

    fn patch(&mut self, change: CollectionChange<T>) {
        let infinite = self.config.infinite_scrolling;
        match change {
            CollectionChange::Add { index, item } => {
                let position = self.position();
                if self.count() > 1 && index <= position {
                    self.sync.write_internal(position + 1);
                }
                if infinite {
                    self.reset_adapter();
                } else {
                    self.adapter.insert(index, item);
                    self.insert_widget_page(index);
                }
                self.send_position_selected();
            }
            CollectionChange::Remove { index } => self.remove(index),
            CollectionChange::Move { from, to } => {
                if self.count() == 1 {
                    return;
                }
                self.sync.write_internal(to);
                if infinite {
                    self.reset_adapter();
                } else {
                    self.adapter.move_page(from, to);
                    self.sync_widget();
                }
                self.send_position_selected();
            }
            CollectionChange::Replace { index, item } => {
                if infinite {
                    self.reset_adapter();
                    return;
                }
                let new_identity = item.identity();
                if let Some(old) = self.adapter.replace(index, item) {
                    let old_identity = old.identity();
                    if old_identity == new_identity {
                        self.evict_page(&old_identity);
                    } else {
                        self.evict_unless_present(&old_identity);
                    }
                }
                self.sync_widget();
            }
            CollectionChange::Reset(_) => {
                self.sync.clamp(self.count());
                self.reset_adapter();
                self.send_position_selected();
            }
        }
    }

    fn remove(&mut self, index: usize) {
        let position = self.position();
        if index != position {
            if index < position {
                self.sync.write_internal(position - 1);
            }
            self.remove_page(index);
            return;
        }

        // Move off the doomed page first; it leaves the widget once the
        // transition has had time to run.
        let new_position = index.saturating_sub(1);
        let pages = self.adapter.len();
        let (target, direction) = match (self.adapter.is_padded(), index) {
            (true, 0) => (2, NavDirection::Forward),
            (true, _) => (new_position + 1, NavDirection::Reverse),
            (false, 0) if pages > 1 => (1, NavDirection::Forward),
            (false, _) => (new_position, NavDirection::Reverse),
        };
        let animated = self.config.animate_transition && self.widget.is_some();
        if let (Some(widget), true) = (self.widget.as_mut(), target < pages) {
            if animated {
                self.progress.begin_programmatic(direction);
            }
            widget.set_current_page(target, Transition::new(animated, direction));
        }
        self.sync.write_internal(new_position);
        self.pending_removal = Some(PendingRemoval {
            index,
            due_ms: self.now_ms.saturating_add(REMOVAL_SETTLE_DELAY_MS),
        });
        if !animated {
            self.finish_removal();
            self.send_position_selected();
        }
    }

    fn finish_removal(&mut self) {
        let Some(removal) = self.pending_removal.take() else {
            return;
        };
        trace!("Finishing removal of page {}", removal.index);
        self.remove_page(removal.index);
    }

    fn remove_page(&mut self, index: usize) {
        if self.config.infinite_scrolling {
            self.reset_adapter();
            return;
        }
        if let Some(item) = self.adapter.remove(index) {
            self.evict_unless_present(&item.identity());
        }
        self.sync_widget();
    }

    fn insert_widget_page(&mut self, index: usize) {
        let page = self.page_of(self.position());
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        match widget.insert_page(index) {
            Ok(()) => widget.set_current_page(page, Transition::SILENT),
            Err(err) => {
                warn!("Page insert at {index} failed: {err}; rebuilding pages");
                self.reset_adapter();
            }
        }
    }

    // --- Page adapter ---

    /// Returns the page key for padded `page`, materializing its handle on
    /// first use.
    ///
    /// A sentinel and the real page it mirrors share one handle.
    pub fn instantiate_page(&mut self, page: usize) -> Option<PageKey> {
        let item = self.adapter.item_at(page)?;
        let Some(widget) = self.widget.as_mut() else {
            trace!("Page {page} requested without a widget");
            return None;
        };
        Some(self.pages.acquire(item.identity(), || widget.create_page(item)))
    }

    /// Releases one slot's reference to a page, disposing the handle once no
    /// slot uses it.
    pub fn destroy_page(&mut self, key: PageKey) {
        match self.pages.release(key) {
            Ok(Some(page)) => {
                if let Some(widget) = self.widget.as_mut() {
                    widget.dispose_page(page);
                }
            }
            Ok(None) => {}
            Err(err) => trace!("Ignoring page release: {err}"),
        }
    }

    /// Handle for a live page.
    #[must_use]
    pub fn page(&self, key: PageKey) -> Option<&W::Page> {
        self.pages.get(key)
    }

    /// Handle for a live page, mutably.
    pub fn page_mut(&mut self, key: PageKey) -> Option<&mut W::Page> {
        self.pages.get_mut(key)
    }

    /// Padded page currently showing `key`'s item, preferring the real page
    /// over a sentinel. `None` once the item has left the collection.
    #[must_use]
    pub fn page_position(&self, key: PageKey) -> Option<usize> {
        let identity = self.pages.identity(key)?;
        let offset = usize::from(self.adapter.is_padded());
        let real = &self.adapter.as_slice()[offset..offset + self.adapter.real_len()];
        real.iter()
            .position(|item| item.identity() == *identity)
            .map(|index| index + offset)
    }

    // --- Widget callbacks ---

    /// The widget's scroll state changed.
    pub fn on_scroll_state_changed(&mut self, state: ScrollState) {
        let previous = core::mem::replace(&mut self.state, state);
        if previous == state {
            return;
        }
        if state == ScrollState::Dragging {
            self.progress.finish_programmatic();
            self.remove_autoplay();
        }
        if previous == ScrollState::Dragging {
            self.add_autoplay();
            let count = self.count();
            if count > 0
                && self.position() == count - 1
                && !self.config.infinite_scrolling
                && !self.progress.direction().is_backward()
            {
                self.events.push(CarouselEvent::LoadMore);
            }
        }
        if state == ScrollState::Idle {
            self.settle();
        }
    }

    /// Page-relative scroll callback: `page` is the leftmost (topmost) visible
    /// page and `offset` the fraction of it scrolled out of view.
    pub fn on_page_scrolled(&mut self, page: usize, offset: f64) {
        let current = self.page_of(self.position());
        let dragging = self.state == ScrollState::Dragging;
        if let Some((percent, direction)) =
            self.progress.on_page_scrolled(page, current, offset, dragging)
        {
            self.events.push(CarouselEvent::Scrolled { percent, direction });
        }
    }

    /// Content-offset scroll callback from a three-page scroll view.
    ///
    /// Pages are as large as the last [`PropertyChange::Bounds`].
    pub fn on_content_offset(&mut self, offset: Point) {
        if let Some((percent, direction)) = self.progress.on_content_offset(offset, self.bounds) {
            self.events.push(CarouselEvent::Scrolled { percent, direction });
        }
    }

    /// The widget selected a page on its own, ahead of settling.
    pub fn on_page_selected(&mut self, page: usize) {
        if self.pending_removal.is_some() {
            return;
        }
        let logical = padding::to_logical(page, self.adapter.real_len(), self.adapter.is_padded());
        self.sync.write_internal(logical);
        self.derive_selected();
    }

    // --- Internals ---

    fn page_of(&self, logical: usize) -> usize {
        padding::to_padded(logical, self.adapter.real_len(), self.adapter.is_padded())
    }

    fn navigate(&mut self, page: usize, transition: Transition) {
        if transition.animated {
            self.progress.begin_programmatic(transition.direction);
        } else {
            self.progress.set_direction(transition.direction);
        }
        let Some(widget) = self.widget.as_mut() else {
            trace!("Navigation to page {page} without a widget");
            return;
        };
        widget.set_current_page(page, transition);
        if !transition.animated {
            self.settle();
        }
    }

    /// Adopts the page the widget rests on.
    fn settle(&mut self) {
        self.finish_removal();
        self.progress.finish_programmatic();
        let Some(widget) = self.widget.as_ref() else {
            trace!("Settle without a widget");
            return;
        };
        if widget.page_count() != self.adapter.len() {
            debug!(
                "Widget holds {} pages but the adapter has {}; rebuilding",
                widget.page_count(),
                self.adapter.len()
            );
            self.reset_adapter();
        }
        let real_len = self.adapter.real_len();
        let padded = self.adapter.is_padded();
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        let mut page = widget.current_page();
        if let Some(snap) = padding::snap_target(page, real_len, padded) {
            widget.set_current_page(snap, Transition::SILENT);
            page = snap;
        }
        if self.sync.settled(padding::to_logical(page, real_len, padded)) {
            debug!("Swipe interrupted a programmatic transition");
        }
        self.send_position_selected();
    }

    fn autoplay_step(&mut self) {
        self.finish_removal();
        let step = autoplay::next_step(
            self.position(),
            self.count(),
            self.adapter.is_padded(),
            self.config.autoplay_wrap,
        );
        trace!("Autoplay step: {step:?}");
        match step {
            Some(AutoplayStep::Advance(position)) => {
                self.nav_hint = Some(NavDirection::Forward);
                self.set_position(position);
            }
            Some(AutoplayStep::ThroughSentinel) => self.navigate(
                self.adapter.len() - 1,
                Transition::new(self.config.animate_transition, NavDirection::Forward),
            ),
            Some(AutoplayStep::Rewind) => {
                self.nav_hint = Some(NavDirection::Forward);
                self.set_position(0);
            }
            None => {}
        }
    }

    fn add_autoplay(&mut self) {
        if autoplay::is_eligible(
            self.widget.is_some(),
            self.config.infinite_scrolling,
            self.config.autoplay_interval_secs,
            self.count(),
        ) {
            self.autoplay.start(self.now_ms, self.config.autoplay_delay_ms());
        } else {
            self.autoplay.stop();
        }
    }

    fn remove_autoplay(&mut self) {
        self.autoplay.stop();
    }

    fn derive_selected(&mut self) {
        self.selected = self.items.item_at(self.position()).cloned();
    }

    fn send_position_selected(&mut self) {
        self.derive_selected();
        self.events.push(CarouselEvent::PositionSelected(self.position()));
    }

    /// Rebuilds the page snapshot and reloads the widget from it.
    ///
    /// Handles of items still in the collection survive, so keys the widget
    /// holds for them stay valid across the reload.
    fn reset_adapter(&mut self) {
        self.adapter = PageAdapter::new(self.items.items(), self.config.infinite_scrolling);
        let items = self.items.items().unwrap_or_default();
        let stale = self
            .pages
            .retain(|identity| items.iter().any(|item| item.identity() == *identity));
        self.dispose_pages(stale);
        self.sync_widget();
    }

    fn dispose_pages(&mut self, pages: Vec<W::Page>) {
        match self.widget.as_mut() {
            Some(widget) => {
                for page in pages {
                    widget.dispose_page(page);
                }
            }
            None if !pages.is_empty() => trace!("Dropping {} pages without a widget", pages.len()),
            None => {}
        }
    }

    /// Reloads the widget's page count and puts it back on the current page.
    fn sync_widget(&mut self) {
        let len = self.adapter.len();
        let page = self.page_of(self.position());
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        widget.reload(len);
        if len > 0 {
            widget.set_current_page(page, Transition::SILENT);
        }
    }

    fn evict_page(&mut self, identity: &T::Key) {
        if let Some(page) = self.pages.evict(identity) {
            match self.widget.as_mut() {
                Some(widget) => widget.dispose_page(page),
                None => trace!("Dropping page {identity:?} without a widget"),
            }
        }
    }

    fn evict_unless_present(&mut self, identity: &T::Key) {
        let present = self
            .items
            .items()
            .is_some_and(|items| items.iter().any(|item| item.identity() == *identity));
        if !present {
            self.evict_page(identity);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use kurbo::{Point, Size};

    use super::{Carousel, REMOVAL_SETTLE_DELAY_MS};
    use crate::{
        Arrows, AutoplayWrap, CarouselConfig, CarouselEvent, ChangeError, CollectionChange,
        NavDirection, PagingWidget, PropertyChange, ScrollDirection, ScrollState, SyncToken,
        Transition, WidgetError,
    };

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        SetCurrent(usize, Transition),
        Reload(usize),
        Insert(usize),
    }

    /// Records every call and behaves like a clamped pager.
    #[derive(Debug, Default)]
    struct MockWidget {
        pages: usize,
        current: usize,
        paging_enabled: bool,
        reject_inserts: bool,
        calls: Vec<Call>,
        created: Vec<char>,
        disposed: Vec<char>,
    }

    impl PagingWidget<char> for MockWidget {
        type Page = char;

        fn page_count(&self) -> usize {
            self.pages
        }

        fn current_page(&self) -> usize {
            self.current
        }

        fn set_current_page(&mut self, page: usize, transition: Transition) {
            self.current = page.min(self.pages.saturating_sub(1));
            self.calls.push(Call::SetCurrent(page, transition));
        }

        fn reload(&mut self, page_count: usize) {
            self.pages = page_count;
            self.current = self.current.min(page_count.saturating_sub(1));
            self.calls.push(Call::Reload(page_count));
        }

        fn insert_page(&mut self, page: usize) -> Result<(), WidgetError> {
            if self.reject_inserts {
                return Err(WidgetError::InsertRejected {
                    page,
                    count: self.pages,
                });
            }
            self.pages += 1;
            self.calls.push(Call::Insert(page));
            Ok(())
        }

        fn set_paging_enabled(&mut self, enabled: bool) {
            self.paging_enabled = enabled;
        }

        fn create_page(&mut self, item: &char) -> char {
            self.created.push(*item);
            *item
        }

        fn dispose_page(&mut self, page: char) {
            self.disposed.push(page);
        }
    }

    fn attached(items: &[char], config: CarouselConfig) -> Carousel<char, MockWidget> {
        let mut carousel = Carousel::new(config, Some(items.to_vec()));
        carousel.attach(MockWidget::default());
        carousel.drain_events();
        carousel
    }

    fn infinite() -> CarouselConfig {
        CarouselConfig {
            infinite_scrolling: true,
            ..CarouselConfig::default()
        }
    }

    fn instant() -> CarouselConfig {
        CarouselConfig {
            animate_transition: false,
            ..CarouselConfig::default()
        }
    }

    fn widget(carousel: &Carousel<char, MockWidget>) -> &MockWidget {
        carousel.widget().unwrap()
    }

    /// Lets an in-flight transition come to rest.
    fn settle(carousel: &mut Carousel<char, MockWidget>) {
        carousel.on_scroll_state_changed(ScrollState::Settling);
        carousel.on_scroll_state_changed(ScrollState::Idle);
    }

    #[test]
    fn attach_loads_pages_and_selects_current() {
        let mut carousel = Carousel::new(infinite(), Some(vec!['a', 'b', 'c']));
        assert!(carousel.attach(MockWidget::default()).is_none());
        let w = widget(&carousel);
        assert_eq!(w.pages, 5);
        assert_eq!(w.current, 1);
        assert!(w.paging_enabled);
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::PositionSelected(0)]
        );
        assert_eq!(carousel.selected_item(), Some(&'a'));
    }

    #[test]
    fn assigned_positions_round_trip_through_settle() {
        for config in [CarouselConfig::default(), infinite()] {
            let mut carousel = attached(&['a', 'b', 'c'], config.clone());
            for position in [2, 0, 1] {
                carousel.set_position(position);
                settle(&mut carousel);
                assert_eq!(carousel.position(), position);
                let expected = if config.infinite_scrolling {
                    position + 1
                } else {
                    position
                };
                assert_eq!(widget(&carousel).current, expected);
                assert_eq!(
                    carousel.drain_events(),
                    vec![CarouselEvent::PositionSelected(position)]
                );
            }
        }
    }

    #[test]
    fn infinite_three_items_pad_to_five_pages() {
        let carousel = attached(&['a', 'b', 'c'], infinite());
        assert_eq!(carousel.adapter().as_slice(), &['c', 'a', 'b', 'c', 'a']);
        assert_eq!(widget(&carousel).pages, 5);
    }

    #[test]
    fn settling_on_head_sentinel_snaps_to_last_real_page() {
        let mut carousel = attached(&['a', 'b', 'c'], infinite());
        carousel.on_scroll_state_changed(ScrollState::Dragging);
        carousel.widget_mut().unwrap().current = 0;
        carousel.on_page_selected(0);
        settle(&mut carousel);

        assert_eq!(carousel.position(), 2);
        assert_eq!(carousel.selected_item(), Some(&'c'));
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(3, Transition::SILENT))
        );
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::PositionSelected(2)]
        );
    }

    #[test]
    fn next_twice_selects_one_then_two() {
        let mut carousel = attached(&['a', 'b', 'c'], instant());
        carousel.next();
        carousel.next();
        assert_eq!(carousel.position(), 2);
        assert_eq!(
            carousel.drain_events(),
            vec![
                CarouselEvent::PositionSelected(1),
                CarouselEvent::PositionSelected(2),
            ]
        );
        // At the end of a finite carousel there is nowhere to go.
        carousel.next();
        assert_eq!(carousel.position(), 2);
        assert!(carousel.drain_events().is_empty());
    }

    #[test]
    fn arrows_wrap_through_sentinels_when_infinite() {
        let mut carousel = attached(&['a', 'b', 'c'], infinite());
        carousel.previous();
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(
                0,
                Transition::new(true, NavDirection::Reverse)
            ))
        );
        settle(&mut carousel);
        assert_eq!(carousel.position(), 2);
        assert_eq!(widget(&carousel).current, 3);

        carousel.next();
        assert_eq!(widget(&carousel).current, 4);
        settle(&mut carousel);
        assert_eq!(carousel.position(), 0);
        assert_eq!(widget(&carousel).current, 1);
    }

    #[test]
    fn arrow_steps_report_programmatic_progress() {
        let mut carousel = attached(&['a', 'b', 'c'], CarouselConfig::default());
        carousel.next();
        carousel.on_page_scrolled(1, 0.4);
        carousel.on_page_scrolled(1, 0.0);
        carousel.on_page_scrolled(1, 0.0);
        assert_eq!(
            carousel.drain_events(),
            vec![
                CarouselEvent::Scrolled {
                    percent: 0.0,
                    direction: ScrollDirection::Right,
                },
                CarouselEvent::Scrolled {
                    percent: 100.0,
                    direction: ScrollDirection::Right,
                },
            ]
        );
    }

    #[test]
    fn autoplay_wraps_through_tail_sentinel() {
        let config = CarouselConfig {
            infinite_scrolling: true,
            autoplay_interval_secs: 1,
            ..CarouselConfig::default()
        };
        let mut carousel = attached(&['a', 'b'], config);
        assert!(carousel.is_autoplaying());
        carousel.set_position(1);
        settle(&mut carousel);
        carousel.drain_events();

        carousel.tick(1_000);
        // Still on the last page until the widget comes to rest on the sentinel.
        assert_eq!(widget(&carousel).current, 3);
        assert_eq!(carousel.position(), 1);
        settle(&mut carousel);

        assert_eq!(carousel.position(), 0);
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(1, Transition::SILENT))
        );
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::PositionSelected(0)]
        );
    }

    #[test]
    fn autoplay_rewind_navigates_to_first_page() {
        let config = CarouselConfig {
            infinite_scrolling: true,
            autoplay_interval_secs: 2,
            autoplay_wrap: AutoplayWrap::Rewind,
            ..CarouselConfig::default()
        };
        let mut carousel = attached(&['a', 'b'], config);
        carousel.set_position(1);
        settle(&mut carousel);

        carousel.tick(1_999);
        assert_eq!(carousel.position(), 1);
        carousel.tick(2_000);
        assert_eq!(carousel.position(), 0);
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(
                1,
                Transition::new(true, NavDirection::Forward)
            ))
        );
    }

    #[test]
    fn autoplay_needs_infinite_scrolling_and_pauses_while_dragging() {
        let finite = CarouselConfig {
            autoplay_interval_secs: 1,
            ..CarouselConfig::default()
        };
        assert!(!attached(&['a', 'b'], finite).is_autoplaying());

        let config = CarouselConfig {
            infinite_scrolling: true,
            autoplay_interval_secs: 1,
            ..CarouselConfig::default()
        };
        let mut carousel = attached(&['a', 'b'], config);
        carousel.on_scroll_state_changed(ScrollState::Dragging);
        assert!(!carousel.is_autoplaying());
        carousel.on_scroll_state_changed(ScrollState::Settling);
        assert!(carousel.is_autoplaying());

        carousel.set_property(PropertyChange::AutoplayInterval(0));
        assert!(!carousel.is_autoplaying());
    }

    #[test]
    fn echoed_writes_do_not_navigate() {
        let mut carousel = attached(&['a', 'b', 'c'], instant());
        carousel.on_page_selected(2);
        assert_eq!(
            carousel.sync_token(),
            SyncToken::ApplyingInternal { position: 2 }
        );
        let calls = widget(&carousel).calls.len();

        carousel.set_property(PropertyChange::Position(2));
        carousel.set_property(PropertyChange::SelectedItem(Some('c')));
        assert_eq!(widget(&carousel).calls.len(), calls);
        assert_eq!(carousel.sync_token(), SyncToken::Idle);
    }

    #[test]
    fn selected_item_assignment_navigates_and_clamps() {
        let mut carousel = attached(&['a', 'b', 'c'], instant());
        carousel.set_selected_item(Some('c'));
        assert_eq!(carousel.position(), 2);

        // Missing items select the first page.
        carousel.set_selected_item(Some('z'));
        assert_eq!(carousel.position(), 0);
        assert_eq!(carousel.selected_item(), Some(&'a'));

        carousel.set_position(9);
        assert_eq!(carousel.position(), 2);
    }

    #[test]
    fn positions_assigned_while_detached_apply_on_attach() {
        let mut carousel: Carousel<char, MockWidget> =
            Carousel::new(infinite(), Some(vec!['a', 'b', 'c']));
        carousel.set_position(2);
        assert_eq!(carousel.position(), 2);
        assert_eq!(carousel.selected_item(), Some(&'c'));

        carousel.attach(MockWidget::default());
        assert_eq!(widget(&carousel).current, 3);
    }

    #[test]
    fn forward_drag_off_the_last_page_loads_more() {
        let mut carousel = attached(&['a', 'b'], instant());
        carousel.set_position(1);
        carousel.drain_events();

        carousel.on_scroll_state_changed(ScrollState::Dragging);
        carousel.on_page_scrolled(1, 0.25);
        settle(&mut carousel);
        assert_eq!(
            carousel.drain_events(),
            vec![
                CarouselEvent::Scrolled {
                    percent: 25.0,
                    direction: ScrollDirection::Right,
                },
                CarouselEvent::LoadMore,
                CarouselEvent::PositionSelected(1),
            ]
        );

        // Dragging back towards the first page does not.
        carousel.on_scroll_state_changed(ScrollState::Dragging);
        carousel.on_page_scrolled(0, 0.75);
        settle(&mut carousel);
        assert!(
            !carousel
                .drain_events()
                .contains(&CarouselEvent::LoadMore)
        );
    }

    #[test]
    fn content_offsets_use_bounds_as_page_size() {
        let mut carousel = attached(&['a', 'b', 'c'], CarouselConfig::default());
        carousel.set_property(PropertyChange::Bounds(Size::new(100.0, 50.0)));
        carousel.drain_events();
        carousel.on_content_offset(Point::new(100.0, 0.0));
        carousel.on_content_offset(Point::new(140.0, 0.0));
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::Scrolled {
                percent: 40.0,
                direction: ScrollDirection::Right,
            }]
        );
    }

    #[test]
    fn empty_or_unbound_items_hide_both_arrows() {
        let shown = CarouselConfig {
            show_arrows: true,
            ..CarouselConfig::default()
        };
        let unbound: Carousel<char, MockWidget> = Carousel::new(shown.clone(), None);
        assert_eq!(unbound.arrows(), Arrows::empty());
        let empty = attached(&[], shown.clone());
        assert_eq!(empty.arrows(), Arrows::empty());
        assert_eq!(empty.position(), 0);

        let mut carousel = attached(&['a', 'b'], shown);
        assert_eq!(carousel.arrows(), Arrows::NEXT);
        carousel.set_property(PropertyChange::InfiniteScrolling(true));
        assert_eq!(carousel.arrows(), Arrows::all());
    }

    #[test]
    fn removing_the_only_item_leaves_position_zero() {
        let mut carousel = attached(&['a'], CarouselConfig::default());
        carousel
            .apply_change(CollectionChange::Remove { index: 0 })
            .unwrap();
        assert_eq!(carousel.position(), 0);
        assert_eq!(carousel.selected_item(), None);
        assert!(carousel.has_pending_removal());

        carousel.tick(REMOVAL_SETTLE_DELAY_MS);
        assert!(!carousel.has_pending_removal());
        assert!(carousel.adapter().is_empty());
        assert_eq!(widget(&carousel).pages, 0);
    }

    #[test]
    fn removing_the_current_page_moves_to_a_neighbor_first() {
        let mut carousel = attached(&['a', 'b', 'c'], CarouselConfig::default());
        carousel
            .apply_change(CollectionChange::Remove { index: 0 })
            .unwrap();
        // The widget heads for the next page while the old one stays put.
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(
                1,
                Transition::new(true, NavDirection::Forward)
            ))
        );
        assert_eq!(carousel.adapter().as_slice(), &['a', 'b', 'c']);
        assert_eq!(carousel.selected_item(), Some(&'b'));

        settle(&mut carousel);
        assert_eq!(carousel.adapter().as_slice(), &['b', 'c']);
        assert_eq!(widget(&carousel).pages, 2);
        assert_eq!(widget(&carousel).current, 0);
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::PositionSelected(0)]
        );
    }

    #[test]
    fn removing_the_current_page_without_animation_is_immediate() {
        let mut carousel = attached(&['a', 'b', 'c'], instant());
        carousel.set_position(2);
        carousel.drain_events();
        carousel
            .apply_change(CollectionChange::Remove { index: 2 })
            .unwrap();
        assert!(!carousel.has_pending_removal());
        assert_eq!(carousel.position(), 1);
        assert_eq!(widget(&carousel).pages, 2);
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::PositionSelected(1)]
        );
    }

    #[test]
    fn changes_before_the_current_page_keep_it_visible() {
        let mut carousel = attached(&['a', 'b', 'c'], instant());
        carousel.set_position(2);

        carousel
            .apply_change(CollectionChange::Remove { index: 0 })
            .unwrap();
        assert_eq!(carousel.position(), 1);
        assert_eq!(carousel.selected_item(), Some(&'c'));

        carousel
            .apply_change(CollectionChange::Add {
                index: 0,
                item: 'x',
            })
            .unwrap();
        assert_eq!(carousel.position(), 2);
        assert_eq!(carousel.selected_item(), Some(&'c'));
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(2, Transition::SILENT))
        );
        assert_eq!(widget(&carousel).pages, 3);
    }

    #[test]
    fn failed_inserts_rebuild_the_widget() {
        let mut carousel = attached(&['a', 'b'], CarouselConfig::default());
        carousel.widget_mut().unwrap().reject_inserts = true;
        carousel
            .apply_change(CollectionChange::Add {
                index: 2,
                item: 'c',
            })
            .unwrap();
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(0, Transition::SILENT))
        );
        assert!(widget(&carousel).calls.contains(&Call::Reload(3)));
        assert!(!widget(&carousel).calls.contains(&Call::Insert(2)));
        assert_eq!(widget(&carousel).pages, 3);
        assert_eq!(carousel.adapter().as_slice(), &['a', 'b', 'c']);
    }

    #[test]
    fn moves_select_the_destination() {
        let mut carousel = attached(&['a', 'b', 'c'], CarouselConfig::default());
        carousel
            .apply_change(CollectionChange::Move { from: 0, to: 2 })
            .unwrap();
        assert_eq!(carousel.position(), 2);
        assert_eq!(carousel.selected_item(), Some(&'a'));
        assert_eq!(carousel.adapter().as_slice(), &['b', 'c', 'a']);
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::PositionSelected(2)]
        );

        let mut single = attached(&['a'], CarouselConfig::default());
        single
            .apply_change(CollectionChange::Move { from: 0, to: 0 })
            .unwrap();
        assert!(single.drain_events().is_empty());
    }

    #[test]
    fn infinite_changes_rebuild_the_padded_pages() {
        let mut carousel = attached(&['a', 'b'], infinite());
        carousel
            .apply_change(CollectionChange::Replace {
                index: 1,
                item: 'z',
            })
            .unwrap();
        assert_eq!(carousel.adapter().as_slice(), &['z', 'a', 'z', 'a']);

        carousel
            .apply_change(CollectionChange::Add {
                index: 2,
                item: 'c',
            })
            .unwrap();
        assert_eq!(carousel.adapter().as_slice(), &['c', 'a', 'z', 'c', 'a']);
        assert_eq!(widget(&carousel).pages, 5);
    }

    #[test]
    fn removing_the_current_page_when_infinite_heads_for_a_real_neighbor() {
        let mut carousel = attached(&['a', 'b', 'c'], infinite());
        carousel
            .apply_change(CollectionChange::Remove { index: 0 })
            .unwrap();
        // Padded page 2 is the old 'b', the first item once 'a' is gone.
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(
                2,
                Transition::new(true, NavDirection::Forward)
            ))
        );
        assert_eq!(carousel.selected_item(), Some(&'b'));

        settle(&mut carousel);
        assert_eq!(carousel.adapter().as_slice(), &['c', 'b', 'c', 'b']);
        assert_eq!(carousel.position(), 0);
        assert_eq!(widget(&carousel).current, 1);
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::PositionSelected(0)]
        );
    }

    #[test]
    fn arrow_steps_during_a_pending_removal_use_the_new_pages() {
        let mut carousel = attached(&['a', 'b', 'c'], infinite());
        carousel.set_position(2);
        settle(&mut carousel);
        carousel.drain_events();

        carousel
            .apply_change(CollectionChange::Remove { index: 2 })
            .unwrap();
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(
                2,
                Transition::new(true, NavDirection::Reverse)
            ))
        );
        assert!(carousel.has_pending_removal());

        // Stepping past the last item wraps to the first one.
        carousel.next();
        assert!(!carousel.has_pending_removal());
        assert_eq!(carousel.adapter().as_slice(), &['b', 'a', 'b', 'a']);
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(
                3,
                Transition::new(true, NavDirection::Forward)
            ))
        );
        settle(&mut carousel);
        assert_eq!(carousel.position(), 0);
        assert_eq!(carousel.selected_item(), Some(&'a'));
        assert_eq!(widget(&carousel).current, 1);
        assert_eq!(widget(&carousel).pages, 4);
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::PositionSelected(0)]
        );
    }

    #[test]
    fn autoplay_after_a_removal_steps_over_the_new_pages() {
        let config = CarouselConfig {
            infinite_scrolling: true,
            autoplay_interval_secs: 1,
            ..CarouselConfig::default()
        };
        let mut carousel = attached(&['a', 'b', 'c'], config);
        carousel.set_position(2);
        settle(&mut carousel);
        carousel
            .apply_change(CollectionChange::Remove { index: 2 })
            .unwrap();
        carousel.drain_events();

        carousel.tick(REMOVAL_SETTLE_DELAY_MS - 1);
        assert!(carousel.has_pending_removal());
        // Wraps from 'b', the new last item, through the new tail sentinel.
        carousel.tick(1_000);
        assert!(!carousel.has_pending_removal());
        assert_eq!(carousel.adapter().as_slice(), &['b', 'a', 'b', 'a']);
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(
                3,
                Transition::new(true, NavDirection::Forward)
            ))
        );
        settle(&mut carousel);
        assert_eq!(carousel.position(), 0);
        assert_eq!(carousel.selected_item(), Some(&'a'));
    }

    #[test]
    fn infinite_moves_rebuild_and_select_the_destination() {
        let mut carousel = attached(&['a', 'b', 'c'], infinite());
        carousel
            .apply_change(CollectionChange::Move { from: 0, to: 2 })
            .unwrap();
        assert_eq!(carousel.adapter().as_slice(), &['a', 'b', 'c', 'a', 'b']);
        assert_eq!(carousel.position(), 2);
        assert_eq!(carousel.selected_item(), Some(&'a'));
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(3, Transition::SILENT))
        );
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::PositionSelected(2)]
        );
    }

    #[test]
    fn rebuilds_keep_handles_of_items_still_present() {
        let mut carousel = attached(&['a', 'b', 'c'], infinite());
        let a = carousel.instantiate_page(1).unwrap();
        let b = carousel.instantiate_page(2).unwrap();
        carousel
            .apply_change(CollectionChange::Remove { index: 1 })
            .unwrap();
        assert_eq!(widget(&carousel).disposed, vec!['b']);
        assert_eq!(carousel.page(b), None);
        assert_eq!(carousel.page(a), Some(&'a'));
        assert_eq!(carousel.page_position(a), Some(1));

        if let Some(page) = carousel.page_mut(a) {
            *page = 'A';
        }
        assert_eq!(carousel.page(a), Some(&'A'));

        // A new template invalidates every handle.
        carousel.set_property(PropertyChange::ItemTemplate);
        assert_eq!(widget(&carousel).disposed, vec!['b', 'A']);
        assert_eq!(carousel.page(a), None);
    }

    #[test]
    fn rejected_changes_rebuild_from_the_mirror() {
        let mut carousel = attached(&['a', 'b', 'c'], CarouselConfig::default());
        assert_eq!(
            carousel.apply_change(CollectionChange::Remove { index: 5 }),
            Err(ChangeError::IndexOutOfRange { index: 5, len: 3 })
        );
        assert_eq!(carousel.adapter().as_slice(), &['a', 'b', 'c']);
        assert_eq!(
            widget(&carousel).calls.last(),
            Some(&Call::SetCurrent(0, Transition::SILENT))
        );
    }

    #[test]
    fn resets_clamp_the_position() {
        let mut carousel = attached(&['a', 'b', 'c'], instant());
        carousel.set_position(2);
        carousel.drain_events();
        carousel
            .apply_change(CollectionChange::Reset(vec!['x']))
            .unwrap();
        assert_eq!(carousel.position(), 0);
        assert_eq!(carousel.selected_item(), Some(&'x'));
        assert_eq!(
            carousel.drain_events(),
            vec![CarouselEvent::PositionSelected(0)]
        );

        carousel.set_property(PropertyChange::ItemsSource(None));
        assert_eq!(carousel.position(), 0);
        assert_eq!(carousel.selected_item(), None);
        assert_eq!(widget(&carousel).pages, 0);
    }

    #[test]
    fn sentinel_duplicates_share_one_page_handle() {
        let mut carousel = attached(&['a', 'b', 'c'], infinite());
        let sentinel = carousel.instantiate_page(0).unwrap();
        let real = carousel.instantiate_page(3).unwrap();
        assert_eq!(sentinel, real);
        assert_eq!(widget(&carousel).created, vec!['c']);
        assert_eq!(carousel.page(real), Some(&'c'));
        assert_eq!(carousel.page_position(real), Some(3));
        assert_eq!(carousel.instantiate_page(9), None);

        carousel.destroy_page(sentinel);
        assert!(widget(&carousel).disposed.is_empty());
        carousel.destroy_page(real);
        assert_eq!(widget(&carousel).disposed, vec!['c']);
        // A second release of the same key is ignored.
        carousel.destroy_page(real);
        assert_eq!(carousel.page(real), None);
    }

    #[test]
    fn replaced_items_dispose_their_page() {
        let mut carousel = attached(&['a', 'b'], CarouselConfig::default());
        let key = carousel.instantiate_page(0).unwrap();
        carousel
            .apply_change(CollectionChange::Replace {
                index: 0,
                item: 'z',
            })
            .unwrap();
        assert_eq!(widget(&carousel).disposed, vec!['a']);
        assert_eq!(carousel.page(key), None);
        assert_eq!(carousel.page_position(key), None);
        assert_eq!(carousel.selected_item(), Some(&'z'));
    }

    #[test]
    fn detach_disposes_pages_and_stops_autoplay() {
        let config = CarouselConfig {
            infinite_scrolling: true,
            autoplay_interval_secs: 3,
            ..CarouselConfig::default()
        };
        let mut carousel = attached(&['a', 'b'], config);
        carousel.instantiate_page(1).unwrap();
        carousel.instantiate_page(2).unwrap();

        let widget = carousel.detach().unwrap();
        assert_eq!(widget.disposed, vec!['a', 'b']);
        assert!(!carousel.is_attached());
        assert!(!carousel.is_autoplaying());
        assert!(carousel.detach().is_none());
    }

    #[test]
    fn property_changes_reconfigure_the_widget() {
        let mut carousel = attached(&['a', 'b', 'c'], CarouselConfig::default());
        carousel.set_property(PropertyChange::IsSwipeEnabled(false));
        assert!(!widget(&carousel).paging_enabled);

        let reloads = |c: &Carousel<char, MockWidget>| {
            widget(c)
                .calls
                .iter()
                .filter(|call| matches!(call, Call::Reload(_)))
                .count()
        };
        let before = reloads(&carousel);
        carousel.set_property(PropertyChange::Bounds(Size::new(320.0, 0.0)));
        assert_eq!(reloads(&carousel), before);
        carousel.set_property(PropertyChange::Bounds(Size::new(320.0, 200.0)));
        carousel.set_property(PropertyChange::Bounds(Size::new(320.0, 200.0)));
        assert_eq!(reloads(&carousel), before + 1);

        carousel.set_property(PropertyChange::ShowIndicators(true));
        let indicators = carousel.indicators();
        assert!(indicators.visible);
        assert_eq!(indicators.count, 3);
    }
}
