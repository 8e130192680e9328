// Copyright 2025 the Carousel Pager Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drives a carousel against a simulated paging widget.
//!
//! The simulated pager animates page changes over a few frames and reports
//! scroll callbacks the way a native pager would. The host loop forwards
//! them to the carousel, ticks its clock, and prints the events it drains.
//!
//! Run:
//! - `cargo run -p carousel_demos --example simulated_pager`
//! - `RUST_LOG=trace cargo run -p carousel_demos --example simulated_pager`

use carousel_pager::{
    Carousel, CarouselConfig, CollectionChange, NavDirection, PageKey, PagingWidget,
    PropertyChange, ScrollState, Transition, WidgetError,
};
use kurbo::Size;
use tracing_subscriber::EnvFilter;

const FRAME_MS: u64 = 16;
const ANIMATION_MS: u64 = 64;

type Item = &'static str;

/// A page animation in flight.
#[derive(Clone, Copy, Debug)]
struct Animation {
    from: usize,
    to: usize,
    elapsed: u64,
}

/// Callbacks the simulated pager raises, queued until the host forwards them.
#[derive(Clone, Copy, Debug)]
enum Callback {
    State(ScrollState),
    Scrolled { page: usize, offset: f64 },
}

#[derive(Debug, Default)]
struct SimPager {
    pages: usize,
    current: usize,
    animation: Option<Animation>,
    live_views: usize,
}

impl SimPager {
    /// Advances the animation by one frame.
    fn step(&mut self) -> Vec<Callback> {
        let Some(mut animation) = self.animation else {
            return Vec::new();
        };
        let mut callbacks = Vec::new();
        if animation.elapsed == 0 {
            callbacks.push(Callback::State(ScrollState::Settling));
        }
        animation.elapsed += FRAME_MS;
        let t = animation.elapsed as f64 / ANIMATION_MS as f64;
        if t >= 1.0 {
            self.current = animation.to;
            self.animation = None;
            callbacks.push(Callback::Scrolled {
                page: animation.to,
                offset: 0.0,
            });
            callbacks.push(Callback::State(ScrollState::Idle));
        } else {
            let forward = animation.to > animation.from;
            callbacks.push(Callback::Scrolled {
                page: animation.from.min(animation.to),
                offset: if forward { t } else { 1.0 - t },
            });
            self.animation = Some(animation);
        }
        callbacks
    }
}

impl PagingWidget<Item> for SimPager {
    type Page = String;

    fn page_count(&self) -> usize {
        self.pages
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn set_current_page(&mut self, page: usize, transition: Transition) {
        let page = page.min(self.pages.saturating_sub(1));
        if transition.animated && page != self.current {
            self.animation = Some(Animation {
                from: self.current,
                to: page,
                elapsed: 0,
            });
        } else {
            self.animation = None;
            self.current = page;
        }
    }

    fn reload(&mut self, page_count: usize) {
        self.pages = page_count;
        self.current = self.current.min(page_count.saturating_sub(1));
        self.animation = None;
    }

    fn insert_page(&mut self, page: usize) -> Result<(), WidgetError> {
        if page > self.pages {
            return Err(WidgetError::InsertRejected {
                page,
                count: self.pages,
            });
        }
        self.pages += 1;
        Ok(())
    }

    fn set_paging_enabled(&mut self, enabled: bool) {
        println!("          paging enabled: {enabled}");
    }

    fn create_page(&mut self, item: &Item) -> String {
        self.live_views += 1;
        format!("<view {item}>")
    }

    fn dispose_page(&mut self, _page: String) {
        self.live_views = self.live_views.saturating_sub(1);
    }
}

struct Host {
    carousel: Carousel<Item, SimPager>,
    now_ms: u64,
    window: Vec<PageKey>,
}

impl Host {
    fn new(config: CarouselConfig, items: Vec<Item>) -> Self {
        let mut carousel = Carousel::new(config, Some(items));
        carousel.attach(SimPager::default());
        carousel.set_property(PropertyChange::Bounds(Size::new(360.0, 240.0)));
        let mut host = Self {
            carousel,
            now_ms: 0,
            window: Vec::new(),
        };
        host.flush();
        host
    }

    /// Runs `frames` frames of the UI loop.
    fn run(&mut self, frames: usize) {
        for _ in 0..frames {
            self.now_ms += FRAME_MS;
            self.carousel.tick(self.now_ms);
            let callbacks = self
                .carousel
                .widget_mut()
                .map(SimPager::step)
                .unwrap_or_default();
            for callback in callbacks {
                match callback {
                    Callback::State(state) => self.carousel.on_scroll_state_changed(state),
                    Callback::Scrolled { page, offset } => {
                        self.carousel.on_page_scrolled(page, offset);
                    }
                }
            }
            self.flush();
        }
    }

    /// Prints queued events and keeps the current page and its neighbors
    /// materialized.
    fn flush(&mut self) {
        for event in self.carousel.drain_events() {
            println!("{:>6} ms  {event:?}", self.now_ms);
        }
        let Some(current) = self.carousel.widget().map(SimPager::current_page) else {
            return;
        };
        let pages = self.carousel.adapter().len();
        for key in self.window.drain(..) {
            self.carousel.destroy_page(key);
        }
        for page in current.saturating_sub(1)..(current + 2).min(pages) {
            if let Some(key) = self.carousel.instantiate_page(page) {
                self.window.push(key);
            }
        }
    }

    fn report(&self, label: &str) {
        let widget = self.carousel.widget();
        println!(
            "--- {label}: position {} ({:?}), page {}/{}, {} live views, arrows {:?}",
            self.carousel.position(),
            self.carousel.selected_item(),
            widget.map_or(0, SimPager::current_page),
            widget.map_or(0, SimPager::page_count),
            widget.map_or(0, |w| w.live_views),
            self.carousel.arrows(),
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = CarouselConfig {
        infinite_scrolling: true,
        autoplay_interval_secs: 1,
        show_arrows: true,
        show_indicators: true,
        ..CarouselConfig::default()
    };
    let mut host = Host::new(config, vec!["red", "green", "blue"]);
    host.report("attached");

    // Autoplay walks forward and wraps through the tail sentinel.
    host.run(200);
    host.report("after autoplay");

    // Arrow clicks.
    host.carousel.previous();
    host.run(10);
    host.report("after previous");
    host.carousel.next();
    host.carousel.next();
    host.run(10);
    host.report("after next twice");

    // A swipe backwards that lands on the head sentinel.
    host.carousel.set_property(PropertyChange::AutoplayInterval(0));
    host.carousel.set_position(0);
    host.run(10);
    host.carousel.on_scroll_state_changed(ScrollState::Dragging);
    host.carousel.on_page_scrolled(0, 0.6);
    if let Some(widget) = host.carousel.widget_mut() {
        widget.set_current_page(0, Transition::new(true, NavDirection::Reverse));
    }
    host.run(10);
    host.report("after swiping onto the head sentinel");

    // Collection changes.
    let _ = host.carousel.apply_change(CollectionChange::Add {
        index: 0,
        item: "yellow",
    });
    host.run(2);
    host.report("after inserting in front");
    let current = host.carousel.position();
    let _ = host
        .carousel
        .apply_change(CollectionChange::Remove { index: current });
    host.run(10);
    host.report("after removing the current item");

    // A finite carousel raises LoadMore when dragged past its end.
    let mut finite = Host::new(CarouselConfig::default(), vec!["one", "two"]);
    finite.carousel.set_position(1);
    finite.run(10);
    finite.carousel.on_scroll_state_changed(ScrollState::Dragging);
    finite.carousel.on_page_scrolled(1, 0.3);
    finite.carousel.on_scroll_state_changed(ScrollState::Idle);
    finite.flush();
    finite.report("finite carousel after dragging past the end");

    if let Some(widget) = host.carousel.detach() {
        println!("detached with {} live views", widget.live_views);
    }
}
