//! Scroll observer: is the page scrolled past the navbar threshold?

use std::{cell::Cell, rc::Rc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::view::viewport::{EventChannel, Subscription, Viewport};

/// Offset the navbar switches style at.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 50.0;

/// Whether an offset equal to the threshold counts as scrolled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    /// `offset > threshold`
    #[default]
    Exclusive,
    /// `offset >= threshold`
    Inclusive,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollThreshold {
    pub offset: f64,
    #[serde(default)]
    pub boundary: Boundary,
}

impl ScrollThreshold {
    pub const fn new(offset: f64, boundary: Boundary) -> Self {
        Self { offset, boundary }
    }

    pub fn is_past(&self, offset: f64) -> bool {
        match self.boundary {
            Boundary::Exclusive => offset > self.offset,
            Boundary::Inclusive => offset >= self.offset,
        }
    }
}

impl Default for ScrollThreshold {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THRESHOLD, Boundary::Exclusive)
    }
}

/// Publishes `scrolled` whenever it flips.
///
/// Holds exactly one scroll listener on the viewport while attached. The
/// listener is released by [`ScrollObserver::detach`] or on drop.
#[derive(Debug)]
pub struct ScrollObserver {
    threshold: ScrollThreshold,
    scrolled: Rc<Cell<bool>>,
    changes: EventChannel<bool>,
    subscription: Option<Subscription>,
}

impl ScrollObserver {
    pub fn attach(viewport: &Viewport, threshold: ScrollThreshold) -> Self {
        let scrolled = Rc::new(Cell::new(threshold.is_past(viewport.offset())));
        let changes = EventChannel::new();

        let subscription = viewport.on_scroll({
            let scrolled = Rc::clone(&scrolled);
            let changes = changes.clone();
            move |event| {
                let now = threshold.is_past(event.offset);
                if scrolled.replace(now) != now {
                    debug!(offset = event.offset, scrolled = now, "scroll state changed");
                    changes.emit(&now);
                }
            }
        });

        Self {
            threshold,
            scrolled,
            changes,
            subscription: Some(subscription),
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled.get()
    }

    pub fn threshold(&self) -> ScrollThreshold {
        self.threshold
    }

    /// Listen for changes of the published boolean. Redundant scroll events
    /// that leave the state unchanged are not forwarded.
    pub fn on_change(&self, listener: impl Fn(&bool) + 'static) -> Subscription {
        self.changes.subscribe(listener)
    }

    /// Stop listening to the viewport. The last published state is kept.
    pub fn detach(&mut self) {
        self.subscription.take();
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }
}
