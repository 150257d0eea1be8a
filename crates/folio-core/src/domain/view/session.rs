//! A mounted page's view state, driven by host events.

use std::{cell::RefCell, fmt, rc::Rc};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::{
    page::Page,
    view::{
        reveal::{Registration, RevealController, RevealEvent, StaggerPlan},
        scroll::{ScrollObserver, ScrollThreshold},
        state::ViewState,
        viewport::{IntersectionBatch, Subscription, Viewport},
    },
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewSettings {
    pub threshold: ScrollThreshold,
    pub stagger: StaggerPlan,
}

/// One host notification, as recorded in an event script.
///
/// ```json
/// {"scroll": 120.0}
/// {"intersect": {"at_ms": 300, "entries": [{"section": "services", "item": 0, "ratio": 0.4}]}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewEvent {
    Scroll(f64),
    Intersect(IntersectionBatch),
}

/// A recorded sequence of host notifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventScript {
    pub events: Vec<ViewEvent>,
}

/// Observable change caused by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewTransition {
    Scrolled(bool),
    Revealed(RevealEvent),
}

impl fmt::Display for ViewTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scrolled(true) => write!(f, "navigation -> compact"),
            Self::Scrolled(false) => write!(f, "navigation -> expanded"),
            Self::Revealed(event) => write!(
                f,
                "{} revealed (starts at {}ms)",
                event.key,
                event.start.as_millis()
            ),
        }
    }
}

/// Viewport, scroll observer and reveal controller for one mounted page.
///
/// Every reveal target of the page is observed for the session's lifetime.
/// Dropping the session releases all listeners.
pub struct ViewSession {
    viewport: Viewport,
    scroll: ScrollObserver,
    reveal: RevealController,
    registrations: Vec<Registration>,
    log: Rc<RefCell<Vec<ViewTransition>>>,
    _taps: [Subscription; 2],
}

impl ViewSession {
    #[instrument(skip_all)]
    pub fn mount(page: &Page, settings: ViewSettings) -> Self {
        let viewport = Viewport::new();
        let scroll = ScrollObserver::attach(&viewport, settings.threshold);
        let reveal = RevealController::attach(&viewport, settings.stagger);

        let registrations: Vec<Registration> = page
            .reveal_targets()
            .into_iter()
            .map(|key| reveal.observe(key))
            .collect();
        debug!(targets = registrations.len(), "view session mounted");

        let log = Rc::new(RefCell::new(Vec::new()));
        let scroll_tap = {
            let log = Rc::clone(&log);
            scroll.on_change(move |scrolled| {
                log.borrow_mut().push(ViewTransition::Scrolled(*scrolled));
            })
        };
        let reveal_tap = {
            let log = Rc::clone(&log);
            reveal.on_reveal(move |event| {
                log.borrow_mut().push(ViewTransition::Revealed(*event));
            })
        };

        Self {
            viewport,
            scroll,
            reveal,
            registrations,
            log,
            _taps: [scroll_tap, reveal_tap],
        }
    }

    /// Deliver one event and return the transitions it caused, in order.
    pub fn apply(&self, event: &ViewEvent) -> Vec<ViewTransition> {
        match event {
            ViewEvent::Scroll(offset) => self.viewport.scroll_to(*offset),
            ViewEvent::Intersect(batch) => self.viewport.report(batch),
        }
        std::mem::take(&mut *self.log.borrow_mut())
    }

    /// Deliver every event of a script.
    pub fn replay(&self, script: &EventScript) -> Vec<ViewTransition> {
        script
            .events
            .iter()
            .flat_map(|event| self.apply(event))
            .collect()
    }

    pub fn state(&self) -> ViewState {
        ViewState {
            scrolled: self.scroll.is_scrolled(),
            revealed: self.reveal.revealed(),
            delays: self.reveal.reveal_delays(),
        }
    }

    pub fn scroll(&self) -> &ScrollObserver {
        &self.scroll
    }

    pub fn reveal(&self) -> &RevealController {
        &self.reveal
    }

    pub fn observed_targets(&self) -> usize {
        self.registrations.len()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }
}
