//! The host side of the view-state machines.
//!
//! A [`Viewport`] stands in for the browser window: it delivers scroll and
//! intersection notifications to whoever subscribed. Tests and the CLI feed
//! it synthetic events; nothing here reads a real screen.
//!
//! # Invariants
//!
//! 1. Listeners are notified in registration order.
//! 2. A listener cancelled during a notification cycle (by itself or by an
//!    earlier listener) receives nothing further, including the rest of the
//!    current cycle.
//! 3. Dropping a [`Subscription`] removes the listener; repeated
//!    mount/unmount never accumulates listeners.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::domain::view::reveal::RevealKey;

type Listener<E> = Rc<dyn Fn(&E)>;

struct Registry<E> {
    next_id: u64,
    listeners: Vec<(u64, Listener<E>)>,
}

impl<E> Registry<E> {
    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(lid, _)| *lid == id)
    }

    fn remove(&mut self, id: u64) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }
}

/// Single-threaded fan-out of events to subscribed listeners.
///
/// Cloning yields another handle to the same listener list.
pub struct EventChannel<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E: 'static> EventChannel<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener. It stays registered until the returned guard is
    /// dropped or cancelled.
    pub fn subscribe(&self, listener: impl Fn(&E) + 'static) -> Subscription {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.listeners.push((id, Rc::new(listener)));
            id
        };

        let weak: Weak<RefCell<Registry<E>>> = Rc::downgrade(&self.registry);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    registry.borrow_mut().remove(id);
                }
            })),
        }
    }

    /// Deliver `event` to every listener registered at the start of the call.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(u64, Listener<E>)> = self.registry.borrow().listeners.clone();
        for (id, listener) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<E: 'static> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EventChannel<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<E> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("listeners", &self.registry.borrow().listeners.len())
            .finish()
    }
}

/// RAII guard for a listener registration.
///
/// Cancelling is idempotent and safe from inside the listener's own
/// notification.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn cancel(mut self) {
        self.release_now();
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// Vertical scroll offset reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub offset: f64,
}

/// One target's intersection with the visible viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntersectionEntry {
    #[serde(flatten)]
    pub target: RevealKey,
    /// Visible fraction of the target's bounding box, `0.0..=1.0`.
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn new(target: RevealKey, ratio: f64) -> Self {
        Self { target, ratio }
    }

    /// Any non-zero intersection counts.
    pub fn is_intersecting(&self) -> bool {
        self.ratio > 0.0
    }
}

/// Intersection entries delivered together in one notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionBatch {
    /// Host time of the notification, in milliseconds since mount.
    #[serde(default)]
    pub at_ms: u64,
    pub entries: Vec<IntersectionEntry>,
}

impl IntersectionBatch {
    pub fn new(at_ms: u64, entries: Vec<IntersectionEntry>) -> Self {
        Self { at_ms, entries }
    }

    pub fn at(&self) -> Duration {
        Duration::from_millis(self.at_ms)
    }
}

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Injected host environment for scroll and intersection notifications.
#[derive(Debug, Default)]
pub struct Viewport {
    offset: Cell<f64>,
    scroll: EventChannel<ScrollEvent>,
    intersections: EventChannel<IntersectionBatch>,
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current vertical offset.
    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    /// Move to `offset` and notify scroll listeners.
    ///
    /// Non-finite or negative offsets are clamped to zero.
    pub fn scroll_to(&self, offset: f64) {
        let offset = if offset.is_finite() {
            offset.max(0.0)
        } else {
            0.0
        };
        self.offset.set(offset);
        self.scroll.emit(&ScrollEvent { offset });
    }

    /// Deliver an intersection batch to intersection listeners.
    pub fn report(&self, batch: &IntersectionBatch) {
        self.intersections.emit(batch);
    }

    pub fn on_scroll(&self, listener: impl Fn(&ScrollEvent) + 'static) -> Subscription {
        self.scroll.subscribe(listener)
    }

    pub fn on_intersect(&self, listener: impl Fn(&IntersectionBatch) + 'static) -> Subscription {
        self.intersections.subscribe(listener)
    }

    /// Total listeners across both feeds.
    pub fn listener_count(&self) -> usize {
        self.scroll.listener_count() + self.intersections.listener_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listeners_fire_in_registration_order() {
        let channel = EventChannel::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let a = {
            let seen = Rc::clone(&seen);
            channel.subscribe(move |v| seen.borrow_mut().push(("a", *v)))
        };
        let b = {
            let seen = Rc::clone(&seen);
            channel.subscribe(move |v| seen.borrow_mut().push(("b", *v)))
        };

        channel.emit(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
        drop((a, b));
    }

    #[test]
    fn dropping_subscription_stops_delivery() {
        let channel = EventChannel::<u32>::new();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            channel.subscribe(move |_| hits.set(hits.get() + 1))
        };

        channel.emit(&1);
        drop(sub);
        channel.emit(&2);

        assert_eq!(hits.get(), 1);
        assert_eq!(channel.listener_count(), 0);
    }

    #[test]
    fn listener_can_cancel_itself_mid_cycle() {
        let channel = EventChannel::<u32>::new();
        let hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let sub = {
            let hits = Rc::clone(&hits);
            let slot = Rc::clone(&slot);
            channel.subscribe(move |_| {
                hits.set(hits.get() + 1);
                if let Some(sub) = slot.borrow_mut().take() {
                    sub.cancel();
                }
            })
        };
        *slot.borrow_mut() = Some(sub);

        channel.emit(&1);
        channel.emit(&2);

        assert_eq!(hits.get(), 1);
        assert_eq!(channel.listener_count(), 0);
    }

    #[test]
    fn listener_cancelled_by_earlier_listener_is_skipped() {
        let channel = EventChannel::<u32>::new();
        let late_hits = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let _killer = {
            let victim = Rc::clone(&victim);
            channel.subscribe(move |_| {
                victim.borrow_mut().take();
            })
        };
        let late = {
            let late_hits = Rc::clone(&late_hits);
            channel.subscribe(move |_| late_hits.set(late_hits.get() + 1))
        };
        *victim.borrow_mut() = Some(late);

        channel.emit(&1);
        assert_eq!(late_hits.get(), 0);
    }

    #[test]
    fn subscription_outliving_channel_is_harmless() {
        let channel = EventChannel::<u32>::new();
        let sub = channel.subscribe(|_| {});
        drop(channel);
        sub.cancel();
    }

    #[test]
    fn scroll_offsets_are_clamped() {
        let viewport = Viewport::new();
        viewport.scroll_to(-10.0);
        assert_eq!(viewport.offset(), 0.0);
        viewport.scroll_to(f64::NAN);
        assert_eq!(viewport.offset(), 0.0);
        viewport.scroll_to(120.5);
        assert_eq!(viewport.offset(), 120.5);
    }

    #[test]
    fn zero_ratio_is_not_intersecting() {
        use crate::domain::SectionId;
        let key = RevealKey::section(SectionId::Services);
        assert!(!IntersectionEntry::new(key, 0.0).is_intersecting());
        assert!(!IntersectionEntry::new(key, f64::NAN).is_intersecting());
        assert!(IntersectionEntry::new(key, 0.01).is_intersecting());
    }
}
