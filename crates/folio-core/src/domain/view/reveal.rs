//! One-shot reveal latches with a monotonic per-list stagger.
//!
//! Each observed target is a two-state machine: `Pending -> Revealed`. The
//! transition fires on the first intersection with a non-zero ratio and is
//! never undone, no matter how often the target leaves and re-enters the
//! viewport afterwards.
//!
//! List items (service cards, timeline entries) carry an index. An item's
//! enter transition starts `index * step` after the notification, and never
//! before its predecessor's start, so item *i* cannot begin ahead of item
//! *i - 1*. An item that intersects while its predecessor is still pending
//! is held and latches right after the predecessor does.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, VecDeque},
    fmt,
    rc::{Rc, Weak},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::{
    page::SectionId,
    view::viewport::{EventChannel, IntersectionBatch, Subscription, Viewport},
};

/// Something that can be revealed: a whole section or one item of its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RevealKey {
    pub section: SectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<usize>,
}

impl RevealKey {
    pub const fn section(section: SectionId) -> Self {
        Self {
            section,
            item: None,
        }
    }

    pub const fn item(section: SectionId, index: usize) -> Self {
        Self {
            section,
            item: Some(index),
        }
    }

    /// The item just before this one in the same list.
    pub fn predecessor(&self) -> Option<Self> {
        match self.item {
            Some(index) if index > 0 => Some(Self::item(self.section, index - 1)),
            _ => None,
        }
    }
}

impl fmt::Display for RevealKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.item {
            Some(index) => write!(f, "{}[{}]", self.section, index),
            None => write!(f, "{}", self.section),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Pending,
    /// `start` is when the enter transition begins, relative to mount.
    Revealed { start: Duration },
}

/// A `Pending -> Revealed` transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevealEvent {
    pub key: RevealKey,
    #[serde(rename = "start_ms", serialize_with = "as_millis")]
    pub start: Duration,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Per-list delay between consecutive items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaggerPlan {
    steps: BTreeMap<SectionId, Duration>,
}

impl StaggerPlan {
    /// No delay anywhere.
    pub fn none() -> Self {
        Self {
            steps: BTreeMap::new(),
        }
    }

    pub fn with_step(mut self, section: SectionId, step: Duration) -> Self {
        self.steps.insert(section, step);
        self
    }

    pub fn step_for(&self, section: SectionId) -> Duration {
        self.steps.get(&section).copied().unwrap_or(Duration::ZERO)
    }

    /// Offset from the notification time for `key`.
    pub fn delay_for(&self, key: RevealKey) -> Duration {
        key.item.map_or(Duration::ZERO, |index| {
            self.step_for(key.section)
                .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
        })
    }
}

impl Default for StaggerPlan {
    /// Service cards every 200ms, timeline entries every 100ms.
    fn default() -> Self {
        Self::none()
            .with_step(SectionId::Services, Duration::from_millis(200))
            .with_step(SectionId::Experience, Duration::from_millis(100))
    }
}

#[derive(Debug)]
struct Tracker {
    plan: StaggerPlan,
    phases: BTreeMap<RevealKey, RevealPhase>,
    watchers: BTreeMap<RevealKey, usize>,
    /// Items that intersected while their predecessor was still pending,
    /// with the start they would have had on their own.
    held: BTreeMap<RevealKey, Duration>,
    /// Notification time at which each revealed target latched.
    latched_at: BTreeMap<RevealKey, Duration>,
}

impl Tracker {
    fn watch(&mut self, key: RevealKey) {
        *self.watchers.entry(key).or_insert(0) += 1;
        self.phases.entry(key).or_insert(RevealPhase::Pending);
    }

    fn unwatch(&mut self, key: RevealKey) {
        if let Some(count) = self.watchers.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.watchers.remove(&key);
                self.held.remove(&key);
            }
        }
    }

    fn is_waiting(&self, key: RevealKey) -> bool {
        self.watchers.contains_key(&key)
            && matches!(self.phases.get(&key), Some(RevealPhase::Pending))
    }

    /// Intersecting targets of a batch with their nominal start, predecessors
    /// first so the clamp in [`Self::latch`] sees them.
    fn hits(&self, batch: &IntersectionBatch) -> Vec<(RevealKey, Duration)> {
        let mut keys: Vec<RevealKey> = batch
            .entries
            .iter()
            .filter(|entry| entry.is_intersecting())
            .map(|entry| entry.target)
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys.into_iter()
            .map(|key| (key, batch.at() + self.plan.delay_for(key)))
            .collect()
    }

    /// Held items whose predecessor stopped being observed; they no longer
    /// have anything to wait for.
    fn orphaned(&self) -> Vec<(RevealKey, Duration)> {
        self.held
            .iter()
            .filter(|(key, _)| !key.predecessor().is_some_and(|p| self.is_waiting(p)))
            .map(|(key, nominal)| (*key, *nominal))
            .collect()
    }

    /// Try to move `key` to `Revealed`. Returns the event when it does.
    fn latch(&mut self, key: RevealKey, nominal: Duration, now: Duration) -> Option<RevealEvent> {
        if !self.watchers.contains_key(&key) {
            trace!(%key, "intersection for unobserved target ignored");
            return None;
        }
        if matches!(self.phases.get(&key), Some(RevealPhase::Revealed { .. })) {
            return None;
        }

        let mut start = nominal;
        if let Some(predecessor) = key.predecessor() {
            if self.is_waiting(predecessor) {
                trace!(%key, %predecessor, "held until predecessor reveals");
                self.held.entry(key).or_insert(nominal);
                return None;
            }
            if let Some(RevealPhase::Revealed { start: before }) = self.phases.get(&predecessor) {
                start = start.max(*before);
            }
        }

        let start = self.held.remove(&key).map_or(start, |held| start.max(held));
        self.phases.insert(key, RevealPhase::Revealed { start });
        self.latched_at.insert(key, now);
        Some(RevealEvent { key, start })
    }

    /// The held item directly behind `key`, now free to latch.
    fn release_successor(&mut self, key: RevealKey) -> Option<(RevealKey, Duration)> {
        let successor = RevealKey::item(key.section, key.item? + 1);
        self.held.remove(&successor).map(|nominal| (successor, nominal))
    }
}

/// Latches reveal state for every observed target.
#[derive(Debug)]
pub struct RevealController {
    tracker: Rc<RefCell<Tracker>>,
    reveals: EventChannel<RevealEvent>,
    subscription: Option<Subscription>,
}

impl RevealController {
    /// A controller not connected to any viewport; feed it with [`Self::apply`].
    pub fn new(plan: StaggerPlan) -> Self {
        Self {
            tracker: Rc::new(RefCell::new(Tracker {
                plan,
                phases: BTreeMap::new(),
                watchers: BTreeMap::new(),
                held: BTreeMap::new(),
                latched_at: BTreeMap::new(),
            })),
            reveals: EventChannel::new(),
            subscription: None,
        }
    }

    /// A controller listening to `viewport`'s intersection feed.
    pub fn attach(viewport: &Viewport, plan: StaggerPlan) -> Self {
        let mut controller = Self::new(plan);
        let tracker = Rc::downgrade(&controller.tracker);
        let reveals = controller.reveals.clone();
        controller.subscription = Some(viewport.on_intersect(move |batch| {
            dispatch(&tracker, &reveals, batch);
        }));
        controller
    }

    /// Start tracking `key`. Tracking lasts as long as the returned guard.
    pub fn observe(&self, key: RevealKey) -> Registration {
        self.tracker.borrow_mut().watch(key);
        Registration {
            key,
            tracker: Rc::downgrade(&self.tracker),
            active: true,
        }
    }

    /// Process a batch directly, as the viewport feed would.
    pub fn apply(&self, batch: &IntersectionBatch) -> Vec<RevealEvent> {
        dispatch(&Rc::downgrade(&self.tracker), &self.reveals, batch)
    }

    pub fn is_revealed(&self, key: RevealKey) -> bool {
        matches!(self.phase(key), Some(RevealPhase::Revealed { .. }))
    }

    /// `None` for a target that was never observed.
    pub fn phase(&self, key: RevealKey) -> Option<RevealPhase> {
        self.tracker.borrow().phases.get(&key).copied()
    }

    pub fn reveal_start(&self, key: RevealKey) -> Option<Duration> {
        match self.phase(key)? {
            RevealPhase::Revealed { start } => Some(start),
            RevealPhase::Pending => None,
        }
    }

    /// How long after the notification that latched `key` its transition
    /// begins. This is the delay a stylesheet should apply once the target
    /// is marked visible.
    pub fn reveal_delay(&self, key: RevealKey) -> Option<Duration> {
        let start = self.reveal_start(key)?;
        let at = *self.tracker.borrow().latched_at.get(&key)?;
        Some(start.saturating_sub(at))
    }

    /// Every revealed target with its [`Self::reveal_delay`].
    pub fn reveal_delays(&self) -> BTreeMap<RevealKey, Duration> {
        self.revealed()
            .into_iter()
            .filter_map(|key| Some((key, self.reveal_delay(key)?)))
            .collect()
    }

    /// Every target revealed so far. Only ever grows.
    pub fn revealed(&self) -> BTreeSet<RevealKey> {
        self.tracker
            .borrow()
            .phases
            .iter()
            .filter(|(_, phase)| matches!(phase, RevealPhase::Revealed { .. }))
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn on_reveal(&self, listener: impl Fn(&RevealEvent) + 'static) -> Subscription {
        self.reveals.subscribe(listener)
    }

    pub fn detach(&mut self) {
        self.subscription.take();
    }
}

/// Latch and announce one target at a time. The tracker is never borrowed
/// while listeners run, so a listener may cancel a registration and have
/// that take effect for the rest of the batch.
fn dispatch(
    tracker: &Weak<RefCell<Tracker>>,
    reveals: &EventChannel<RevealEvent>,
    batch: &IntersectionBatch,
) -> Vec<RevealEvent> {
    let Some(tracker) = tracker.upgrade() else {
        return Vec::new();
    };

    let mut queue: VecDeque<(RevealKey, Duration)> = {
        let state = tracker.borrow();
        state.orphaned().into_iter().chain(state.hits(batch)).collect()
    };

    let mut fired = Vec::new();
    while let Some((key, nominal)) = queue.pop_front() {
        let latched = tracker.borrow_mut().latch(key, nominal, batch.at());
        let Some(event) = latched else {
            continue;
        };
        debug!(key = %event.key, start_ms = event.start.as_millis() as u64, "revealed");
        reveals.emit(&event);
        fired.push(event);

        let released = tracker.borrow_mut().release_successor(key);
        if let Some(next) = released {
            queue.push_front(next);
        }
    }
    fired
}

/// RAII guard for one observed target.
#[must_use = "dropping a Registration stops observing the target"]
#[derive(Debug)]
pub struct Registration {
    key: RevealKey,
    tracker: Weak<RefCell<Tracker>>,
    active: bool,
}

impl Registration {
    pub fn key(&self) -> RevealKey {
        self.key
    }

    /// Stop observing. A revealed target stays revealed; a pending one never
    /// reveals.
    pub fn cancel(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !std::mem::replace(&mut self.active, false) {
            return;
        }
        if let Some(tracker) = self.tracker.upgrade() {
            tracker.borrow_mut().unwatch(self.key);
        }
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}
