use std::{
    collections::{BTreeMap, BTreeSet},
    time::Duration,
};

use serde::Serialize;

use crate::domain::view::reveal::RevealKey;

/// Ephemeral per-page state handed to renderers. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub scrolled: bool,
    pub revealed: BTreeSet<RevealKey>,
    /// Transition delay each revealed target latched with. Targets missing
    /// here fall back to the nominal stagger.
    #[serde(skip)]
    pub delays: BTreeMap<RevealKey, Duration>,
}

/// The navbar's two looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavStyle {
    /// Transparent and roomy, at the top of the page.
    Expanded,
    /// Opaque and tight, once the page is scrolled.
    Compact,
}

impl ViewState {
    /// Everything revealed and unscrolled: what a static export shows.
    pub fn fully_revealed(keys: impl IntoIterator<Item = RevealKey>) -> Self {
        Self {
            scrolled: false,
            revealed: keys.into_iter().collect(),
            delays: BTreeMap::new(),
        }
    }

    pub fn is_revealed(&self, key: RevealKey) -> bool {
        self.revealed.contains(&key)
    }

    pub fn latched_delay(&self, key: RevealKey) -> Option<Duration> {
        self.delays.get(&key).copied()
    }

    pub fn nav_style(&self) -> NavStyle {
        if self.scrolled {
            NavStyle::Compact
        } else {
            NavStyle::Expanded
        }
    }
}
