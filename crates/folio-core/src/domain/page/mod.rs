//! Data binding from the resume record to an ordered page of sections.
//!
//! A [`Page`] is markup-agnostic: it holds the section view models in their
//! fixed order. Turning it into HTML is the job of a `PageRenderer` adapter.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::{error::DomainError, view::RevealKey};

pub mod compose;
pub mod sections;

pub use compose::{PageComposer, PageOptions};
pub use sections::{
    ContactView, EducationView, HeroView, NavLink, NavigationView, ServiceCard, ServicesView,
    TimelineEntry, TimelineView,
};

/// The six sections of the page, declared in render order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Navigation,
    Hero,
    Services,
    Experience,
    Education,
    Contact,
}

impl SectionId {
    /// Render order. Navigation anchors resolve against this order.
    pub const ORDER: [SectionId; 6] = [
        Self::Navigation,
        Self::Hero,
        Self::Services,
        Self::Experience,
        Self::Education,
        Self::Contact,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Hero => "hero",
            Self::Services => "services",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Contact => "contact",
        }
    }

    /// In-page anchor (`#home`), if the section has one.
    pub const fn anchor(&self) -> Option<&'static str> {
        match self {
            Self::Hero => Some("home"),
            Self::Services => Some("services"),
            Self::Experience => Some("experience"),
            Self::Contact => Some("contact"),
            Self::Navigation | Self::Education => None,
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ORDER
            .into_iter()
            .find(|id| id.as_str() == lower || id.anchor() == Some(lower.as_str()))
            .ok_or_else(|| DomainError::UnknownSection(s.to_owned()))
    }
}

/// A section's bound data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum SectionView {
    Navigation(NavigationView),
    Hero(HeroView),
    Services(ServicesView),
    Experience(TimelineView),
    Education(EducationView),
    Contact(ContactView),
}

impl SectionView {
    pub fn id(&self) -> SectionId {
        match self {
            Self::Navigation(_) => SectionId::Navigation,
            Self::Hero(_) => SectionId::Hero,
            Self::Services(_) => SectionId::Services,
            Self::Experience(_) => SectionId::Experience,
            Self::Education(_) => SectionId::Education,
            Self::Contact(_) => SectionId::Contact,
        }
    }

    /// Reveal targets owned by this section: the section itself (except
    /// navigation and hero, which are visible on load) and its list items.
    pub fn reveal_targets(&self) -> Vec<RevealKey> {
        let id = self.id();
        let items = match self {
            Self::Navigation(_) | Self::Hero(_) => return Vec::new(),
            Self::Services(view) => view.cards.len(),
            Self::Experience(view) => view.entries.len(),
            Self::Education(_) | Self::Contact(_) => 0,
        };
        std::iter::once(RevealKey::section(id))
            .chain((0..items).map(|i| RevealKey::item(id, i)))
            .collect()
    }
}

/// One position in the page: a bound section, or a section that could not
/// be bound and is left out.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionSlot {
    Rendered(SectionView),
    Omitted { id: SectionId, reason: DomainError },
}

impl SectionSlot {
    pub fn id(&self) -> SectionId {
        match self {
            Self::Rendered(view) => view.id(),
            Self::Omitted { id, .. } => *id,
        }
    }

    pub fn view(&self) -> Option<&SectionView> {
        match self {
            Self::Rendered(view) => Some(view),
            Self::Omitted { .. } => None,
        }
    }
}

/// The composed page: exactly one slot per [`SectionId`], in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub(crate) slots: Vec<SectionSlot>,
    pub(crate) title: String,
}

impl Page {
    pub fn slots(&self) -> &[SectionSlot] {
        &self.slots
    }

    /// Document title (`<title>`).
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn sections(&self) -> impl Iterator<Item = &SectionView> {
        self.slots.iter().filter_map(SectionSlot::view)
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionView> {
        self.sections().find(|view| view.id() == id)
    }

    /// Sections left out, with the reason.
    pub fn diagnostics(&self) -> Vec<(SectionId, &DomainError)> {
        self.slots
            .iter()
            .filter_map(|slot| match slot {
                SectionSlot::Omitted { id, reason } => Some((*id, reason)),
                SectionSlot::Rendered(_) => None,
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.diagnostics().is_empty()
    }

    pub fn reveal_targets(&self) -> Vec<RevealKey> {
        self.sections().flat_map(SectionView::reveal_targets).collect()
    }

    /// Anchors present in the page, in order.
    pub fn anchors(&self) -> Vec<&'static str> {
        self.sections().filter_map(|view| view.id().anchor()).collect()
    }
}
