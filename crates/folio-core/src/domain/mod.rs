//! Core domain layer for Folio.
//!
//! This module contains pure presentation logic with no I/O. Loading the
//! record, producing markup and writing files are handled via ports (traits)
//! defined in the application layer.
//!
//! - **No async**: everything is synchronous
//! - **No I/O**: no filesystem, network, or terminal access
//! - **Immutable input**: the `ResumeRecord` is read-only once loaded
//! - **Explicit view state**: scroll and reveal state live in `view`, never
//!   in global state
//!
// Public API - what the world sees
pub mod error;
pub mod formatter;
pub mod page;
pub mod record;
pub mod view;

pub use error::{DomainError, ErrorCategory, FormatError};
pub use page::{
    ContactView, EducationView, HeroView, NavLink, NavigationView, Page, PageComposer,
    PageOptions, SectionId, SectionSlot, SectionView, ServiceCard, ServicesView, TimelineEntry,
    TimelineView,
};
pub use record::{Education, Highlight, Job, Profile, ResumeRecord, Service};
pub use view::{
    Boundary, EventChannel, EventScript, IntersectionBatch, IntersectionEntry, NavStyle,
    Registration, RevealController, RevealEvent, RevealKey, RevealPhase, ScrollObserver,
    ScrollThreshold, StaggerPlan, Subscription, ViewEvent, ViewSession, ViewSettings, ViewState,
    ViewTransition, Viewport,
};
