//! Folio Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Folio
//! resume site renderer, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            folio-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │              (SiteService)              │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Driven: RecordSource, PageRenderer,    │
//! │          Filesystem)                    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     folio-adapters (Infrastructure)     │
//! │ (JsonRecordSource, HtmlRenderer, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ResumeRecord, Formatter, ViewSession,  │
//! │  PageComposer)                          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_core::{
//!     application::SiteService,
//!     domain::{ViewSession, ViewSettings},
//! };
//!
//! // Adapters come from `folio-adapters`.
//! let service = SiteService::new(source, renderer, filesystem);
//! let page = service.compose("resume.json".as_ref()).unwrap();
//! let session = ViewSession::mount(&page.page, ViewSettings::default());
//! let html = service.render(&page.page, &session.state()).unwrap();
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        SiteService,
        ports::{Filesystem, PageRenderer, RecordSource},
    };
    pub use crate::domain::{
        Page, PageComposer, ResumeRecord, RevealKey, SectionId, ViewEvent, ViewSession,
        ViewSettings, ViewState,
    };
    pub use crate::error::{FolioError, FolioResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
