//! Application layer for Folio.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (SiteService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! presentation logic itself. Binding rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ComposedPage, PublishReport, PublishRequest, SiteService};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, LoadWarning, LoadedRecord, PageRenderer, RecordSource};

pub use error::ApplicationError;
