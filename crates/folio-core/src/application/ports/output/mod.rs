//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `folio-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{EventScript, Page, ResumeRecord, ViewState};
use crate::error::FolioResult;

/// A record section that failed to decode and was replaced by its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub field: String,
    pub message: String,
}

/// A record plus whatever had to be dropped while loading it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRecord {
    pub record: ResumeRecord,
    pub warnings: Vec<LoadWarning>,
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `folio_adapters::filesystem::LocalFilesystem` (production)
/// - `folio_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> FolioResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> FolioResult<()>;

    /// Read a whole file as UTF-8.
    fn read_file(&self, path: &Path) -> FolioResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for loading the resume record and event scripts.
///
/// Implemented by:
/// - `folio_adapters::source::JsonRecordSource`
#[cfg_attr(test, mockall::automock)]
pub trait RecordSource: Send + Sync {
    /// Load the record. Only an unreadable document or undecodable profile
    /// is an error; other broken sections come back as warnings.
    fn load_record(&self, location: &Path) -> FolioResult<LoadedRecord>;

    /// Load a recorded sequence of viewport events.
    fn load_script(&self, location: &Path) -> FolioResult<EventScript>;
}

/// Port for turning a composed page into markup.
///
/// Implemented by:
/// - `folio_adapters::renderer::HtmlRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait PageRenderer: Send + Sync {
    /// Render `page` as it looks in `state`. Must not depend on anything
    /// else.
    fn render(&self, page: &Page, state: &ViewState) -> FolioResult<String>;
}
