//! Infrastructure adapters for Folio.
//!
//! This crate implements the ports defined in `folio-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod renderer;
pub mod sample;
pub mod source;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::HtmlRenderer;
pub use source::JsonRecordSource;
