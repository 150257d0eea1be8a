//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `folio-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `RecordSource`: Record and event-script loading
//!   - `PageRenderer`: Markup generation
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{Filesystem, LoadWarning, LoadedRecord, PageRenderer, RecordSource};

#[cfg(test)]
pub use output::{MockFilesystem, MockPageRenderer, MockRecordSource};
