//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "publish the site" or "check a record".

pub mod site_service;

pub use site_service::{ComposedPage, PublishReport, PublishRequest, SiteService};
