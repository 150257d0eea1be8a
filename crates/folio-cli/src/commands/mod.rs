//! Command handlers, one module per subcommand.
//!
//! Handlers translate arguments into core calls and print results. Page
//! logic stays in `folio-core`.

pub mod check;
pub mod completions;
pub mod config;
pub mod init;
pub mod outline;
pub mod render;
pub mod sample;
pub mod simulate;

use folio_adapters::{HtmlRenderer, JsonRecordSource, LocalFilesystem};
use folio_core::application::SiteService;

use crate::config::AppConfig;

/// Wire the production adapters with the configured page options.
pub(crate) fn site_service(config: &AppConfig) -> SiteService {
    SiteService::new(
        Box::new(JsonRecordSource::new()),
        Box::new(HtmlRenderer::with_stagger(config.stagger())),
        Box::new(LocalFilesystem::new()),
    )
    .with_options(config.page_options())
}
