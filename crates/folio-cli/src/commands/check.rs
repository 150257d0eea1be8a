//! `folio check` - load and validate a record without rendering.

use tracing::instrument;

use crate::{
    cli::RecordArgs,
    commands::site_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(record = %args.record.display()))]
pub fn execute(args: RecordArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let composed = site_service(&config).compose(&args.record)?;

    if !composed.is_clean() {
        return Err(CliError::CheckFailed {
            issues: composed.issues(),
        });
    }

    let record = &composed.record;
    output.success(&format!(
        "{} is valid: {} jobs, {} services, {} education entries",
        args.record.display(),
        record.experience.len(),
        record.services.len(),
        record.education.len(),
    ))?;
    Ok(())
}
