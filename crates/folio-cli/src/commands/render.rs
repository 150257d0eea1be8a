//! `folio render` - compose the page and write it as HTML.

use std::io::IsTerminal as _;

use serde::Serialize;
use tracing::{debug, info, instrument};

use folio_core::{
    application::{ApplicationError, PublishReport, PublishRequest},
    domain::SectionId,
    error::FolioError,
};

use crate::{
    cli::{GlobalArgs, RenderArgs},
    commands::site_service,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Machine-readable summary for `--output-format json`.
#[derive(Debug, Serialize)]
struct RenderSummary<'a> {
    path: String,
    bytes: usize,
    written: bool,
    rendered: &'a [SectionId],
    omitted: &'a [SectionId],
    warnings: Vec<String>,
    transitions: usize,
}

impl<'a> From<&'a PublishReport> for RenderSummary<'a> {
    fn from(report: &'a PublishReport) -> Self {
        Self {
            path: report.path.display().to_string(),
            bytes: report.bytes,
            written: report.written,
            rendered: &report.rendered,
            omitted: &report.omitted,
            warnings: report
                .warnings
                .iter()
                .map(|w| format!("{}: {}", w.field, w.message))
                .collect(),
            transitions: report.transitions.len(),
        }
    }
}

/// Execute `folio render`.
///
/// 1. Build a [`PublishRequest`] from flags over config
/// 2. Ask before overwriting, when a terminal is attached
/// 3. Publish, then report what was written or omitted
#[instrument(skip_all, fields(record = %args.record.display()))]
pub fn execute(
    args: RenderArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let mut request = build_request(&args, &config);
    debug!(target_path = %request.target().display(), "render request built");

    if !request.overwrite && request.target().exists() && should_prompt(&args, &global) {
        if confirm_overwrite(&request)? {
            request.overwrite = true;
        } else {
            return Err(CliError::Cancelled);
        }
    }

    let report = site_service(&config)
        .publish(&request)
        .map_err(|err| match err {
            FolioError::Application(ApplicationError::OutputExists { path }) => {
                CliError::OutputExists { path }
            }
            other => CliError::Core(other),
        })?;

    if args.stdout {
        output.emit(&report.html)?;
        return Ok(());
    }

    if output.wants_json() {
        output.emit_json(&RenderSummary::from(&report))?;
        return Ok(());
    }

    for warning in &report.warnings {
        output.warning(&format!(
            "{} ignored: {}",
            warning.field, warning.message
        ))?;
    }
    for id in &report.omitted {
        output.warning(&format!("section '{id}' omitted"))?;
    }
    if !report.transitions.is_empty() {
        output.info(&format!(
            "Replayed events: {} transition(s)",
            report.transitions.len()
        ))?;
    }

    if report.written {
        info!(path = %report.path.display(), "render complete");
        output.success(&format!(
            "Wrote {} ({} bytes, {} sections)",
            report.path.display(),
            report.bytes,
            report.rendered.len()
        ))?;
    } else {
        output.info(&format!(
            "Dry run: would write {} ({} bytes)",
            report.path.display(),
            report.bytes
        ))?;
    }

    Ok(())
}

fn build_request(args: &RenderArgs, config: &AppConfig) -> PublishRequest {
    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| config.render.output_dir.clone());

    let mut request = PublishRequest::new(&args.record, output_dir);
    request.file_name = config.render.file_name.clone();
    request.events = args.events.clone();
    request.settings = config.view_settings();
    request.strict = args.strict;
    // --stdout never touches the output file
    request.overwrite = args.force || args.stdout;
    request.dry_run = args.dry_run || args.stdout;
    request
}

fn should_prompt(args: &RenderArgs, global: &GlobalArgs) -> bool {
    !args.yes && !global.quiet && !args.dry_run && std::io::stdin().is_terminal()
}

#[cfg(feature = "interactive")]
fn confirm_overwrite(request: &PublishRequest) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(format!("{} exists. Overwrite?", request.target().display()))
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: "could not read confirmation".into(),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm_overwrite(_request: &PublishRequest) -> CliResult<bool> {
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args() -> RenderArgs {
        RenderArgs {
            record: PathBuf::from("resume.json"),
            output: None,
            events: None,
            force: false,
            yes: false,
            dry_run: false,
            strict: false,
            stdout: false,
        }
    }

    #[test]
    fn output_dir_falls_back_to_config() {
        let request = build_request(&args(), &AppConfig::default());
        assert_eq!(request.target(), PathBuf::from("site/index.html"));
        assert!(!request.overwrite);
        assert!(!request.dry_run);
    }

    #[test]
    fn flags_override_config() {
        let mut a = args();
        a.output = Some(PathBuf::from("public"));
        a.force = true;
        a.strict = true;
        let request = build_request(&a, &AppConfig::default());
        assert_eq!(request.output_dir, PathBuf::from("public"));
        assert!(request.overwrite);
        assert!(request.strict);
    }

    #[test]
    fn stdout_is_a_dry_run() {
        let mut a = args();
        a.stdout = true;
        let request = build_request(&a, &AppConfig::default());
        assert!(request.dry_run);
        assert!(request.overwrite);
    }
}
