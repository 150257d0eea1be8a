//! `folio outline` - show what the page will contain without rendering it.

use serde::Serialize;
use tracing::instrument;

use folio_core::domain::{Page, SectionId, SectionSlot, formatter};

use crate::{
    cli::{OutlineArgs, ReportFormat},
    commands::site_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Outline {
    title: String,
    first_name: Option<String>,
    primary_title: String,
    sections: Vec<SectionLine>,
}

#[derive(Debug, Serialize)]
struct SectionLine {
    id: SectionId,
    anchor: Option<&'static str>,
    rendered: bool,
    reveal_targets: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl SectionLine {
    fn from_slot(slot: &SectionSlot) -> Self {
        let id = slot.id();
        match slot {
            SectionSlot::Rendered(view) => Self {
                id,
                anchor: id.anchor(),
                rendered: true,
                reveal_targets: view.reveal_targets().len(),
                reason: None,
            },
            SectionSlot::Omitted { reason, .. } => Self {
                id,
                anchor: id.anchor(),
                rendered: false,
                reveal_targets: 0,
                reason: Some(reason.to_string()),
            },
        }
    }
}

fn outline(page: &Page, profile: &folio_core::domain::Profile) -> Outline {
    Outline {
        title: page.title().to_owned(),
        first_name: formatter::first_name(profile).ok().map(str::to_owned),
        primary_title: formatter::primary_title(profile).to_owned(),
        sections: page.slots().iter().map(SectionLine::from_slot).collect(),
    }
}

#[instrument(skip_all, fields(record = %args.record.display()))]
pub fn execute(args: OutlineArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let composed = site_service(&config).compose(&args.record)?;
    let outline = outline(&composed.page, &composed.record.profile);

    if args.format == ReportFormat::Json || output.wants_json() {
        output.emit_json(&outline)?;
        return Ok(());
    }

    output.header(&outline.title)?;
    output.print(&format!(
        "  first name: {}",
        outline.first_name.as_deref().unwrap_or("-")
    ))?;
    output.print(&format!("  title:      {}", outline.primary_title))?;
    output.print("")?;
    for (position, line) in outline.sections.iter().enumerate() {
        let anchor = line.anchor.map(|a| format!("#{a}")).unwrap_or_default();
        let status = match &line.reason {
            None => format!("{} reveal target(s)", line.reveal_targets),
            Some(reason) => format!("omitted: {reason}"),
        };
        output.print(&format!(
            "  {}. {:<11} {:<12} {}",
            position + 1,
            line.id.as_str(),
            anchor,
            status
        ))?;
    }
    Ok(())
}
