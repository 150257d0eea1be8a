//! `folio simulate` - replay an event script and print every transition.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::instrument;

use folio_core::domain::{NavStyle, RevealKey, ViewState, ViewTransition};

use crate::{
    cli::{ReportFormat, SimulateArgs},
    commands::site_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct Replay<'a> {
    transitions: &'a [ViewTransition],
    nav: NavStyle,
    revealed: &'a BTreeSet<RevealKey>,
    pending: Vec<RevealKey>,
}

#[instrument(skip_all, fields(record = %args.record.display(), events = %args.events.display()))]
pub fn execute(args: SimulateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = site_service(&config);
    let composed = service.compose(&args.record)?;
    let (state, transitions) =
        service.simulate(&composed.page, &args.events, config.view_settings())?;

    let pending = pending(composed.page.reveal_targets(), &state);
    let replay = Replay {
        transitions: &transitions,
        nav: state.nav_style(),
        revealed: &state.revealed,
        pending,
    };

    if args.format == ReportFormat::Json || output.wants_json() {
        output.emit_json(&replay)?;
        return Ok(());
    }

    if transitions.is_empty() {
        output.info("No transitions")?;
    }
    for (step, transition) in transitions.iter().enumerate() {
        output.print(&format!("{:>3}  {transition}", step + 1))?;
    }
    output.print("")?;
    output.header(&format!(
        "navigation: {}, revealed {} of {}",
        match replay.nav {
            NavStyle::Compact => "compact",
            NavStyle::Expanded => "expanded",
        },
        replay.revealed.len(),
        replay.revealed.len() + replay.pending.len(),
    ))?;
    if !replay.pending.is_empty() {
        let names: Vec<String> = replay.pending.iter().map(ToString::to_string).collect();
        output.print(&format!("  still hidden: {}", names.join(", ")))?;
    }
    Ok(())
}

/// Targets the script never revealed, in page order.
fn pending(targets: Vec<RevealKey>, state: &ViewState) -> Vec<RevealKey> {
    targets
        .into_iter()
        .filter(|key| !state.is_revealed(*key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::domain::SectionId;

    #[test]
    fn pending_keeps_page_order() {
        let targets = vec![
            RevealKey::section(SectionId::Services),
            RevealKey::item(SectionId::Services, 0),
            RevealKey::section(SectionId::Contact),
        ];
        let state = ViewState::fully_revealed([RevealKey::item(SectionId::Services, 0)]);
        assert_eq!(
            pending(targets, &state),
            vec![
                RevealKey::section(SectionId::Services),
                RevealKey::section(SectionId::Contact),
            ]
        );
    }
}
