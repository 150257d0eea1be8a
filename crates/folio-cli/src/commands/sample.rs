//! `folio sample` - print or write the built-in example record.

use folio_adapters::sample::SAMPLE_RECORD;

use crate::{
    cli::SampleArgs,
    error::{CliError, CliResult, IntoCli as _},
    output::OutputManager,
};

pub fn execute(args: SampleArgs, output: OutputManager) -> CliResult<()> {
    let Some(path) = args.output else {
        output.emit(SAMPLE_RECORD)?;
        return Ok(());
    };

    if path.exists() && !args.force {
        return Err(CliError::OutputExists { path });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    std::fs::write(&path, SAMPLE_RECORD)
        .with_cli_context(|| format!("Failed to write sample to '{}'", path.display()))?;

    output.success(&format!("Sample record written to {}", path.display()))?;
    output.print(&format!("  Next: folio render {}", path.display()))?;
    Ok(())
}
