//! Flags accepted by every `folio` subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Log level for the composer, renderer and reveal controller.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Show more of the pipeline's logs (-v, -vv, -vvv)",
        long_help = "Raise the log level written to stderr:
    (none)  - warnings, e.g. omitted sections
    -v      - info: page written, run finished
    -vv     - debug: composed sections, reveal starts
    -vvv    - trace: every intersection and held item"
    )]
    pub verbose: u8,

    /// Keep stdout to the page or report itself.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Drop status lines; errors still print"
    )]
    pub quiet: bool,

    /// Plain status markers. `NO_COLOR` has the same effect.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Print status markers without ANSI colour"
    )]
    pub no_color: bool,

    /// Settings file read instead of the user or `.folio.toml` one.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from FILE (FOLIO_* variables still override)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Report style; json applies to render, outline and simulate"
    )]
    pub output_format: OutputFormat,
}

/// How reports and status lines are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from config, else human on a terminal, plain otherwise.
    #[default]
    Auto,
    /// Coloured status markers.
    Human,
    /// Status markers without colour.
    Plain,
    /// One JSON document per command.
    Json,
}
