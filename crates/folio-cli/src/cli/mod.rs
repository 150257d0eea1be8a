//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "folio",
    bin_name = "folio",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Render a single-page resume site from a JSON record",
    long_about = "Folio binds a resume record to a fixed six-section page \
                  (navigation, hero, services, experience, education, contact) \
                  and writes it out as one HTML document.",
    after_help = "EXAMPLES:\n\
        \x20 folio sample -o resume.json\n\
        \x20 folio render resume.json -o site\n\
        \x20 folio simulate resume.json --events scroll.json\n\
        \x20 folio completions bash > /usr/share/bash-completion/completions/folio",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the page to an HTML file.
    #[command(
        visible_alias = "r",
        about = "Render the site",
        after_help = "EXAMPLES:\n\
            \x20 folio render resume.json\n\
            \x20 folio render resume.json -o public --force\n\
            \x20 folio render resume.json --events scroll.json --stdout"
    )]
    Render(RenderArgs),

    /// Load and validate a record without rendering.
    #[command(about = "Validate a record")]
    Check(RecordArgs),

    /// Show the composed section order, anchors and derived strings.
    #[command(
        about = "Show the page outline",
        after_help = "EXAMPLES:\n\
            \x20 folio outline resume.json\n\
            \x20 folio outline resume.json --format json"
    )]
    Outline(OutlineArgs),

    /// Write the built-in sample record.
    #[command(
        about = "Write a sample record",
        after_help = "EXAMPLES:\n\
            \x20 folio sample               # print to stdout\n\
            \x20 folio sample -o resume.json"
    )]
    Sample(SampleArgs),

    /// Replay viewport events against the page and print each transition.
    #[command(
        about = "Replay scroll/intersection events",
        after_help = "EXAMPLES:\n\
            \x20 folio simulate resume.json --events scroll.json"
    )]
    Simulate(SimulateArgs),

    /// Initialise a Folio configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 folio init           # default location\n\
            \x20 folio init --local   # .folio.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 folio completions bash > ~/.local/share/bash-completion/completions/folio\n\
            \x20 folio completions zsh  > ~/.zfunc/_folio\n\
            \x20 folio completions fish > ~/.config/fish/completions/folio.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Folio configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 folio config get render.output_dir\n\
            \x20 folio config list"
    )]
    Config(ConfigCommands),
}

// ── render ────────────────────────────────────────────────────────────────────

/// Arguments for `folio render`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Resume record (JSON).
    #[arg(value_name = "RECORD", help = "Resume record (JSON)")]
    pub record: PathBuf,

    /// Override the output directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: render.output_dir)"
    )]
    pub output: Option<PathBuf>,

    /// Event script to replay before rendering.
    #[arg(
        long = "events",
        value_name = "FILE",
        help = "Replay an event script and render the resulting state"
    )]
    pub events: Option<PathBuf>,

    /// Overwrite an existing output file.
    #[arg(long = "force", help = "Overwrite existing output")]
    pub force: bool,

    /// Skip the overwrite prompt and fail instead.
    #[arg(short = 'y', long = "yes", help = "Never prompt")]
    pub yes: bool,

    /// Render without writing anything.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,

    /// Fail if any section is omitted or the record has problems.
    #[arg(long = "strict", help = "Treat record problems as errors")]
    pub strict: bool,

    /// Print the document instead of writing it.
    #[arg(long = "stdout", conflicts_with = "dry_run", help = "Write HTML to stdout")]
    pub stdout: bool,
}

/// A single record argument.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Resume record (JSON).
    #[arg(value_name = "RECORD", help = "Resume record (JSON)")]
    pub record: PathBuf,
}

// ── outline ───────────────────────────────────────────────────────────────────

/// Arguments for `folio outline`.
#[derive(Debug, Args)]
pub struct OutlineArgs {
    /// Resume record (JSON).
    #[arg(value_name = "RECORD", help = "Resume record (JSON)")]
    pub record: PathBuf,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ReportFormat,
}

/// Output format for reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable table.
    Table,
    /// JSON document.
    Json,
}

// ── sample ────────────────────────────────────────────────────────────────────

/// Arguments for `folio sample`.
#[derive(Debug, Args)]
pub struct SampleArgs {
    /// Destination file; stdout when omitted.
    #[arg(short = 'o', long = "output", value_name = "FILE", help = "Write to FILE")]
    pub output: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing file")]
    pub force: bool,
}

// ── simulate ──────────────────────────────────────────────────────────────────

/// Arguments for `folio simulate`.
#[derive(Debug, Args)]
pub struct SimulateArgs {
    /// Resume record (JSON).
    #[arg(value_name = "RECORD", help = "Resume record (JSON)")]
    pub record: PathBuf,

    /// Event script (JSON).
    #[arg(long = "events", value_name = "FILE", help = "Event script (JSON)")]
    pub events: PathBuf,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ReportFormat,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `folio init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.folio.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `folio completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `folio config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `render.output_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
