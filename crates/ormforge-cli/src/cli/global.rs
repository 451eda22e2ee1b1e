//! Flags accepted before or after any subcommand.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Show scaffolding steps on stderr; repeat for package-manager and
    /// file-level detail.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log scaffolding steps (-v), file writes (-vv), everything (-vvv)"
    )]
    pub verbose: u8,

    /// Print nothing but errors; useful when `init` runs inside scripts.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output (also set by NO_COLOR)"
    )]
    pub no_color: bool,

    /// Tool settings file. The workspace document is always
    /// `<workspace>/ormforge.yaml` and is not affected by this flag.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Tool settings file (TOML)"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How reports are printed"
    )]
    pub output_format: OutputFormat,
}

/// Report rendering; `Auto` picks `Human` on a terminal, `Plain` otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Auto,
    /// Colors and a spinner while packages install.
    Human,
    /// One line per written file, no escape codes.
    Plain,
}
