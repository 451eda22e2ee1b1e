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
    name    = "ormforge",
    bin_name = "ormforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Schema-driven ORM project scaffolding",
    long_about = "ormforge completes an ORM schema document, provisions the \
                  project around it, installs the database drivers it needs, \
                  and generates the typed model and repository skeletons.",
    after_help = "EXAMPLES:\n\
        \x20 ormforge init -w shop -d postgresql --connection '$CNN_POSTGRES'\n\
        \x20 ormforge update -w shop\n\
        \x20 ormforge build -w shop --model\n\
        \x20 ormforge completions bash > /usr/share/bash-completion/completions/ormforge",
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
    /// Create or complete a workspace.
    #[command(
        about = "Create or complete a workspace",
        after_help = "EXAMPLES:\n\
            \x20 ormforge init                      # current directory, SQLjs\n\
            \x20 ormforge init -w shop -d mysql --connection '$CNN_MYSQL'\n\
            \x20 ormforge init -w shop -s reports -d postgresql --connection '$CNN_PG'"
    )]
    Init(InitArgs),

    /// Refresh a workspace from its configuration document.
    #[command(
        visible_alias = "up",
        about = "Refresh a workspace from ormforge.yaml",
        after_help = "EXAMPLES:\n\
            \x20 ormforge update\n\
            \x20 ormforge update -w shop --only-model"
    )]
    Update(UpdateArgs),

    /// Regenerate the model and repositories.
    #[command(
        visible_alias = "b",
        about = "Regenerate model and repositories",
        after_help = "EXAMPLES:\n\
            \x20 ormforge build                 # model and repositories\n\
            \x20 ormforge build --model\n\
            \x20 ormforge build --repositories"
    )]
    Build(BuildArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 ormforge completions bash > ~/.local/share/bash-completion/completions/ormforge\n\
            \x20 ormforge completions zsh  > ~/.zfunc/_ormforge\n\
            \x20 ormforge completions fish > ~/.config/fish/completions/ormforge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the tool configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 ormforge config get defaults.dialect\n\
            \x20 ormforge config list\n\
            \x20 ormforge config path"
    )]
    Config(ConfigCommands),
}

// ── workspace ─────────────────────────────────────────────────────────────────

/// Workspace selection shared by the workspace commands.
#[derive(Debug, Args)]
pub struct WorkspaceArgs {
    /// Root directory of the generated project.
    #[arg(
        short = 'w',
        long = "workspace",
        value_name = "DIR",
        default_value = ".",
        help = "Workspace directory"
    )]
    pub workspace: PathBuf,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `ormforge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Data source the dialect and connection apply to.
    #[arg(
        short = 's',
        long = "source",
        value_name = "NAME",
        help = "Data source name (default: first source, or the workspace name)"
    )]
    pub source: Option<String>,

    /// Database dialect, e.g. `mysql`, `postgresql`, `sqljs`.
    #[arg(
        short = 'd',
        long = "dialect",
        value_name = "DIALECT",
        help = "Database dialect"
    )]
    pub dialect: Option<String>,

    /// Connection string or `$ENV_VAR` reference.
    #[arg(
        long = "connection",
        value_name = "CONNECTION",
        help = "Connection string or environment variable reference"
    )]
    pub connection: Option<String>,
}

// ── update ────────────────────────────────────────────────────────────────────

/// Arguments for `ormforge update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    /// Skip provisioning and package installation.
    #[arg(long = "only-model", help = "Only regenerate the model and repositories")]
    pub only_model: bool,
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `ormforge build`.
///
/// With no target flag both artifacts are regenerated.
#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,

    #[arg(short = 'm', long = "model", help = "Regenerate the model")]
    pub model: bool,

    #[arg(short = 'r', long = "repositories", help = "Create missing repositories")]
    pub repositories: bool,

    #[arg(
        short = 'a',
        long = "all",
        conflicts_with_all = ["model", "repositories"],
        help = "Regenerate everything"
    )]
    pub all: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `ormforge completions`.
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

/// Subcommands for `ormforge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.dialect`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
