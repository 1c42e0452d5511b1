//! Clap CLI definitions for the `amg` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// amg -- all my gits.
///
/// Summarizes the branch and dirty/ahead state of every git repository
/// found directly below the given directories.
#[derive(Parser, Debug)]
#[command(
    name = "amg",
    about = "Summarize the git repositories in a set of directories",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose/debug output on stderr.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// When to color the output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,
}

/// Values accepted by `--color`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    /// Color when stdout is a terminal and NO_COLOR is unset.
    Auto,
    Always,
    Never,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one status line per repository found below PATHS.
    Status(StatusArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Arguments for `amg status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Directories whose immediate children are scanned for repositories.
    #[arg(required = true, num_args = 1.., value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Run `git fetch` in every repository before reporting (default).
    #[arg(long, overrides_with = "no_fetch")]
    pub fetch: bool,

    /// Skip the fetch phase.
    #[arg(long, overrides_with = "fetch")]
    pub no_fetch: bool,

    /// Maximum concurrent fetches (0 = all at once, 1 = sequential).
    #[arg(short = 'j', long, env = "AMG_FETCH_JOBS", default_value_t = 0)]
    pub jobs: usize,

    /// Kill a fetch that takes longer than this many seconds.
    #[arg(long, env = "AMG_FETCH_TIMEOUT", value_name = "SECS")]
    pub fetch_timeout: Option<u64>,
}

impl StatusArgs {
    /// Whether the fetch phase runs. The last of `--fetch`/`--no-fetch` wins.
    pub fn should_fetch(&self) -> bool {
        self.fetch || !self.no_fetch
    }
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `amg completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
