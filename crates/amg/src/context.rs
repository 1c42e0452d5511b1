//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs beyond its own
//! arguments: resolved global flags and the home directory used to shorten
//! displayed paths.

use std::path::PathBuf;

use amg_core::repo::home_dir;
use amg_ui::styles::Styler;
use amg_ui::terminal::ColorMode;

use crate::cli::{ColorChoice, GlobalArgs};

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Verbose output.
    pub verbose: bool,

    /// Resolved color preference.
    pub color: ColorMode,

    /// Home directory, abbreviated to `~` in output.
    pub home: Option<PathBuf>,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    pub fn from_global_args(global: &GlobalArgs) -> Self {
        Self {
            verbose: global.verbose,
            color: color_mode(global.color),
            home: home_dir(),
        }
    }

    /// The styler for stdout output.
    pub fn styler(&self) -> Styler {
        Styler::from_mode(self.color)
    }
}

fn color_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}
