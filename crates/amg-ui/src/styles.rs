//! Color styling and line rendering for amg output.
//!
//! Uses the Ayu Dark palette. Only states that need attention get color:
//! status markers and a missing branch are red, a non-default branch is
//! blue, `master`/`main` use standard text.

use std::path::Path;

use amg_core::repo::RepositoryHandle;
use amg_core::status::{BranchKind, StatusResult, branch_label, classify_branch};
use owo_colors::OwoColorize;

use crate::terminal::ColorMode;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

// ---------------------------------------------------------------------------
// Styler
// ---------------------------------------------------------------------------

/// Renders status lines, with or without ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Styler {
    color: bool,
}

impl Styler {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// A styler that never emits escape codes.
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// A styler honoring the user's color preference.
    pub fn from_mode(mode: ColorMode) -> Self {
        Self::new(mode.enabled())
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    /// Applies truecolor foreground to a string, falling back to plain text
    /// when color is off.
    fn paint(&self, s: &str, rgb: (u8, u8, u8)) -> String {
        if self.color {
            s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
        } else {
            s.to_string()
        }
    }

    /// Renders a branch name, or `None` when there is no tracking branch.
    pub fn branch(&self, branch: Option<&str>) -> String {
        self.branch_as(branch, classify_branch(branch))
    }

    fn branch_as(&self, branch: Option<&str>, kind: BranchKind) -> String {
        let label = branch_label(branch);
        if !kind.is_emphasized() {
            return label.to_string();
        }
        let rgb = if kind == BranchKind::Missing { FAIL } else { ACCENT };
        self.paint(label, rgb)
    }

    /// Renders the status markers followed by a space, or `""` when clean.
    pub fn prefix(&self, status: &StatusResult) -> String {
        let markers = status.markers();
        if markers.is_empty() {
            return String::new();
        }
        let mut out: String = markers
            .iter()
            .map(|m| self.paint(&m.to_string(), FAIL))
            .collect();
        out.push(' ');
        out
    }

    /// Renders the full summary line for one repository:
    /// `<prefix><name> (<branch>) [<parent>]`.
    pub fn status_line(
        &self,
        repo: &RepositoryHandle,
        status: &StatusResult,
        home: Option<&Path>,
    ) -> String {
        format!(
            "{}{} ({}) [{}]",
            self.prefix(status),
            repo.name(),
            self.branch_as(status.branch.as_deref(), status.branch_kind()),
            repo.parent_display(home),
        )
    }
}
