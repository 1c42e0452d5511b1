//! Parsing of `git status --branch --porcelain` output.
//!
//! The checks here are deliberately loose: marker tokens are searched for
//! anywhere in the text, not per line, so a file name containing `??` or
//! ` M ` will also trip them.

use std::fmt;

/// Label shown in place of a branch when no tracking branch was found.
pub const NO_BRANCH_LABEL: &str = "None";

/// Branch names that are displayed without emphasis.
pub const DEFAULT_BRANCHES: &[&str] = &["master", "main"];

const HEADER_PREFIX: &str = "## ";
const TRACKING_SEPARATOR: &str = "...";
const UNTRACKED_TOKEN: &str = "??";
const MODIFIED_TOKEN: &str = " M ";
const AHEAD_TOKEN: &str = "[ahead ";

// ---------------------------------------------------------------------------
// StatusResult
// ---------------------------------------------------------------------------

/// Summary of one repository's working tree state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusResult {
    /// Local branch with a tracking branch, or `None` when there is no
    /// `## <branch>...<upstream>` header.
    pub branch: Option<String>,
    /// Untracked files present.
    pub untracked: bool,
    /// Modified tracked files present.
    pub modified: bool,
    /// Local commits not yet pushed.
    pub ahead: bool,
}

impl StatusResult {
    /// Parse the text printed by `git status --branch --porcelain`.
    pub fn parse(porcelain: &str) -> Self {
        Self {
            branch: parse_tracking_branch(porcelain).map(str::to_string),
            untracked: porcelain.contains(UNTRACKED_TOKEN),
            modified: porcelain.contains(MODIFIED_TOKEN),
            ahead: porcelain.contains(AHEAD_TOKEN),
        }
    }

    /// Whether the repository needs attention.
    ///
    /// Repositories without a tracking branch always count as dirty.
    pub fn is_dirty(&self) -> bool {
        self.untracked || self.modified || self.branch.is_none()
    }

    /// Markers that apply to this repository, in display order.
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers = Vec::with_capacity(3);
        if self.untracked || self.branch.is_none() {
            markers.push(Marker::Untracked);
        }
        if self.modified {
            markers.push(Marker::Modified);
        }
        if self.ahead {
            markers.push(Marker::Ahead);
        }
        markers
    }

    /// The uncoloured status prefix, e.g. `"+M^ "`, or `""` for a clean
    /// repository.
    pub fn prefix(&self) -> String {
        let mut prefix: String = self.markers().iter().map(|m| m.glyph()).collect();
        if !prefix.is_empty() {
            prefix.push(' ');
        }
        prefix
    }

    /// Classification of the branch for display.
    pub fn branch_kind(&self) -> BranchKind {
        classify_branch(self.branch.as_deref())
    }
}

/// Extract the local branch from the `## <branch>...<rest>` header.
///
/// Only the first line is considered. The branch is everything before the
/// last `...` on that line and must be non-empty.
pub fn parse_tracking_branch(porcelain: &str) -> Option<&str> {
    let header = porcelain.strip_prefix(HEADER_PREFIX)?;
    let line = header.lines().next().unwrap_or(header);
    match line.rfind(TRACKING_SEPARATOR) {
        Some(end) if end > 0 => Some(&line[..end]),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// A single-character indicator in the status prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Untracked files, or no tracking branch at all.
    Untracked,
    /// Modified tracked files.
    Modified,
    /// Ahead of the tracking branch.
    Ahead,
}

impl Marker {
    pub fn glyph(self) -> char {
        match self {
            Marker::Untracked => '+',
            Marker::Modified => 'M',
            Marker::Ahead => '^',
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

// ---------------------------------------------------------------------------
// Branch classification
// ---------------------------------------------------------------------------

/// How a branch should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchKind {
    /// No tracking branch.
    Missing,
    /// `master` or `main`.
    Default,
    /// Any other branch.
    Other,
}

impl BranchKind {
    /// `Missing` and `Other` are shown with emphasis.
    pub fn is_emphasized(self) -> bool {
        !matches!(self, BranchKind::Default)
    }
}

pub fn classify_branch(branch: Option<&str>) -> BranchKind {
    match branch {
        None => BranchKind::Missing,
        Some(b) if DEFAULT_BRANCHES.contains(&b) => BranchKind::Default,
        Some(_) => BranchKind::Other,
    }
}

/// The text shown for a branch: the name itself or [`NO_BRANCH_LABEL`].
pub fn branch_label(branch: Option<&str>) -> &str {
    branch.unwrap_or(NO_BRANCH_LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_repository_on_main() {
        let status = StatusResult::parse("## main...origin/main\n");
        assert_eq!(status.branch.as_deref(), Some("main"));
        assert!(!status.is_dirty());
        assert_eq!(status.prefix(), "");
        assert_eq!(status.branch_kind(), BranchKind::Default);
    }

    #[test]
    fn missing_header_means_no_branch_and_plus() {
        let status = StatusResult::parse(" M changed.txt\n");
        assert_eq!(status.branch, None);
        assert!(status.is_dirty());
        assert_eq!(status.prefix(), "+M ");
    }

    #[test]
    fn empty_output_is_treated_as_no_branch() {
        let status = StatusResult::parse("");
        assert_eq!(status.branch, None);
        assert_eq!(status.prefix(), "+ ");
    }

    #[test]
    fn header_without_upstream_has_no_branch() {
        let status = StatusResult::parse("## main\n");
        assert_eq!(status.branch, None);
        assert_eq!(status.prefix(), "+ ");

        let status = StatusResult::parse("## No commits yet on master\n?? a.txt\n");
        assert_eq!(status.branch, None);
        assert_eq!(status.prefix(), "+ ");
    }

    #[test]
    fn untracked_file_sets_plus() {
        let status = StatusResult::parse("## main...origin/main\n?? newfile.txt\n");
        assert!(status.untracked);
        assert_eq!(status.prefix(), "+ ");
    }

    #[test]
    fn modified_file_sets_m() {
        let status = StatusResult::parse("## main...origin/main\n M changed.txt\n");
        assert!(status.modified);
        assert_eq!(status.markers(), vec![Marker::Modified]);
        assert_eq!(status.prefix(), "M ");
    }

    #[test]
    fn untracked_and_modified_order() {
        let status =
            StatusResult::parse("## main...origin/main\n M changed.txt\n?? newfile.txt\n");
        assert_eq!(status.prefix(), "+M ");
    }

    #[test]
    fn ahead_sets_caret() {
        let status = StatusResult::parse("## main...origin/main [ahead 2]\n");
        assert!(status.ahead);
        assert_eq!(status.branch.as_deref(), Some("main"));
        assert_eq!(status.prefix(), "^ ");
    }

    #[test]
    fn all_markers_combined() {
        let status = StatusResult::parse(
            "## topic...origin/topic [ahead 1, behind 3]\n M src/lib.rs\n?? notes.md\n",
        );
        assert_eq!(status.prefix(), "+M^ ");
        assert_eq!(status.branch_kind(), BranchKind::Other);
    }

    #[test]
    fn staged_only_modification_is_not_m() {
        // "M " at column zero is a staged change; only " M " counts.
        let status = StatusResult::parse("## main...origin/main\nM  staged.txt\n");
        assert!(!status.modified);
        assert_eq!(status.prefix(), "");
    }

    #[test]
    fn tracking_branch_takes_last_separator() {
        assert_eq!(
            parse_tracking_branch("## feat...x...origin/feat...x\n"),
            Some("feat...x...origin/feat")
        );
        assert_eq!(parse_tracking_branch("## a....origin/a"), Some("a."));
    }

    #[test]
    fn tracking_branch_requires_non_empty_name() {
        assert_eq!(parse_tracking_branch("## ...origin/main"), None);
        assert_eq!(parse_tracking_branch("##main...origin/main"), None);
        assert_eq!(parse_tracking_branch("x\n## main...origin/main"), None);
    }

    #[test]
    fn tracking_branch_only_reads_first_line() {
        assert_eq!(parse_tracking_branch("## main\n?? a...b\n"), None);
    }

    #[test]
    fn loose_marker_search_matches_file_names() {
        // Known limitation: tokens are matched anywhere in the output.
        let status = StatusResult::parse("## main...origin/main\nA  what??.txt\n");
        assert!(status.untracked);
    }

    #[test]
    fn classify_branches() {
        assert_eq!(classify_branch(None), BranchKind::Missing);
        assert_eq!(classify_branch(Some("master")), BranchKind::Default);
        assert_eq!(classify_branch(Some("main")), BranchKind::Default);
        assert_eq!(classify_branch(Some("develop")), BranchKind::Other);
        assert!(BranchKind::Missing.is_emphasized());
        assert!(BranchKind::Other.is_emphasized());
        assert!(!BranchKind::Default.is_emphasized());
    }

    #[test]
    fn branch_label_falls_back_to_none() {
        assert_eq!(branch_label(None), "None");
        assert_eq!(branch_label(Some("dev")), "dev");
    }
}
