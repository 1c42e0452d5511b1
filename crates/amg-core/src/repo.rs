//! Repository handles produced by the locator.
//!
//! A [`RepositoryHandle`] is nothing more than the absolute path of a
//! directory known to contain a `.git` marker, plus a couple of derived
//! display values. Handles live for a single run.

use std::path::{Path, PathBuf};

/// The marker entry that identifies a git working tree.
///
/// Can be a directory (regular clone) or a file (worktree, submodule).
pub const GIT_MARKER: &str = ".git";

/// A directory confirmed to contain a [`GIT_MARKER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    path: PathBuf,
}

impl RepositoryHandle {
    /// Wrap a repository path. The locator always passes an absolute path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The repository's working tree directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path segment, used as the display name.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Parent directory as a display string, with the home directory
    /// abbreviated to `~`.
    ///
    /// Every occurrence of the home path string is replaced, not only a
    /// leading one.
    pub fn parent_display(&self, home: Option<&Path>) -> String {
        let parent = self
            .path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        abbreviate_home(&parent, home)
    }
}

/// Replace the home directory in `path` with `~`.
///
/// Trailing separators on `home` are ignored, except for a bare root.
/// Returns `path` unchanged when `home` is `None` or empty.
pub fn abbreviate_home(path: &str, home: Option<&Path>) -> String {
    let Some(home) = home.map(|h| h.display().to_string()) else {
        return path.to_string();
    };
    if home.is_empty() {
        return path.to_string();
    }
    let trimmed = home.trim_end_matches(std::path::is_separator);
    let home = if trimmed.is_empty() { &home[..1] } else { trimmed };
    path.replace(home, "~")
}

/// Get the user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
