//! Repository discovery.
//!
//! Lists the immediate children of each root directory and keeps those that
//! carry a `.git` marker. The search is one level deep and never descends
//! into a matched repository.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use amg_core::repo::{GIT_MARKER, RepositoryHandle};
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while locating repositories.
#[derive(Debug, Error)]
pub enum LocateError {
    /// A root path does not exist or is not a directory.
    #[error("invalid path '{}': {reason}", path.display())]
    InvalidArgument {
        /// The offending root path.
        path: PathBuf,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A root directory could not be listed.
    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDir {
        /// The directory being listed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// None of the roots has a child containing a `.git` marker.
    #[error("No git repositories were located.")]
    NoRepositoriesFound,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Check that `path` exists and is a directory.
///
/// # Errors
///
/// Returns [`LocateError::InvalidArgument`] naming the path otherwise.
pub fn validate_root(path: &Path) -> Result<(), LocateError> {
    let reason = match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => "not a directory",
        Err(_) => "does not exist",
    };
    Err(LocateError::InvalidArgument {
        path: path.to_path_buf(),
        reason,
    })
}

/// Returns `true` if `dir` contains a `.git` directory or gitfile.
pub fn is_repository(dir: &Path) -> bool {
    dir.join(GIT_MARKER).exists()
}

/// Find the repositories directly below each of `roots`.
///
/// All roots are validated before any of them is listed. The result keeps
/// directory-enumeration order within a root and argument order across
/// roots.
///
/// # Errors
///
/// - [`LocateError::InvalidArgument`] if a root is missing or not a directory.
/// - [`LocateError::ReadDir`] if a root cannot be listed.
/// - [`LocateError::NoRepositoriesFound`] if nothing matched.
///
/// # Examples
///
/// ```no_run
/// use amg_git::discover::locate_repositories;
/// use std::path::PathBuf;
///
/// let repos = locate_repositories(&[PathBuf::from("/home/me/src")]).unwrap();
/// for repo in &repos {
///     println!("{}", repo.name());
/// }
/// ```
pub fn locate_repositories<P: AsRef<Path>>(
    roots: &[P],
) -> Result<Vec<RepositoryHandle>, LocateError> {
    for root in roots {
        validate_root(root.as_ref())?;
    }

    let mut repos = Vec::new();
    for root in roots {
        let found = scan_root(root.as_ref())?;
        debug!(root = %root.as_ref().display(), count = found.len(), "scanned root");
        repos.extend(found);
    }

    if repos.is_empty() {
        return Err(LocateError::NoRepositoriesFound);
    }
    Ok(repos)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn scan_root(root: &Path) -> Result<Vec<RepositoryHandle>, LocateError> {
    let read_err = |source| LocateError::ReadDir {
        path: root.to_path_buf(),
        source,
    };
    let root = std::path::absolute(root).map_err(read_err)?;
    let entries = fs::read_dir(&root).map_err(read_err)?;

    let mut repos = Vec::new();
    for entry in entries {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if path.is_dir() && is_repository(&path) {
            repos.push(RepositoryHandle::new(path));
        }
    }
    Ok(repos)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
