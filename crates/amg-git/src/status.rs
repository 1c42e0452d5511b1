//! Per-repository status query.

use amg_core::repo::RepositoryHandle;
use amg_core::status::StatusResult;
use tracing::{debug, warn};

use crate::commands::{Result, git_output};

const STATUS_ARGS: &[&str] = &["status", "--branch", "--porcelain"];

/// Run `git status --branch --porcelain` in `repo` and parse it.
///
/// A non-zero exit is not an error: whatever reached stdout is parsed, so
/// an empty result shows up as a repository without a branch.
///
/// # Errors
///
/// Returns [`GitError::Spawn`](crate::GitError::Spawn) if git could not be
/// started at all.
pub fn query_status(repo: &RepositoryHandle) -> Result<StatusResult> {
    let output = git_output(STATUS_ARGS, repo.path())?;
    if !output.success() {
        warn!(
            repo = %repo.path().display(),
            code = ?output.code,
            stderr = %output.stderr,
            "git status exited unsuccessfully"
        );
    }

    let status = StatusResult::parse(&output.stdout);
    debug!(
        repo = %repo.path().display(),
        dirty = status.is_dirty(),
        ?status,
        "status"
    );
    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GitError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn git_ok(args: &[&str], cwd: &Path) {
        let out = git_output(args, cwd).unwrap();
        assert!(out.success(), "git {args:?} failed: {}", out.stderr);
    }

    fn init_repo(dir: &Path) {
        git_ok(&["init", "--quiet", "--initial-branch", "main"], dir);
    }

    fn commit_all(dir: &Path) {
        git_ok(&["add", "--all"], dir);
        git_ok(
            &[
                "-c",
                "user.name=amg",
                "-c",
                "user.email=amg@example.com",
                "-c",
                "commit.gpgsign=false",
                "commit",
                "--quiet",
                "-m",
                "init",
            ],
            dir,
        );
    }

    #[test]
    fn fresh_repository_has_no_branch() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());

        let status = query_status(&RepositoryHandle::new(tmp.path())).unwrap();
        assert_eq!(status.branch, None);
        assert_eq!(status.prefix(), "+ ");
    }

    #[test]
    fn untracked_and_modified_files() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        fs::write(tmp.path().join("changed.txt"), "one\n").unwrap();
        commit_all(tmp.path());

        fs::write(tmp.path().join("changed.txt"), "two\n").unwrap();
        fs::write(tmp.path().join("newfile.txt"), "new\n").unwrap();

        let status = query_status(&RepositoryHandle::new(tmp.path())).unwrap();
        assert!(status.untracked);
        assert!(status.modified);
        assert!(!status.ahead);
        assert_eq!(status.prefix(), "+M ");
    }

    #[test]
    fn tracking_branch_and_ahead() {
        let tmp = TempDir::new().unwrap();
        let upstream = tmp.path().join("upstream");
        let clone = tmp.path().join("clone");
        fs::create_dir(&upstream).unwrap();
        init_repo(&upstream);
        fs::write(upstream.join("README"), "hi\n").unwrap();
        commit_all(&upstream);

        git_ok(
            &[
                "clone",
                "--quiet",
                upstream.to_str().unwrap(),
                clone.to_str().unwrap(),
            ],
            tmp.path(),
        );
        let repo = RepositoryHandle::new(&clone);

        let status = query_status(&repo).unwrap();
        assert_eq!(status.branch.as_deref(), Some("main"));
        assert_eq!(status.prefix(), "");

        fs::write(clone.join("README"), "changed\n").unwrap();
        commit_all(&clone);

        let status = query_status(&repo).unwrap();
        assert!(status.ahead);
        assert_eq!(status.prefix(), "^ ");
    }

    #[test]
    fn missing_directory_is_a_spawn_error() {
        let repo = RepositoryHandle::new("/nonexistent/directory/xyz");
        assert!(matches!(query_status(&repo), Err(GitError::Spawn(_))));
    }
}
