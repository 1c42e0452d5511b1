//! Best-effort `git fetch` across many repositories.
//!
//! Fetches are fire-and-forget: failures are logged and otherwise dropped,
//! and the status query that follows simply sees whatever refs the
//! repository had before.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use amg_core::repo::RepositoryHandle;
use tracing::{debug, warn};

use crate::commands::{Result, git_output, git_silent_with_timeout};

const FETCH_ARGS: &[&str] = &["fetch", "--quiet"];

/// How the fetch phase runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum concurrent fetches. `0` runs one fetch per repository at
    /// once, `1` runs them sequentially.
    pub jobs: usize,
    /// Kill a fetch that runs longer than this. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    /// Number of worker threads to use for `repos` repositories.
    pub fn worker_count(&self, repos: usize) -> usize {
        match self.jobs {
            0 => repos,
            jobs => jobs.min(repos),
        }
    }
}

/// Fetch a single repository quietly.
///
/// # Errors
///
/// Returns the [`GitError`](crate::GitError) describing why the fetch did
/// not succeed. Callers in this crate only log it.
pub fn fetch_repository(repo: &RepositoryHandle, timeout: Option<Duration>) -> Result<()> {
    match timeout {
        Some(timeout) => git_silent_with_timeout(FETCH_ARGS, repo.path(), timeout),
        None => git_output(FETCH_ARGS, repo.path())?.check().map(|_| ()),
    }
}

/// Fetch every repository and wait for all of them.
///
/// Nothing is returned: a fetch that fails leaves the repository as it was.
pub fn fetch_all(repos: &[RepositoryHandle], options: &FetchOptions) {
    let workers = options.worker_count(repos.len());
    debug!(repos = repos.len(), workers, "fetching");

    if workers <= 1 {
        for repo in repos {
            fetch_logged(repo, options.timeout);
        }
        return;
    }

    let cursor = AtomicUsize::new(0);
    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                while let Some(repo) = repos.get(cursor.fetch_add(1, Ordering::Relaxed)) {
                    fetch_logged(repo, options.timeout);
                }
            });
        }
    });
}

fn fetch_logged(repo: &RepositoryHandle, timeout: Option<Duration>) {
    match fetch_repository(repo, timeout) {
        Ok(()) => debug!(repo = %repo.path().display(), "fetched"),
        Err(e) => warn!(repo = %repo.path().display(), error = %e, "fetch failed"),
    }
}
