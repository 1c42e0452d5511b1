//! `amg status` -- one summary line per repository.
//!
//! Locates repositories, optionally fetches them all, then queries and
//! prints each one in locator order.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use amg_core::repo::RepositoryHandle;
use amg_git::{FetchOptions, fetch_all, locate_repositories, query_status};
use amg_ui::styles::Styler;

use crate::cli::StatusArgs;
use crate::context::RuntimeContext;
use crate::output::emit_line;

/// Execute the `amg status` command.
pub fn run(ctx: &RuntimeContext, args: &StatusArgs) -> Result<()> {
    let repos = locate_repositories(args.paths.as_slice())?;
    debug!(count = repos.len(), "located repositories");

    if args.should_fetch() {
        fetch_all(&repos, &fetch_options(args));
    }

    report(&repos, &ctx.styler(), ctx.home.as_deref(), emit_line)
}

fn fetch_options(args: &StatusArgs) -> FetchOptions {
    FetchOptions {
        jobs: args.jobs,
        timeout: args.fetch_timeout.map(Duration::from_secs),
    }
}

/// Query each repository in order and hand its rendered line to `emit`.
///
/// Stops early, without error, when `emit` returns `false`.
fn report<F>(
    repos: &[RepositoryHandle],
    styler: &Styler,
    home: Option<&Path>,
    mut emit: F,
) -> Result<()>
where
    F: FnMut(&str) -> bool,
{
    for repo in repos {
        let path = repo.path().display();
        let status =
            query_status(repo).with_context(|| format!("failed to query status of {path}"))?;
        if !emit(&styler.status_line(repo, &status, home)) {
            debug!("stdout closed, stopping");
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::process::Command;
    use tempfile::TempDir;

    fn git(args: &[&str], cwd: &Path) {
        let status = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .status()
            .unwrap();
        assert!(status.success(), "git {args:?} failed");
    }

    fn init_repo(root: &Path, name: &str) -> RepositoryHandle {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        git(&["init", "--quiet"], &dir);
        RepositoryHandle::new(dir)
    }

    #[test]
    fn report_keeps_order_and_formats_lines() {
        let tmp = TempDir::new().unwrap();
        let b = init_repo(tmp.path(), "b");
        let a = init_repo(tmp.path(), "a");
        fs::write(a.path().join("new.txt"), "x").unwrap();

        let mut lines = Vec::new();
        report(&[b, a], &Styler::plain(), Some(tmp.path()), |l| {
            lines.push(l.to_string());
            true
        })
        .unwrap();

        assert_eq!(lines, vec!["+ b (None) [~]", "+ a (None) [~]"]);
    }

    #[test]
    fn report_stops_when_output_closes() {
        let tmp = TempDir::new().unwrap();
        let repos = vec![init_repo(tmp.path(), "a"), init_repo(tmp.path(), "b")];

        let mut calls = 0;
        report(&repos, &Styler::plain(), None, |_| {
            calls += 1;
            false
        })
        .unwrap();
        assert_eq!(calls, 1);
    }

    #[test]
    fn report_fails_when_git_cannot_start() {
        let repo = RepositoryHandle::new("/nonexistent/directory/xyz");
        let err = report(&[repo], &Styler::plain(), None, |_| true).unwrap_err();
        assert!(format!("{err:#}").contains("failed to query status"));
    }

    #[test]
    fn fetch_options_from_args() {
        let args = StatusArgs {
            paths: vec![],
            fetch: false,
            no_fetch: false,
            jobs: 3,
            fetch_timeout: Some(10),
        };
        assert_eq!(
            fetch_options(&args),
            FetchOptions {
                jobs: 3,
                timeout: Some(Duration::from_secs(10)),
            }
        );
    }
}
