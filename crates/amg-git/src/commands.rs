//! Git command execution wrappers.
//!
//! Provides a thin wrapper around `git` subprocess invocation so that the
//! rest of the codebase does not need to deal with `std::process::Command`
//! directly.

use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

/// How often a child with a deadline is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when running git commands.
#[derive(Debug, Error)]
pub enum GitError {
    /// The git binary could not be found or spawned.
    #[error("failed to execute git: {0}")]
    Spawn(#[from] std::io::Error),

    /// The git command exited with a non-zero status.
    #[error("git command failed (exit code {code:?}): {stderr}")]
    CommandFailed {
        /// The exit code, or `None` if the process was killed by a signal.
        code: Option<i32>,
        /// The content of stderr.
        stderr: String,
    },

    /// The git command was killed after running past its deadline.
    #[error("git command timed out after {0:?}")]
    TimedOut(Duration),
}

/// A specialized `Result` type for git operations.
pub type Result<T> = std::result::Result<T, GitError>;

// ---------------------------------------------------------------------------
// Captured output
// ---------------------------------------------------------------------------

/// Output of a git invocation that ran to completion, whatever its exit
/// status.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Raw stdout, untrimmed.
    pub stdout: String,
    /// Trimmed stderr.
    pub stderr: String,
    /// The exit code, or `None` if the process was killed by a signal.
    pub code: Option<i32>,
    success: bool,
}

impl GitOutput {
    fn from_output(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            code: output.status.code(),
            success: output.status.success(),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Turn a non-zero exit into [`GitError::CommandFailed`], returning
    /// stdout otherwise.
    pub fn check(self) -> Result<String> {
        if self.success {
            Ok(self.stdout)
        } else {
            Err(GitError::CommandFailed {
                code: self.code,
                stderr: self.stderr,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build a `git` command rooted at `cwd` that can never block on a
/// credential prompt.
pub fn git(args: &[&str], cwd: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(args)
        .current_dir(cwd)
        .env("GIT_TERMINAL_PROMPT", "0")
        .stdin(Stdio::null());
    cmd
}

/// Execute a `git` command and capture its output.
///
/// Only a failure to launch the process is an error; a non-zero exit is
/// reported through [`GitOutput`].
///
/// # Errors
///
/// Returns [`GitError::Spawn`] if `git` cannot be found or started, or if
/// `cwd` does not exist.
///
/// # Examples
///
/// ```no_run
/// use amg_git::commands::git_output;
/// use std::path::Path;
///
/// let out = git_output(&["status", "--branch", "--porcelain"], Path::new(".")).unwrap();
/// print!("{}", out.stdout);
/// ```
pub fn git_output(args: &[&str], cwd: &Path) -> Result<GitOutput> {
    let output = git(args, cwd).output()?;
    Ok(GitOutput::from_output(output))
}

/// Run a `git` command with all output discarded, killing it if it is
/// still running after `timeout`.
///
/// # Errors
///
/// Returns [`GitError::Spawn`] if the process cannot be started,
/// [`GitError::TimedOut`] if it had to be killed, or
/// [`GitError::CommandFailed`] on a non-zero exit.
pub fn git_silent_with_timeout(args: &[&str], cwd: &Path, timeout: Duration) -> Result<()> {
    let mut child = git(args, cwd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let status = wait_with_deadline(&mut child, Instant::now() + timeout)?;
    match status {
        Some(status) if status.success() => Ok(()),
        Some(status) => Err(GitError::CommandFailed {
            code: status.code(),
            stderr: String::new(),
        }),
        None => Err(GitError::TimedOut(timeout)),
    }
}

/// Wait for `child` until `deadline`. Returns `None` after killing it if the
/// deadline passed first.
fn wait_with_deadline(child: &mut Child, deadline: Instant) -> Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            // The process may exit between the check and the kill.
            let _ = child.kill();
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
