//! Running `git` as a subprocess.
//!
//! Every query the report makes goes through [`git_command`], which owns
//! process spawning, exit status checks, and capturing what git printed.

use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors from invoking git or reading its output.
#[derive(Debug, Error)]
pub enum GitError {
    /// `git` is not installed, or the working directory does not exist.
    #[error("failed to execute git: {0}")]
    SpawnError(#[from] std::io::Error),

    /// Git ran and exited non-zero. Both output streams are kept because a
    /// failed fetch is reported to the user verbatim.
    #[error(
        "git command failed (exit code {code:?}):\n  {command}\n\nSTDOUT:\n{stdout}\n\nSTDERR:\n{stderr}"
    )]
    CommandFailed {
        /// Rendered command line, `git -C <dir> <args...>`.
        command: String,
        /// `None` when git was killed by a signal.
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// Git succeeded but printed something we could not interpret.
    #[error("unexpected git output for {ref_name}: {output:?}")]
    UnexpectedOutput {
        /// The ref being queried.
        ref_name: String,
        /// The raw output.
        output: String,
    },

    /// A commit date could not be parsed.
    #[error("invalid commit date for {ref_name}: {source}")]
    InvalidDate {
        /// The ref being queried.
        ref_name: String,
        /// The underlying parse failure.
        source: chrono::ParseError,
    },
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, GitError>;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run `git <args>` in `cwd` and return its stdout with surrounding
/// whitespace removed.
///
/// Git is never allowed to prompt for credentials; a remote that needs them
/// fails instead of hanging the report.
///
/// # Errors
///
/// [`GitError::SpawnError`] if the process cannot be started,
/// [`GitError::CommandFailed`] on a non-zero exit.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use tips_git::commands::git_command;
///
/// let head = git_command(&["rev-parse", "HEAD"], Path::new(".")).unwrap();
/// assert_eq!(head.len(), 40);
/// ```
pub fn git_command(args: &[&str], cwd: &Path) -> Result<String> {
    git_command_raw(args, cwd).map(|stdout| stdout.trim().to_string())
}

/// Like [`git_command`], but stdout is returned exactly as git printed it.
///
/// Use this when whitespace at either end is part of the data, e.g. a
/// commit subject that is the last field of a `--format` line.
///
/// # Errors
///
/// Same as [`git_command`].
pub fn git_command_raw(args: &[&str], cwd: &Path) -> Result<String> {
    debug!(cwd = %cwd.display(), ?args, "running git");
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()?;

    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let text = |bytes: &[u8]| String::from_utf8_lossy(bytes).trim().to_string();
    Err(GitError::CommandFailed {
        command: display_command(args, cwd),
        code: output.status.code(),
        stdout: text(&output.stdout),
        stderr: text(&output.stderr),
    })
}

/// `git -C <cwd> <args...>`, for error messages.
fn display_command(args: &[&str], cwd: &Path) -> String {
    let mut parts = vec!["git".to_string(), "-C".to_string(), cwd.display().to_string()];
    parts.extend(args.iter().map(|a| a.to_string()));
    parts.join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
