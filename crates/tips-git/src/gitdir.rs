//! Work tree detection.
//!
//! Asks git itself whether a directory is inside a work tree and where that
//! work tree's root is, so worktrees and submodules are handled the way git
//! sees them.

use crate::commands::git_command;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Returns `true` if `git rev-parse --is-inside-work-tree` prints `true`.
///
/// Any failure (git missing, not a repository, bare repository) yields
/// `false`.
pub fn is_inside_work_tree(path: &Path) -> bool {
    matches!(
        git_command(&["rev-parse", "--is-inside-work-tree"], path).as_deref(),
        Ok("true")
    )
}

/// Get the work tree root using `git rev-parse --show-toplevel`.
///
/// Returns `None` if `git` is not available or the path is not in a repo.
pub fn get_git_root_via_command(cwd: &Path) -> Option<PathBuf> {
    match git_command(&["rev-parse", "--show-toplevel"], cwd) {
        Ok(output) if !output.is_empty() => Some(PathBuf::from(normalize_git_path(&output))),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Normalize git paths for Windows compatibility.
///
/// Git on Windows may return MSYS-style paths like `/c/Users/...` or forward-
/// slash paths like `C:/Users/...`. This function converts them to native
/// format.
fn normalize_git_path(path: &str) -> String {
    if std::path::MAIN_SEPARATOR != '\\' {
        return path.to_string();
    }

    let path = path.trim();

    // /c/Users/... -> C:\Users\...
    if path.len() >= 3
        && path.as_bytes()[0] == b'/'
        && path.as_bytes()[2] == b'/'
        && path.as_bytes()[1].is_ascii_alphabetic()
    {
        let drive = path.as_bytes()[1].to_ascii_uppercase() as char;
        let rest = &path[2..];
        return format!("{drive}:{}", rest.replace('/', "\\"));
    }

    path.replace('/', "\\")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
