//! The repository queries the branch report needs.
//!
//! The report only talks to [`VcsAdapter`]; [`GitCli`] implements it by
//! shelling out to `git`. Tests substitute their own implementation that
//! returns canned refs and commits.

use std::path::Path;

use chrono::DateTime;
use tracing::{debug, info};

use tips_core::branch::{BranchRef, TipCommit};

use crate::commands::{GitError, Result, git_command, git_command_raw};
use crate::gitdir::is_inside_work_tree;

/// Format string for `git log`: hash, committer name, committer date and
/// subject separated by NUL bytes.
const TIP_FORMAT: &str = "--format=%H%x00%cn%x00%cd%x00%s";

const REMOTES_NAMESPACE: &str = "refs/remotes";
const HEADS_NAMESPACE: &str = "refs/heads";

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Read-only access to branch state of a working copy.
pub trait VcsAdapter {
    /// Whether `path` is inside a work tree this adapter can query.
    fn is_repository(&self, path: &Path) -> bool;

    /// Bring remote-tracking refs up to date.
    fn refresh_remotes(&self, path: &Path) -> Result<()>;

    /// Remote-tracking branches, excluding symbolic `<remote>/HEAD` refs.
    fn list_remote_branch_refs(&self, path: &Path) -> Result<Vec<BranchRef>>;

    /// Local branches.
    fn list_local_branch_refs(&self, path: &Path) -> Result<Vec<BranchRef>>;

    /// The commit `full_ref` currently points at.
    fn tip_commit(&self, path: &Path, full_ref: &str) -> Result<TipCommit>;
}

// ---------------------------------------------------------------------------
// GitCli
// ---------------------------------------------------------------------------

/// [`VcsAdapter`] backed by the `git` executable.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitCli;

impl VcsAdapter for GitCli {
    fn is_repository(&self, path: &Path) -> bool {
        is_inside_work_tree(path)
    }

    fn refresh_remotes(&self, path: &Path) -> Result<()> {
        info!("fetching all remotes");
        git_command(&["fetch", "--all", "--prune", "--tags"], path)?;
        Ok(())
    }

    fn list_remote_branch_refs(&self, path: &Path) -> Result<Vec<BranchRef>> {
        let listing = list_short_refs(path, REMOTES_NAMESPACE)?;
        Ok(parse_remote_listing(&listing))
    }

    fn list_local_branch_refs(&self, path: &Path) -> Result<Vec<BranchRef>> {
        let listing = list_short_refs(path, HEADS_NAMESPACE)?;
        Ok(parse_local_listing(&listing))
    }

    fn tip_commit(&self, path: &Path, full_ref: &str) -> Result<TipCommit> {
        let output = git_command_raw(
            &["log", "-1", TIP_FORMAT, "--date=iso-strict", full_ref, "--"],
            path,
        )?;
        parse_tip_commit(full_ref, &output)
    }
}

fn list_short_refs(path: &Path, namespace: &str) -> Result<String> {
    git_command(
        &["for-each-ref", "--format=%(refname:short)", namespace],
        path,
    )
}

// ---------------------------------------------------------------------------
// Output parsing
// ---------------------------------------------------------------------------

fn short_names(listing: &str) -> impl Iterator<Item = &str> {
    listing.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Parse `for-each-ref` short names under `refs/remotes`.
///
/// Drops the symbolic `<remote>/HEAD` entries and bare remote names (what
/// `origin/HEAD` abbreviates to on recent git), since neither has a leaf
/// branch name.
pub fn parse_remote_listing(listing: &str) -> Vec<BranchRef> {
    short_names(listing)
        .filter(|short| {
            let keep = short.contains('/') && !short.ends_with("/HEAD");
            if !keep {
                debug!(short, "skipping symbolic remote ref");
            }
            keep
        })
        .map(|short| BranchRef::new(format!("{REMOTES_NAMESPACE}/{short}"), short))
        .collect()
}

/// Parse `for-each-ref` short names under `refs/heads`.
pub fn parse_local_listing(listing: &str) -> Vec<BranchRef> {
    short_names(listing)
        .map(|short| BranchRef::new(format!("{HEADS_NAMESPACE}/{short}"), short))
        .collect()
}

/// Parse the NUL-separated output of the tip `git log` query.
///
/// # Errors
///
/// Returns [`GitError::UnexpectedOutput`] unless there are exactly four
/// fields, or [`GitError::InvalidDate`] if the date is not strict ISO 8601.
pub fn parse_tip_commit(ref_name: &str, output: &str) -> Result<TipCommit> {
    let output = output.trim_end_matches(['\n', '\r']);
    let fields: Vec<&str> = output.split('\0').collect();
    let [hash, committer, date, subject] = fields.as_slice() else {
        return Err(GitError::UnexpectedOutput {
            ref_name: ref_name.to_string(),
            output: output.to_string(),
        });
    };

    let date = DateTime::parse_from_rfc3339(date.trim()).map_err(|source| GitError::InvalidDate {
        ref_name: ref_name.to_string(),
        source,
    })?;

    Ok(TipCommit {
        hash: hash.trim().to_string(),
        committer: committer.to_string(),
        date,
        subject: subject.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
