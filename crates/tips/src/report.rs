//! Branch report collection and rendering.
//!
//! [`collect_report`] queries a [`VcsAdapter`] for every remote branch and
//! every local-only branch and builds the two sorted partitions.
//! [`render_report`] turns them into display lines through the
//! piece-aware wrapper.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use tips_core::branch::{BranchKind, BranchRecord, BranchRef, sort_newest_first};
use tips_core::classify::local_only_branches;
use tips_core::datefmt::{TimestampFormat, format_timestamp};
use tips_git::adapter::VcsAdapter;
use tips_git::commands::GitError;
use tips_ui::styles::{Style, Styler};
use tips_ui::wrap::wrap_pieces;

const REMOTE_LABEL: &str = "Remote branches";
const LOCAL_ONLY_LABEL: &str = "Local branches (no corresponding remote)";
const NONE_PLACEHOLDER: &str = "(none)";
const FIRST_INDENT: &str = "  ";
const NEXT_INDENT: &str = "    ";
const SEPARATOR: &str = "  ";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures that end the run with a specific exit code.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The directory is not inside a git work tree, or git is unusable.
    #[error("not a git repository (or git not available): {}", .0.display())]
    NotARepository(PathBuf),

    /// Fetching remotes failed.
    #[error("failed to fetch remotes")]
    Refresh(#[source] GitError),
}

impl ReportError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotARepository(_) => 1,
            Self::Refresh(_) => 2,
        }
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// The two report partitions, each sorted newest first.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub remote: Vec<BranchRecord>,
    pub local_only: Vec<BranchRecord>,
}

/// Query `adapter` for everything the report shows.
///
/// Refs whose tip commit cannot be read are left out; every other failure
/// aborts.
///
/// # Errors
///
/// Returns [`ReportError::NotARepository`] or [`ReportError::Refresh`]
/// (inside the `anyhow` error) for the precondition and fetch failures,
/// and a plain error if the branch lists cannot be read.
pub fn collect_report(adapter: &dyn VcsAdapter, repo: &Path, fetch: bool) -> Result<Report> {
    if !adapter.is_repository(repo) {
        return Err(ReportError::NotARepository(repo.to_path_buf()).into());
    }

    if fetch {
        adapter.refresh_remotes(repo).map_err(ReportError::Refresh)?;
    }

    let remote_refs = adapter
        .list_remote_branch_refs(repo)
        .context("listing remote branches")?;
    let local_refs = adapter
        .list_local_branch_refs(repo)
        .context("listing local branches")?;

    let local_only_refs: Vec<BranchRef> = {
        let keep: HashSet<&str> = local_only_branches(
            remote_refs.iter().map(|r| r.short_name.as_str()),
            local_refs.iter().map(|r| r.short_name.as_str()),
        )
        .into_iter()
        .collect();
        local_refs
            .iter()
            .filter(|r| keep.contains(r.short_name.as_str()))
            .cloned()
            .collect()
    };
    info!(
        remote = remote_refs.len(),
        local = local_refs.len(),
        local_only = local_only_refs.len(),
        "branches enumerated"
    );

    let mut report = Report {
        remote: resolve_records(adapter, repo, BranchKind::Remote, remote_refs),
        local_only: resolve_records(adapter, repo, BranchKind::LocalOnly, local_only_refs),
    };
    sort_newest_first(&mut report.remote);
    sort_newest_first(&mut report.local_only);
    Ok(report)
}

fn resolve_records(
    adapter: &dyn VcsAdapter,
    repo: &Path,
    kind: BranchKind,
    refs: Vec<BranchRef>,
) -> Vec<BranchRecord> {
    refs.into_iter()
        .filter_map(|branch| match adapter.tip_commit(repo, &branch.full_ref) {
            Ok(tip) => Some(BranchRecord::new(kind, branch, tip)),
            Err(err) => {
                debug!(ref_name = %branch.full_ref, %err, "skipping ref without readable tip");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Layout settings for [`render_report`].
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: usize,
    pub timestamp_format: TimestampFormat,
    pub hash_length: usize,
}

/// Render the full text report: title, rule, and both sections.
pub fn render_report(
    report: &Report,
    repo_name: &str,
    options: &RenderOptions,
    styler: &dyn Styler,
) -> Vec<String> {
    let title = format!("Latest commits per branch in {repo_name}");
    let rule_len = options.width.min(title.chars().count().max(10));

    let mut lines = vec![
        styler.paint(&title, Style::HEADER),
        styler.paint(&"-".repeat(rule_len), Style::RULE),
        String::new(),
    ];
    lines.extend(render_section(REMOTE_LABEL, &report.remote, options, styler));
    lines.extend(render_section(LOCAL_ONLY_LABEL, &report.local_only, options, styler));
    lines
}

/// Render one labeled section followed by a blank line. An empty section
/// shows a `(none)` placeholder.
pub fn render_section(
    label: &str,
    records: &[BranchRecord],
    options: &RenderOptions,
    styler: &dyn Styler,
) -> Vec<String> {
    let mut lines = vec![styler.paint(label, Style::HEADER)];
    if records.is_empty() {
        lines.push(format!(
            "{FIRST_INDENT}{}",
            styler.paint(NONE_PLACEHOLDER, Style::PLACEHOLDER)
        ));
    }
    for record in records {
        lines.extend(wrap_pieces(
            record_pieces(record, options, styler),
            options.width,
            FIRST_INDENT,
            NEXT_INDENT,
        ));
    }
    lines.push(String::new());
    lines
}

/// The display tokens of one record, separators included.
fn record_pieces(record: &BranchRecord, options: &RenderOptions, styler: &dyn Styler) -> Vec<String> {
    let date = format_timestamp(record.commit_date(), options.timestamp_format);
    vec![
        styler.paint(record.display_name(), Style::BRANCH),
        SEPARATOR.to_string(),
        styler.paint(record.short_hash(options.hash_length), Style::HASH),
        SEPARATOR.to_string(),
        styler.paint(&date, Style::DATE),
        SEPARATOR.to_string(),
        styler.paint(record.committer(), Style::COMMITTER),
        SEPARATOR.to_string(),
        styler.paint(record.subject(), Style::SUBJECT),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
