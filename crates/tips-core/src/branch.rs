//! Branch data model.
//!
//! A [`BranchRecord`] is built once per branch per report run from the
//! [`BranchRef`] the adapter enumerated and the [`TipCommit`] it resolved.
//! Records are never modified afterwards; fields are only readable through
//! accessors.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// BranchKind
// ---------------------------------------------------------------------------

/// Which report partition a branch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchKind {
    /// A remote-tracking branch (`refs/remotes/<remote>/<leaf>`).
    Remote,
    /// A local branch with no remote branch of the same leaf name.
    LocalOnly,
}

impl BranchKind {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::LocalOnly => "local_only",
        }
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Adapter-facing types
// ---------------------------------------------------------------------------

/// A branch ref as enumerated from the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    /// Fully qualified ref, e.g. `refs/remotes/origin/main`.
    pub full_ref: String,
    /// Short display name, e.g. `origin/main`.
    pub short_name: String,
}

impl BranchRef {
    pub fn new(full_ref: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            full_ref: full_ref.into(),
            short_name: short_name.into(),
        }
    }
}

/// Metadata of the commit a ref currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipCommit {
    pub hash: String,
    pub committer: String,
    pub date: DateTime<FixedOffset>,
    pub subject: String,
}

// ---------------------------------------------------------------------------
// BranchRecord
// ---------------------------------------------------------------------------

/// One line item of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRecord {
    kind: BranchKind,
    #[serde(rename = "name")]
    display_name: String,
    #[serde(rename = "ref")]
    ref_name: String,
    #[serde(rename = "hash")]
    commit_hash: String,
    committer: String,
    #[serde(rename = "date")]
    commit_date: DateTime<FixedOffset>,
    subject: String,
}

impl BranchRecord {
    /// Combine an enumerated ref with its resolved tip commit.
    pub fn new(kind: BranchKind, branch: BranchRef, tip: TipCommit) -> Self {
        Self {
            kind,
            display_name: branch.short_name,
            ref_name: branch.full_ref,
            commit_hash: tip.hash,
            committer: tip.committer,
            commit_date: tip.date,
            subject: tip.subject,
        }
    }

    pub fn kind(&self) -> BranchKind {
        self.kind
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn ref_name(&self) -> &str {
        &self.ref_name
    }

    pub fn commit_hash(&self) -> &str {
        &self.commit_hash
    }

    /// The commit hash cut to at most `len` characters.
    pub fn short_hash(&self, len: usize) -> &str {
        match self.commit_hash.char_indices().nth(len) {
            Some((idx, _)) => &self.commit_hash[..idx],
            None => &self.commit_hash,
        }
    }

    pub fn committer(&self) -> &str {
        &self.committer
    }

    pub fn commit_date(&self) -> &DateTime<FixedOffset> {
        &self.commit_date
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// Sort records newest commit first.
///
/// The sort is stable: records with equal commit instants keep their
/// enumeration order.
pub fn sort_newest_first(records: &mut [BranchRecord]) {
    records.sort_by(|a, b| b.commit_date.cmp(&a.commit_date));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
