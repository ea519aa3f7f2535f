//! Read-only access to the version-control history store.
//!
//! The export pipeline only ever needs four queries from the history store.
//! They are collected in the [`VersionControl`] trait so the classification
//! and export logic can run against either a real repository
//! ([`GitRepository`]) or an in-memory history ([`MemoryHistory`]).

mod git;
pub mod memory;

pub use git::GitRepository;
pub use memory::MemoryHistory;

use crate::error::Result;
use std::fmt;

/// Opaque identifier of a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of change a commit applied to a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl ChangeKind {
    /// Parse a `--name-status` style letter. Anything other than `A`, `M`
    /// or `D` (renames, copies, type changes) yields `None`.
    pub fn from_status_letter(letter: &str) -> Option<Self> {
        match letter {
            "A" => Some(Self::Added),
            "M" => Some(Self::Modified),
            "D" => Some(Self::Deleted),
            _ => None,
        }
    }

    pub fn as_letter(&self) -> &'static str {
        match self {
            ChangeKind::Added => "A",
            ChangeKind::Modified => "M",
            ChangeKind::Deleted => "D",
        }
    }
}

/// A path touched by a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub kind: ChangeKind,
    pub path: String,
}

impl FileStatus {
    pub fn new(kind: ChangeKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Synchronous, read-only queries against a history store.
///
/// Implementations never retry; every error carries the store's own message.
pub trait VersionControl {
    /// Succeeds iff a history store is reachable from the working location.
    fn probe(&self) -> Result<()>;

    /// Commits reachable from `until` but not from `since`, merges included,
    /// in the order the store reports them.
    fn list_commits(&self, since: &str, until: &str) -> Result<Vec<CommitId>>;

    /// Added, modified and deleted paths of `commit` relative to its parent(s).
    fn statuses_for_commit(&self, commit: &CommitId) -> Result<Vec<FileStatus>>;

    /// Exact bytes of `path` as of `revision`.
    fn read_file_at_revision(&self, revision: &str, path: &str) -> Result<Vec<u8>>;
}
