//! In-memory history store.
//!
//! Models a linear history: commits are recorded oldest to newest and a range
//! query walks from `until` back to (but excluding) `since`, newest first.
//! File contents are registered per revision name.

use super::{ChangeKind, CommitId, FileStatus, VersionControl};
use crate::error::{ExportError, Result};
use std::cell::Cell;
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct MemoryCommit {
    id: CommitId,
    /// Raw `(status letter, path)` pairs, unrecognised letters included
    changes: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub struct MemoryHistory {
    reachable: bool,
    commits: Vec<MemoryCommit>,
    files: HashMap<(String, String), Vec<u8>>,
    queries: Cell<usize>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self {
            reachable: true,
            ..Self::default()
        }
    }

    /// A history whose probe always fails
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Append a commit on top of the history. `changes` are
    /// `(status letter, path)` pairs as `git show --name-status` reports them.
    pub fn commit(mut self, id: &str, changes: &[(&str, &str)]) -> Self {
        self.commits.push(MemoryCommit {
            id: CommitId::new(id),
            changes: changes
                .iter()
                .map(|(letter, path)| (letter.to_string(), path.to_string()))
                .collect(),
        });
        self
    }

    /// Register the content of `path` as of `revision`.
    pub fn file(mut self, revision: &str, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.files
            .insert((revision.to_string(), path.to_string()), content.into());
        self
    }

    /// Number of history queries issued so far, probes excluded.
    pub fn query_count(&self) -> usize {
        self.queries.get()
    }

    fn record_query(&self) {
        self.queries.set(self.queries.get() + 1);
    }

    fn position(&self, revision: &str) -> Result<usize> {
        self.commits
            .iter()
            .position(|c| c.id.as_str() == revision)
            .ok_or_else(|| ExportError::git(format!("bad revision '{}'", revision)))
    }
}

impl VersionControl for MemoryHistory {
    fn probe(&self) -> Result<()> {
        if self.reachable {
            Ok(())
        } else {
            Err(ExportError::git("not a git repository"))
        }
    }

    fn list_commits(&self, since: &str, until: &str) -> Result<Vec<CommitId>> {
        self.record_query();
        let since_pos = self.position(since)?;
        let until_pos = self.position(until)?;

        if until_pos <= since_pos {
            return Ok(Vec::new());
        }

        Ok(self.commits[since_pos + 1..=until_pos]
            .iter()
            .rev()
            .map(|c| c.id.clone())
            .collect())
    }

    fn statuses_for_commit(&self, commit: &CommitId) -> Result<Vec<FileStatus>> {
        self.record_query();
        let pos = self.position(commit.as_str())?;

        Ok(self.commits[pos]
            .changes
            .iter()
            .filter_map(|(letter, path)| {
                ChangeKind::from_status_letter(letter).map(|kind| FileStatus::new(kind, path.clone()))
            })
            .collect())
    }

    fn read_file_at_revision(&self, revision: &str, path: &str) -> Result<Vec<u8>> {
        self.record_query();
        self.files
            .get(&(revision.to_string(), path.to_string()))
            .cloned()
            .ok_or_else(|| {
                ExportError::git(format!("path '{}' does not exist in '{}'", path, revision))
            })
    }
}
