//! Classification of changed paths across a commit sequence.
//!
//! Every path touched anywhere in the range ends up in exactly one of two
//! ordered sets. The first event seen for a path, walking the commits in the
//! order the range resolver returned them, fixes its classification; later
//! events for the same path are ignored.

use crate::error::Result;
use crate::vcs::{ChangeKind, CommitId, FileStatus, VersionControl};
use indexmap::IndexSet;
use serde::Serialize;

/// Two disjoint, insertion-ordered path sets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationSet {
    modified: IndexSet<String>,
    deleted: IndexSet<String>,
}

impl ClassificationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one event. Returns `false` when the path was already classified.
    pub fn classify(&mut self, status: &FileStatus) -> bool {
        if self.contains(&status.path) {
            return false;
        }

        match status.kind {
            ChangeKind::Deleted => self.deleted.insert(status.path.clone()),
            ChangeKind::Added | ChangeKind::Modified => self.modified.insert(status.path.clone()),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.modified.contains(path) || self.deleted.contains(path)
    }

    /// Added or modified paths, first-seen order
    pub fn modified(&self) -> &IndexSet<String> {
        &self.modified
    }

    /// Deleted paths, first-seen order
    pub fn deleted(&self) -> &IndexSet<String> {
        &self.deleted
    }

    pub fn is_empty(&self) -> bool {
        self.modified.is_empty() && self.deleted.is_empty()
    }
}

/// Walks a commit sequence and folds its file statuses into a [`ClassificationSet`]
pub struct FileStatusAggregator<'a, V: VersionControl + ?Sized> {
    client: &'a V,
}

impl<'a, V: VersionControl + ?Sized> FileStatusAggregator<'a, V> {
    pub fn new(client: &'a V) -> Self {
        Self { client }
    }

    /// Commits are queried strictly one after another in the given order.
    pub fn aggregate(&self, commits: &[CommitId]) -> Result<ClassificationSet> {
        let mut classification = ClassificationSet::new();

        for commit in commits {
            let statuses = self.client.statuses_for_commit(commit)?;
            log::debug!("Commit {}: {} file status(es)", commit, statuses.len());

            for status in &statuses {
                if !classification.classify(status) {
                    log::debug!(
                        "  {} {} ignored, already classified",
                        status.kind.as_letter(),
                        status.path
                    );
                }
            }
        }

        log::info!(
            "Classified {} modified and {} deleted path(s)",
            classification.modified().len(),
            classification.deleted().len()
        );
        Ok(classification)
    }
}
