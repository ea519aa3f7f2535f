//! Commit range resolution

use crate::error::{ExportError, Result};
use crate::vcs::{CommitId, VersionControl};

/// Expands a `since..until` pair into the commits it covers
pub struct CommitRangeResolver<'a, V: VersionControl + ?Sized> {
    client: &'a V,
}

impl<'a, V: VersionControl + ?Sized> CommitRangeResolver<'a, V> {
    pub fn new(client: &'a V) -> Self {
        Self { client }
    }

    /// Both revisions are checked before the history store is queried. The
    /// returned order is the store's order and must not be re-sorted: the
    /// aggregator's first-wins rule depends on it.
    pub fn resolve(&self, since: &str, until: &str) -> Result<Vec<CommitId>> {
        if since.is_empty() {
            return Err(ExportError::MissingParameter { name: "since" });
        }
        if until.is_empty() {
            return Err(ExportError::MissingParameter { name: "until" });
        }

        let commits = self
            .client
            .list_commits(since, until)
            .map_err(|e| ExportError::range_resolution(e.vcs_message()))?;

        log::info!("Resolved {}..{} to {} commit(s)", since, until, commits.len());
        Ok(commits)
    }
}
