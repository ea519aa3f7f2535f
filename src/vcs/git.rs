use super::{ChangeKind, CommitId, FileStatus, VersionControl};
use crate::error::{ExportError, Result};
use git2::{Delta, DiffFindOptions, FileMode, Oid, Repository as Git2Repo, Sort, Tree};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

/// git2-backed history store rooted at a working directory
pub struct GitRepository {
    workdir: PathBuf,
    repo: OnceCell<Git2Repo>,
}

impl GitRepository {
    /// Create a client for the repository containing `workdir`. Nothing is
    /// opened until the first query.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            repo: OnceCell::new(),
        }
    }

    fn repo(&self) -> Result<&Git2Repo> {
        if let Some(repo) = self.repo.get() {
            return Ok(repo);
        }
        let repo = Git2Repo::discover(&self.workdir)?;
        Ok(self.repo.get_or_init(|| repo))
    }

    fn resolve_commit(&self, revision: &str) -> Result<git2::Commit<'_>> {
        let object = self.repo()?.revparse_single(revision).map_err(|e| {
            ExportError::git(format!("bad revision '{}': {}", revision, e.message()))
        })?;
        Ok(object.peel_to_commit()?)
    }

    fn diff_statuses(
        &self,
        parent_tree: Option<&Tree<'_>>,
        tree: &Tree<'_>,
        statuses: &mut Vec<FileStatus>,
    ) -> Result<()> {
        let repo = self.repo()?;
        let mut diff = repo.diff_tree_to_tree(parent_tree, Some(tree), None)?;

        // Renames must surface as a single Renamed delta so they can be dropped
        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true);
        diff.find_similar(Some(&mut find_opts))?;

        for delta in diff.deltas() {
            let (kind, file) = match delta.status() {
                Delta::Added => (ChangeKind::Added, delta.new_file()),
                Delta::Modified => (ChangeKind::Modified, delta.new_file()),
                Delta::Deleted => (ChangeKind::Deleted, delta.old_file()),
                _ => continue,
            };

            // Submodule bumps point at commits of another repository
            if file.mode() == FileMode::Commit {
                log::debug!("Skipping submodule entry {:?}", file.path());
                continue;
            }

            if let Some(path) = file.path() {
                statuses.push(FileStatus::new(kind, path.to_string_lossy().into_owned()));
            }
        }

        Ok(())
    }
}

impl VersionControl for GitRepository {
    fn probe(&self) -> Result<()> {
        self.repo().map(|_| ())
    }

    fn list_commits(&self, since: &str, until: &str) -> Result<Vec<CommitId>> {
        let repo = self.repo()?;
        let until_commit = self.resolve_commit(until)?;
        let since_commit = self.resolve_commit(since)?;

        let mut walk = repo.revwalk()?;
        walk.set_sorting(Sort::TIME)?;
        walk.push(until_commit.id())?;
        walk.hide(since_commit.id())?;

        walk.map(|oid| {
            oid.map(|oid| CommitId::new(oid.to_string()))
                .map_err(ExportError::from)
        })
        .collect()
    }

    fn statuses_for_commit(&self, commit: &CommitId) -> Result<Vec<FileStatus>> {
        let repo = self.repo()?;
        let oid = Oid::from_str(commit.as_str())?;
        let commit = repo.find_commit(oid)?;
        let tree = commit.tree()?;

        let mut statuses = Vec::new();
        if commit.parent_count() == 0 {
            self.diff_statuses(None, &tree, &mut statuses)?;
        } else {
            // Merge commits are compared against every parent
            for parent in commit.parents() {
                let parent_tree = parent.tree()?;
                self.diff_statuses(Some(&parent_tree), &tree, &mut statuses)?;
            }
        }

        Ok(statuses)
    }

    fn read_file_at_revision(&self, revision: &str, path: &str) -> Result<Vec<u8>> {
        let repo = self.repo()?;
        let tree = repo.revparse_single(revision)?.peel_to_tree()?;
        let entry = tree.get_path(Path::new(path))?;
        let blob = entry.to_object(repo)?.peel_to_blob()?;
        Ok(blob.content().to_vec())
    }
}
