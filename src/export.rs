//! The diff-to-export pipeline.
//!
//! [`DiffExporter`] runs the steps strictly in sequence and records how far
//! it got in an [`ExportState`]:
//!
//! ```text
//! Init -> RepoChecked -> RangeResolved -> Classified
//!      -> DirPrepared -> FilesExported -> ManifestWritten
//! ```
//!
//! Any failure moves the machine to `Aborted` and skips every later step.
//! Nothing already written is rolled back.

use crate::aggregate::FileStatusAggregator;
use crate::changelog::{ChangelogBuilder, ExportManifest};
use crate::config::{ensure_outside_workdir, ExportConfig};
use crate::error::{ExportError, Result};
use crate::export_dir::{ConfirmPrompt, ExportDirectoryManager};
use crate::exporter::FileExporter;
use crate::probe::RepositoryProbe;
use crate::progress::ProgressReporter;
use crate::range::CommitRangeResolver;
use crate::vcs::VersionControl;
use std::path::{Path, PathBuf};

/// Progress of a single export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportState {
    Init,
    RepoChecked,
    RangeResolved,
    Classified,
    DirPrepared,
    FilesExported,
    ManifestWritten,
    Aborted(String),
}

impl ExportState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExportState::ManifestWritten | ExportState::Aborted(_))
    }
}

/// Orchestrates one export run
pub struct DiffExporter<'a, V: VersionControl + ?Sized> {
    client: &'a V,
    prompt: &'a mut dyn ConfirmPrompt,
    workdir: PathBuf,
    export_root: PathBuf,
    changelog_name: String,
    changelog: ChangelogBuilder,
    state: ExportState,
}

impl<'a, V: VersionControl + ?Sized> DiffExporter<'a, V> {
    pub fn new(
        client: &'a V,
        prompt: &'a mut dyn ConfirmPrompt,
        workdir: &Path,
        config: &ExportConfig,
    ) -> Self {
        Self {
            client,
            prompt,
            workdir: workdir.to_path_buf(),
            export_root: config.export_root(workdir),
            changelog_name: config.changelog_name.clone(),
            changelog: ChangelogBuilder::new(config.line_ending),
            state: ExportState::Init,
        }
    }

    pub fn state(&self) -> &ExportState {
        &self.state
    }

    pub fn export_root(&self) -> &Path {
        &self.export_root
    }

    /// Run the whole pipeline once. A second call is rejected.
    pub fn run(
        &mut self,
        since: &str,
        until: &str,
        progress: &mut ProgressReporter,
    ) -> Result<ExportManifest> {
        if self.state != ExportState::Init {
            return Err(ExportError::invalid_input(format!(
                "export already ran (state: {:?})",
                self.state
            )));
        }

        match self.run_steps(since, until, progress) {
            Ok(manifest) => Ok(manifest),
            Err(e) => {
                log::debug!("Export aborted in state {:?}: {}", self.state, e);
                self.state = ExportState::Aborted(e.to_string());
                Err(e)
            }
        }
    }

    fn advance(&mut self, next: ExportState) {
        log::debug!("Export state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn run_steps(
        &mut self,
        since: &str,
        until: &str,
        progress: &mut ProgressReporter,
    ) -> Result<ExportManifest> {
        ensure_outside_workdir(&self.export_root, &self.workdir)?;

        if !RepositoryProbe::new(self.client).exists() {
            return Err(ExportError::RepositoryNotFound {
                path: self.workdir.clone(),
            });
        }
        self.advance(ExportState::RepoChecked);

        let commits = CommitRangeResolver::new(self.client).resolve(since, until)?;
        self.advance(ExportState::RangeResolved);

        progress.start_scan(commits.len());
        let classification = FileStatusAggregator::new(self.client).aggregate(&commits)?;
        progress.finish_scan(&format!("Scanned {} commit(s)", commits.len()));
        self.advance(ExportState::Classified);

        ExportDirectoryManager::new(&mut *self.prompt).prepare(&self.export_root)?;
        self.advance(ExportState::DirPrepared);

        FileExporter::new(self.client, &self.export_root).export_all(
            classification.modified(),
            until,
            progress,
        )?;
        self.advance(ExportState::FilesExported);

        let manifest = ExportManifest::new(since, until, commits.len(), &classification);
        self.changelog
            .write(&manifest, &self.export_root.join(&self.changelog_name))?;
        self.advance(ExportState::ManifestWritten);

        log::info!(
            "Export of {}..{} written to {}",
            since,
            until,
            self.export_root.display()
        );
        Ok(manifest)
    }
}
