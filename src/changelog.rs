//! Export manifest and its text rendering

use crate::aggregate::ClassificationSet;
use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Width of the separator lines
pub const SEPARATOR_WIDTH: usize = 40;

/// Line terminator used in the changelog file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Crlf,
    Lf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Summary of one export run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportManifest {
    pub since: String,
    pub until: String,
    pub commit_count: usize,
    pub modified: Vec<String>,
    pub deleted: Vec<String>,
}

impl ExportManifest {
    pub fn new(since: &str, until: &str, commit_count: usize, classification: &ClassificationSet) -> Self {
        Self {
            since: since.to_string(),
            until: until.to_string(),
            commit_count,
            modified: classification.modified().iter().cloned().collect(),
            deleted: classification.deleted().iter().cloned().collect(),
        }
    }
}

/// Renders an [`ExportManifest`] as the `_changelog.txt` text
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangelogBuilder {
    line_ending: LineEnding,
}

impl ChangelogBuilder {
    pub fn new(line_ending: LineEnding) -> Self {
        Self { line_ending }
    }

    pub fn build(&self, manifest: &ExportManifest) -> String {
        let eol = self.line_ending.as_str();
        let separator = "-".repeat(SEPARATOR_WIDTH);

        // Each path list is a single block, so an empty list leaves a blank line
        let lines = [
            format!("Diff from \"{}\" to \"{}\"", manifest.since, manifest.until),
            separator.clone(),
            format!("{} commits", manifest.commit_count),
            format!("{} modified file(s)", manifest.modified.len()),
            format!("{} deleted file(s)", manifest.deleted.len()),
            separator.clone(),
            "Modified files:".to_string(),
            manifest.modified.join(eol),
            separator,
            "Deleted files:".to_string(),
            manifest.deleted.join(eol),
        ];

        lines.join(eol)
    }

    /// Render and write the changelog in one go
    pub fn write(&self, manifest: &ExportManifest, path: &Path) -> Result<()> {
        fs::write(path, self.build(manifest)).map_err(|e| ExportError::file_write(path, e))?;
        log::info!("Wrote changelog: {}", path.display());
        Ok(())
    }
}
