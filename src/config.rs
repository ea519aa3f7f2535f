//! Export configuration
//!
//! Values come from `.gitexport.json` in the working directory when present,
//! then from command-line overrides.

use crate::changelog::LineEnding;
use crate::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = ".gitexport.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Export directory, relative to the working directory unless absolute
    pub export_dir: String,
    /// Changelog file written at the export root
    pub changelog_name: String,
    pub line_ending: LineEnding,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            export_dir: crate::DEFAULT_EXPORT_DIR.to_string(),
            changelog_name: crate::CHANGELOG_FILE_NAME.to_string(),
            line_ending: LineEnding::default(),
        }
    }
}

impl ExportConfig {
    /// Load the configuration for `workdir`. A missing file yields defaults,
    /// an unreadable or malformed one is an error.
    pub fn load(workdir: &Path) -> Result<Self> {
        let path = workdir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ExportError::config(format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply a command-line export directory override
    pub fn with_export_dir(mut self, export_dir: Option<String>) -> Self {
        if let Some(dir) = export_dir {
            self.export_dir = dir;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.export_dir.trim().is_empty() {
            return Err(ExportError::config("export_dir must not be empty"));
        }
        let export_dir = Path::new(&self.export_dir);
        if export_dir.components().any(|component| match component {
            Component::CurDir | Component::ParentDir => true,
            Component::Normal(name) => name == ".git",
            _ => false,
        }) {
            return Err(ExportError::config(format!(
                "export_dir must not contain '.', '..' or '.git' components, got '{}'",
                self.export_dir
            )));
        }
        if self.changelog_name.trim().is_empty()
            || self.changelog_name.contains('/')
            || self.changelog_name.contains('\\')
        {
            return Err(ExportError::config(format!(
                "changelog_name must be a plain file name, got '{}'",
                self.changelog_name
            )));
        }
        Ok(())
    }

    /// Absolute location of the export directory for `workdir`
    pub fn export_root(&self, workdir: &Path) -> PathBuf {
        workdir.join(&self.export_dir)
    }
}

/// Fails when `export_root` is `workdir` or one of its ancestors, since
/// preparing it would delete the working tree.
pub fn ensure_outside_workdir(export_root: &Path, workdir: &Path) -> Result<()> {
    let root = resolve(export_root)?;
    let workdir = resolve(workdir)?;
    if workdir.starts_with(&root) {
        return Err(ExportError::config(format!(
            "export directory {} would contain the working directory {}",
            root.display(),
            workdir.display()
        )));
    }
    Ok(())
}

fn resolve(path: &Path) -> Result<PathBuf> {
    if let Ok(canonical) = fs::canonicalize(path) {
        return Ok(canonical);
    }
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
