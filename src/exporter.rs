//! Materialises modified files into the export tree

use crate::error::{ExportError, Result};
use crate::progress::ProgressReporter;
use crate::vcs::VersionControl;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Writes the `until` content of every modified path below an export root
pub struct FileExporter<'a, V: VersionControl + ?Sized> {
    client: &'a V,
    root: PathBuf,
}

impl<'a, V: VersionControl + ?Sized> FileExporter<'a, V> {
    pub fn new(client: &'a V, root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            root: root.into(),
        }
    }

    /// Export every path in order. Stops at the first failure; files written
    /// before it stay on disk.
    pub fn export_all<'p, I>(&self, paths: I, revision: &str, progress: &mut ProgressReporter) -> Result<usize>
    where
        I: IntoIterator<Item = &'p String>,
        I::IntoIter: ExactSizeIterator,
    {
        let paths = paths.into_iter();
        progress.start_export(paths.len() as u64);

        let mut written = 0;
        for path in paths {
            progress.update_export(path);
            self.export_file(path, revision)?;
            written += 1;
        }

        progress.finish_export(&format!("Exported {} file(s)", written));
        Ok(written)
    }

    /// Export one repository path, creating its parent directories first.
    pub fn export_file(&self, path: &str, revision: &str) -> Result<PathBuf> {
        let relative = checked_relative_path(path)?;
        let target = self.root.join(&relative);

        if let Some(parent) = relative.parent() {
            ensure_dirs(&self.root, parent).map_err(|e| ExportError::file_write(&target, e))?;
        }

        let content = self
            .client
            .read_file_at_revision(revision, path)
            .map_err(|e| ExportError::file_read(path, revision, e.vcs_message()))?;

        fs::write(&target, &content).map_err(|e| ExportError::file_write(&target, e))?;
        log::debug!("Exported {} ({} bytes)", path, content.len());
        Ok(target)
    }
}

/// Create each missing component of `relative` under `root`, parent first.
/// Existing components are left alone.
pub fn ensure_dirs(root: &Path, relative: &Path) -> io::Result<()> {
    let mut current = root.to_path_buf();
    for component in relative.components() {
        current.push(component);
        match fs::create_dir(&current) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && current.is_dir() => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Repository paths are `/`-separated and must stay inside the export root.
fn checked_relative_path(path: &str) -> Result<PathBuf> {
    let mut relative = PathBuf::new();
    for part in path.split('/').filter(|p| !p.is_empty()) {
        match Path::new(part).components().next() {
            Some(Component::Normal(_)) if Path::new(part).components().count() == 1 => {
                relative.push(part)
            }
            _ => {
                return Err(ExportError::file_write(
                    path,
                    io::Error::new(io::ErrorKind::InvalidInput, "path escapes the export root"),
                ))
            }
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(ExportError::file_write(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "empty path"),
        ));
    }
    Ok(relative)
}
