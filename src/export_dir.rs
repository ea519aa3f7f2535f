//! Lifecycle of the export destination directory

use crate::error::{ExportError, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use walkdir::WalkDir;

/// Yes/no confirmation source. Blocks until an answer is available.
pub trait ConfirmPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self(question))
    }
}

/// Accepts `y` or `yes` in any case, surrounding whitespace ignored.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Asks on `writer` (stderr by default, so stdout stays clean for `--json`)
/// and reads the answer as one line from `reader`
pub struct LinePrompt<R: BufRead, W: Write = io::Stderr> {
    reader: R,
    writer: W,
}

impl LinePrompt<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: BufRead, W: Write> ConfirmPrompt for LinePrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        writeln!(self.writer, "{}", question)?;
        self.writer.flush()?;

        let mut answer = String::new();
        self.reader.read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

/// Answers yes without asking (`--yes`)
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl ConfirmPrompt for AssumeYes {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        log::info!("{} yes (assumed)", question);
        Ok(true)
    }
}

/// Detects, confirms, deletes and recreates the export directory
pub struct ExportDirectoryManager<'a> {
    prompt: &'a mut dyn ConfirmPrompt,
}

impl<'a> ExportDirectoryManager<'a> {
    pub fn new(prompt: &'a mut dyn ConfirmPrompt) -> Self {
        Self { prompt }
    }

    /// On success `path` exists and is empty. A pre-existing entry is only
    /// removed after confirmation; declining leaves it untouched.
    pub fn prepare(&mut self, path: &Path) -> Result<()> {
        if path.symlink_metadata().is_ok() {
            self.remove_existing(path)?;
        }

        fs::create_dir_all(path).map_err(|e| ExportError::file_write(path, e))?;
        log::debug!("Created export directory: {}", path.display());
        Ok(())
    }

    fn remove_existing(&mut self, path: &Path) -> Result<()> {
        let entries = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .count();
        log::info!(
            "Export directory {} already exists with {} top-level entr{}",
            path.display(),
            entries,
            if entries == 1 { "y" } else { "ies" }
        );

        let question = format!(
            "The \"{}\" directory exists. Do you want to remove it ? (y/n)",
            display_name(path)
        );
        if !self.prompt.confirm(&question)? {
            return Err(ExportError::DeletionDeclined {
                path: path.to_path_buf(),
            });
        }

        let removal = if path.is_dir() && !path.is_symlink() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        if let Err(e) = &removal {
            log::warn!("Failed to remove {}: {}", path.display(), e);
        }

        if path.symlink_metadata().is_ok() {
            return Err(ExportError::DeletionFailed {
                path: path.to_path_buf(),
                message: removal
                    .err()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "path still exists after removal".to_string()),
            });
        }

        log::info!("Directory deleted: \"{}\"", path.display());
        Ok(())
    }
}

/// Last component of a path, as shown in prompts and abort messages
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
