//! Error types for gitexport operations

use crate::export_dir::display_name;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No git repository found at: {path}")]
    RepositoryNotFound { path: PathBuf },

    #[error("Missing <{name}> parameter. See \"--help\".")]
    MissingParameter { name: &'static str },

    #[error("An error occurred when getting the diff: {message}")]
    RangeResolution { message: String },

    #[error("Aborted. Please delete the \"{}\" directory before processing again.", display_name(.path))]
    DeletionDeclined { path: PathBuf },

    #[error("Aborted. The \"{}\" directory could not be deleted: {message}", display_name(.path))]
    DeletionFailed { path: PathBuf, message: String },

    #[error("Failed to read '{path}' at revision '{revision}': {message}")]
    FileRead {
        path: String,
        revision: String,
        message: String,
    },

    #[error("Failed to write '{}': {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Git operation error: {message}")]
    Git { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl ExportError {
    pub fn git(msg: impl Into<String>) -> Self {
        Self::Git {
            message: msg.into(),
        }
    }

    pub fn range_resolution(msg: impl Into<String>) -> Self {
        Self::RangeResolution {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn file_read(path: impl Into<String>, revision: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::FileRead {
            path: path.into(),
            revision: revision.into(),
            message: msg.into(),
        }
    }

    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }

    /// The human-readable message of a history-store failure, without the
    /// variant prefix added by `Display`.
    pub fn vcs_message(&self) -> String {
        match self {
            Self::Git { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<git2::Error> for ExportError {
    fn from(err: git2::Error) -> Self {
        Self::git(err.message())
    }
}
