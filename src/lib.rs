//! # gitexport
//!
//! Computes the files added, modified or deleted between two revisions of a
//! git repository and materialises a clean snapshot of the changed files,
//! together with a `_changelog.txt` manifest.

pub mod cli;
pub mod error;
pub mod vcs;
pub mod probe;
pub mod range;
pub mod aggregate;
pub mod export_dir;
pub mod exporter;
pub mod changelog;
pub mod export;
pub mod config;
pub mod commands;
pub mod output;
pub mod progress;

pub use aggregate::{ClassificationSet, FileStatusAggregator};
pub use changelog::{ChangelogBuilder, ExportManifest};
pub use error::{ExportError, Result};
pub use export::{DiffExporter, ExportState};
pub use vcs::{GitRepository, MemoryHistory, VersionControl};

/// Tool name shown by `gitexport version`
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Tool version shown by `gitexport version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default export directory, relative to the working directory
pub const DEFAULT_EXPORT_DIR: &str = ".export";

/// Name of the manifest written at the export root
pub const CHANGELOG_FILE_NAME: &str = "_changelog.txt";
