//! Command-line interface for gitexport

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitexport")]
#[command(about = "Export the files changed between two git revisions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Run against this working directory instead of the current one
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export files changed between two revisions
    #[command(visible_alias = "export")]
    Diff {
        /// Revision the range starts after (hash, tag, branch, HEAD~n...)
        since: String,

        /// Revision the range ends at; exported content is taken from here
        until: String,

        /// Export directory name, relative to the working directory
        #[arg(long)]
        export_dir: Option<String>,

        /// Remove an existing export directory without asking
        #[arg(short, long)]
        yes: bool,

        /// Print the manifest as JSON when done
        #[arg(long)]
        json: bool,

        /// Disable progress bars
        #[arg(long)]
        no_progress: bool,
    },

    /// Print name and version
    Version,
}
