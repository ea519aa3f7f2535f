//! Output formatting utilities

use crate::changelog::ExportManifest;
use crate::error::Result;
use std::path::Path;

/// Number of revision characters shown in the run header
const SHORT_REVISION_LEN: usize = 6;

/// Pretty printer for gitexport output
pub struct PrettyPrinter;

impl PrettyPrinter {
    /// Print the run header
    pub fn print_header(since: &str, until: &str) {
        println!(
            "Generating diff from \"{}\" to \"{}\"...",
            short_revision(since),
            short_revision(until)
        );
    }

    /// Print the final summary of a successful export
    pub fn print_export_summary(manifest: &ExportManifest, export_root: &Path) {
        println!("{}", export_summary(manifest));
        println!("└─ Export directory: {}", export_root.display());
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn print_manifest(manifest: &ExportManifest) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(manifest)?);
        Ok(())
    }
}

/// One-line summary, worded as the changelog counts
pub fn export_summary(manifest: &ExportManifest) -> String {
    format!(
        "Export done. {} commits found, {} modified file(s) and {} deleted file(s).",
        manifest.commit_count,
        manifest.modified.len(),
        manifest.deleted.len()
    )
}

/// First characters of a revision, on a char boundary
pub fn short_revision(revision: &str) -> &str {
    match revision.char_indices().nth(SHORT_REVISION_LEN) {
        Some((idx, _)) => &revision[..idx],
        None => revision,
    }
}
