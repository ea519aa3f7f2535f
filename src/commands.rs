//! Command implementations for gitexport CLI

use crate::cli::Commands;
use crate::config::ExportConfig;
use crate::error::Result;
use crate::export::DiffExporter;
use crate::export_dir::{AssumeYes, ConfirmPrompt, LinePrompt};
use crate::output::{JsonFormatter, PrettyPrinter};
use crate::progress::ProgressReporter;
use crate::vcs::GitRepository;
use std::path::Path;

/// Options of the `diff` command
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    pub export_dir: Option<String>,
    pub assume_yes: bool,
    pub json: bool,
    pub no_progress: bool,
}

/// Execute a command
pub fn execute_command(command: Commands, repo_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Diff {
            since,
            until,
            export_dir,
            yes,
            json,
            no_progress,
        } => {
            let options = DiffOptions {
                export_dir,
                assume_yes: yes,
                json,
                no_progress,
            };
            if options.assume_yes {
                diff_command(repo_path, &since, &until, &options, &mut AssumeYes)
            } else {
                diff_command(repo_path, &since, &until, &options, &mut LinePrompt::stdin())
            }
        }
        Commands::Version => {
            println!("{}", version_line());
            Ok(())
        }
    }
}

/// `gitexport version <pkg version>`
pub fn version_line() -> String {
    format!("{} version {}", crate::NAME, crate::VERSION)
}

/// Export the files changed between `since` and `until`
pub fn diff_command(
    repo_path: Option<&Path>,
    since: &str,
    until: &str,
    options: &DiffOptions,
    prompt: &mut dyn ConfirmPrompt,
) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let workdir = repo_path.unwrap_or(&current_dir);

    let config = ExportConfig::load(workdir)?.with_export_dir(options.export_dir.clone());
    config.validate()?;

    let client = GitRepository::new(workdir);
    let mut progress = if options.no_progress || options.json {
        ProgressReporter::new_minimal()
    } else {
        ProgressReporter::new_for_export()
    };

    if !options.json {
        PrettyPrinter::print_header(since, until);
    }

    let mut exporter = DiffExporter::new(&client, prompt, workdir, &config);
    let manifest = exporter.run(since, until, &mut progress)?;

    if options.json {
        JsonFormatter::print_manifest(&manifest)?;
    } else {
        PrettyPrinter::print_export_summary(&manifest, exporter.export_root());
    }

    Ok(())
}
