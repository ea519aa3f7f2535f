//! Unit tests for configuration loading and precedence

use crate::common::{assertions, CliTestRunner};
use gitexport::changelog::LineEnding;
use gitexport::config::{ExportConfig, CONFIG_FILE_NAME};
use gitexport::ExportError;
use std::fs;

fn runner_with_history() -> CliTestRunner {
    let runner = CliTestRunner::new().unwrap();
    runner.repo().write("a.txt", "one").unwrap();
    runner.repo().commit("base").unwrap();
    runner.repo().write("a.txt", "two").unwrap();
    runner.repo().commit("change").unwrap();
    runner
}

#[test]
fn test_config_file_round_trip() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config = ExportConfig {
        export_dir: "out".to_string(),
        changelog_name: "CHANGES.txt".to_string(),
        line_ending: LineEnding::Lf,
    };
    fs::write(
        temp_dir.path().join(CONFIG_FILE_NAME),
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();

    assert_eq!(ExportConfig::load(temp_dir.path()).unwrap(), config);
}

#[test]
fn test_config_file_controls_export() {
    let runner = runner_with_history();
    let root = runner.repo().root();
    fs::write(
        root.join(CONFIG_FILE_NAME),
        r#"{ "export_dir": "_export", "changelog_name": "CHANGES.txt", "line_ending": "lf" }"#,
    )
    .unwrap();

    runner.expect_success(&["diff", "HEAD~1", "HEAD"]);

    assertions::assert_file_bytes(&root.join("_export/a.txt"), b"two");
    let changelog = fs::read_to_string(root.join("_export/CHANGES.txt")).unwrap();
    assert!(changelog.starts_with("Diff from \"HEAD~1\" to \"HEAD\"\n"));
    assert!(!changelog.contains('\r'));
    assertions::assert_absent(&root.join(".export"));
}

#[test]
fn test_cli_export_dir_overrides_config_file() {
    let runner = runner_with_history();
    let root = runner.repo().root();
    fs::write(root.join(CONFIG_FILE_NAME), r#"{ "export_dir": "_export" }"#).unwrap();

    runner.expect_success(&["diff", "HEAD~1", "HEAD", "--export-dir", "from-cli"]);

    assertions::assert_file_bytes(&root.join("from-cli/a.txt"), b"two");
    assertions::assert_absent(&root.join("_export"));
}

#[test]
fn test_malformed_config_aborts_before_export() {
    let runner = runner_with_history();
    let root = runner.repo().root();
    fs::write(root.join(CONFIG_FILE_NAME), "{ \"export_dir\": 42 }").unwrap();

    let error = runner.expect_failure(&["diff", "HEAD~1", "HEAD"], true);

    assert!(matches!(error, ExportError::Config { .. }), "got: {}", error);
    assertions::assert_absent(&root.join(".export"));
}

#[test]
fn test_empty_export_dir_override_is_rejected() {
    let runner = runner_with_history();

    let error = runner.expect_failure(&["diff", "HEAD~1", "HEAD", "--export-dir", " "], true);
    assert!(matches!(error, ExportError::Config { .. }), "got: {}", error);
}
