//! Integration tests for the git2-backed history client

use crate::common::TestRepo;
use gitexport::vcs::{ChangeKind, CommitId, FileStatus};
use gitexport::{ExportError, GitRepository, VersionControl};

#[test]
fn test_probe_in_repository_subdirectory() {
    let repo = TestRepo::new().unwrap();
    repo.write("nested/dir/file.txt", "x").unwrap();
    repo.commit("init").unwrap();

    let client = GitRepository::new(repo.root().join("nested/dir"));
    assert!(client.probe().is_ok());
}

#[test]
fn test_commits_are_newest_first() {
    let repo = TestRepo::new().unwrap();
    repo.write("a", "1").unwrap();
    let base = repo.commit("c0").unwrap();

    let mut expected = Vec::new();
    for i in 1..=4 {
        repo.write("a", i.to_string()).unwrap();
        expected.push(CommitId::new(repo.commit(&format!("c{}", i)).unwrap()));
    }
    expected.reverse();

    let client = GitRepository::new(repo.root());
    assert_eq!(client.list_commits(&base, "HEAD").unwrap(), expected);
}

#[test]
fn test_unknown_revision_reports_store_message() {
    let repo = TestRepo::new().unwrap();
    repo.write("a", "1").unwrap();
    repo.commit("c0").unwrap();

    let client = GitRepository::new(repo.root());
    let err = client.list_commits("does-not-exist", "HEAD").unwrap_err();

    match err {
        ExportError::Git { message } => assert!(message.contains("does-not-exist"), "got: {}", message),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_statuses_cover_add_modify_delete() {
    let repo = TestRepo::new().unwrap();
    repo.write("modify.txt", "1").unwrap();
    repo.write("delete.txt", "1").unwrap();
    repo.commit("base").unwrap();

    repo.write("modify.txt", "2").unwrap();
    repo.remove("delete.txt").unwrap();
    repo.write("add.txt", "new").unwrap();
    let head = repo.commit("changes").unwrap();

    let client = GitRepository::new(repo.root());
    let statuses = client.statuses_for_commit(&CommitId::new(head)).unwrap();

    assert_eq!(
        statuses,
        vec![
            FileStatus::new(ChangeKind::Added, "add.txt"),
            FileStatus::new(ChangeKind::Deleted, "delete.txt"),
            FileStatus::new(ChangeKind::Modified, "modify.txt"),
        ]
    );
}

#[test]
fn test_renames_are_ignored() {
    let repo = TestRepo::new().unwrap();
    let content = "a reasonably long file body so similarity detection is confident\n".repeat(20);
    repo.write("old_name.txt", &content).unwrap();
    repo.commit("base").unwrap();

    repo.remove("old_name.txt").unwrap();
    repo.write("new_name.txt", &content).unwrap();
    let head = repo.commit("rename").unwrap();

    let client = GitRepository::new(repo.root());
    let statuses = client.statuses_for_commit(&CommitId::new(head)).unwrap();
    assert!(statuses.is_empty(), "renames should be dropped, got {:?}", statuses);
}

#[test]
fn test_read_file_at_older_revision() {
    let repo = TestRepo::new().unwrap();
    repo.write("dir/file.txt", "old").unwrap();
    let first = repo.commit("first").unwrap();
    repo.write("dir/file.txt", "new").unwrap();
    repo.commit("second").unwrap();

    let client = GitRepository::new(repo.root());
    assert_eq!(client.read_file_at_revision(&first, "dir/file.txt").unwrap(), b"old");
    assert_eq!(client.read_file_at_revision("HEAD", "dir/file.txt").unwrap(), b"new");
}

#[test]
fn test_read_missing_path_fails() {
    let repo = TestRepo::new().unwrap();
    repo.write("a.txt", "1").unwrap();
    repo.commit("first").unwrap();

    let client = GitRepository::new(repo.root());
    assert!(client.read_file_at_revision("HEAD", "missing.txt").is_err());
    assert!(client.read_file_at_revision("HEAD", "a.txt/child").is_err());
}
