//! Functional tests for classification and manifest properties

use gitexport::changelog::{ChangelogBuilder, LineEnding};
use gitexport::config::ExportConfig;
use gitexport::progress::ProgressReporter;
use gitexport::vcs::CommitId;
use gitexport::{DiffExporter, ExportState, FileStatusAggregator, MemoryHistory};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

/// Small linear congruential generator, enough to vary the histories
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

const LETTERS: [&str; 5] = ["A", "M", "D", "R100", "C75"];

/// Builds a history of `commits` commits touching paths drawn from a small pool
fn random_history(seed: u64, commits: usize) -> (MemoryHistory, Vec<CommitId>) {
    let mut rng = Lcg(seed);
    let mut history = MemoryHistory::new().commit("base", &[]);
    let mut ids = Vec::new();

    for i in 0..commits {
        let id = format!("c{}", i);
        let touched = 1 + rng.next(6) as usize;
        let changes: Vec<(String, String)> = (0..touched)
            .map(|_| {
                let letter = LETTERS[rng.next(LETTERS.len() as u64) as usize].to_string();
                let path = format!("dir{}/file{}.txt", rng.next(3), rng.next(8));
                (letter, path)
            })
            .collect();
        let borrowed: Vec<(&str, &str)> = changes
            .iter()
            .map(|(l, p)| (l.as_str(), p.as_str()))
            .collect();
        history = history.commit(&id, &borrowed);
        ids.push(CommitId::new(id));
    }

    ids.reverse();
    (history, ids)
}

#[test]
fn test_paths_are_never_duplicated_or_in_both_sets() {
    for seed in 1..=25 {
        let (history, commits) = random_history(seed, 12);
        let set = FileStatusAggregator::new(&history).aggregate(&commits).unwrap();

        let modified: HashSet<&String> = set.modified().iter().collect();
        let deleted: HashSet<&String> = set.deleted().iter().collect();
        assert_eq!(modified.len(), set.modified().len(), "seed {}", seed);
        assert_eq!(deleted.len(), set.deleted().len(), "seed {}", seed);
        assert!(modified.is_disjoint(&deleted), "seed {}", seed);
    }
}

#[test]
fn test_classification_is_deterministic() {
    for seed in 1..=10 {
        let (history, commits) = random_history(seed, 8);
        let aggregator = FileStatusAggregator::new(&history);
        assert_eq!(
            aggregator.aggregate(&commits).unwrap(),
            aggregator.aggregate(&commits).unwrap(),
            "seed {}",
            seed
        );
    }
}

#[test]
fn test_commit_order_decides_classification() {
    let history = MemoryHistory::new()
        .commit("c1", &[("M", "x")])
        .commit("c2", &[("D", "x")]);
    let aggregator = FileStatusAggregator::new(&history);

    let c1_first = aggregator
        .aggregate(&[CommitId::new("c1"), CommitId::new("c2")])
        .unwrap();
    assert!(c1_first.modified().contains("x"));
    assert!(!c1_first.deleted().contains("x"));

    let c2_first = aggregator
        .aggregate(&[CommitId::new("c2"), CommitId::new("c1")])
        .unwrap();
    assert!(c2_first.deleted().contains("x"));
    assert!(!c2_first.modified().contains("x"));
}

#[test]
fn test_manifest_counts_match_classification() {
    for seed in [3u64, 7, 11, 19] {
        let temp_dir = TempDir::new().unwrap();
        let (mut history, commits) = random_history(seed, 10);
        let newest = commits[0].to_string();

        let expected = FileStatusAggregator::new(&history).aggregate(&commits).unwrap();
        for path in expected.modified() {
            history = history.file(&newest, path, format!("{} at {}", path, newest));
        }

        let mut prompt = |_: &str| true;
        let config = ExportConfig {
            line_ending: LineEnding::Lf,
            ..ExportConfig::default()
        };
        let mut exporter = DiffExporter::new(&history, &mut prompt, temp_dir.path(), &config);
        let manifest = exporter
            .run("base", &newest, &mut ProgressReporter::new_minimal())
            .unwrap();
        assert_eq!(exporter.state(), &ExportState::ManifestWritten);

        assert_eq!(manifest.commit_count, commits.len());
        assert_eq!(manifest.modified, expected.modified().iter().cloned().collect::<Vec<_>>());
        assert_eq!(manifest.deleted, expected.deleted().iter().cloned().collect::<Vec<_>>());

        let export = temp_dir.path().join(".export");
        let changelog = fs::read_to_string(export.join("_changelog.txt")).unwrap();
        assert_eq!(changelog, ChangelogBuilder::new(LineEnding::Lf).build(&manifest));

        let lines: Vec<&str> = changelog.split('\n').collect();
        assert_eq!(lines[2], format!("{} commits", commits.len()));
        assert_eq!(lines[3], format!("{} modified file(s)", expected.modified().len()));
        assert_eq!(lines[4], format!("{} deleted file(s)", expected.deleted().len()));

        for path in expected.modified() {
            let content = fs::read_to_string(export.join(path)).unwrap();
            assert_eq!(content, format!("{} at {}", path, newest));
        }
        for path in expected.deleted() {
            assert!(!export.join(path).exists(), "deleted path exported: {}", path);
        }
    }
}

#[test]
fn test_unrecognised_kinds_never_reach_the_manifest() {
    let temp_dir = TempDir::new().unwrap();
    let history = MemoryHistory::new()
        .commit("base", &[])
        .commit("c1", &[("R100", "moved.txt"), ("A", "added.txt"), ("C50", "copy.txt")])
        .file("c1", "added.txt", "added");
    let mut prompt = |_: &str| true;
    let config = ExportConfig::default();

    let manifest = DiffExporter::new(&history, &mut prompt, temp_dir.path(), &config)
        .run("base", "c1", &mut ProgressReporter::new_minimal())
        .unwrap();

    assert_eq!(manifest.modified, vec!["added.txt"]);
    assert!(manifest.deleted.is_empty());
}
