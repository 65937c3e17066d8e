//! Integration tests for validating and copying a local template checkout
//!
//! Each test builds a throwaway source repository and project directory with
//! tempfile and drives the public API end to end.

use specify_projects::layout::join_relative;
use specify_projects::{
    copy_local_templates, validate_local_repo, Error, ProgressSink, REQUIRED_SOURCE_DIRS,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

// ─── Helpers ───────────────────────────────────────────────────────────────

/// Progress sink that records every call as `op:key[:detail]`
#[derive(Default)]
struct RecordingProgress {
    events: Vec<String>,
}

impl ProgressSink for RecordingProgress {
    fn add(&mut self, key: &str, label: &str) {
        self.events.push(format!("add:{}:{}", key, label));
    }
    fn start(&mut self, key: &str) {
        self.events.push(format!("start:{}", key));
    }
    fn complete(&mut self, key: &str, detail: &str) {
        self.events.push(format!("complete:{}:{}", key, detail));
    }
    fn error(&mut self, key: &str, detail: &str) {
        self.events.push(format!("error:{}:{}", key, detail));
    }
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = join_relative(root, relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Source repository with every required directory and a few files in each
fn create_source_repo() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    write(root, "templates/spec-template.md", "# Spec template");
    write(root, "templates/plan-template.md", "# Plan template");
    write(root, "templates/commands/specify.md", "specify command");
    write(root, "templates/commands/plan.md", "plan command");
    write(root, "scripts/bash/common.sh", "#!/usr/bin/env bash\n");
    write(root, "scripts/bash/create-new-feature.sh", "#!/usr/bin/env bash\n");
    write(root, "memory/constitution.md", "# Constitution");
    // unrelated content is tolerated and never copied
    write(root, "README.md", "# spec-kit");
    write(root, "scripts/powershell/common.ps1", "Write-Host hi");

    temp
}

/// Map of relative path -> file content for every regular file under `root`
fn snapshot(root: &Path) -> BTreeMap<PathBuf, String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read_to_string(e.path()).unwrap())
        })
        .collect()
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(join_relative(root, relative)).unwrap()
}

// ─── Validation ────────────────────────────────────────────────────────────

#[test]
fn test_valid_repo_with_extra_content() {
    let source = create_source_repo();
    fs::create_dir_all(source.path().join("docs/extra")).unwrap();

    let report = validate_local_repo(source.path());
    assert!(report.is_valid());
    assert!(report.error_message().is_none());
}

#[test]
fn test_every_proper_subset_partitions_required_set() {
    // 4 required dirs -> 15 proper subsets
    for mask in 0u8..15 {
        let temp = TempDir::new().unwrap();
        let present: Vec<&str> = REQUIRED_SOURCE_DIRS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1u8 << *i) != 0)
            .map(|(_, d)| *d)
            .collect();
        for dir in &present {
            fs::create_dir_all(join_relative(temp.path(), dir)).unwrap();
        }

        let report = validate_local_repo(temp.path());

        // templates/commands implies templates exists on disk
        let mut expected_found: Vec<&str> = REQUIRED_SOURCE_DIRS
            .iter()
            .copied()
            .filter(|d| join_relative(temp.path(), d).is_dir())
            .collect();
        if expected_found.len() == REQUIRED_SOURCE_DIRS.len() {
            assert!(report.is_valid());
            continue;
        }
        assert!(!report.is_valid(), "mask {:04b} should be invalid", mask);
        expected_found.sort();
        let mut found = report.found.clone();
        found.sort();
        assert_eq!(found, expected_found);

        for dir in &report.missing {
            assert!(!report.found.contains(dir));
        }
        let mut union: Vec<&str> = report.missing.iter().chain(&report.found).copied().collect();
        union.sort();
        let mut required = REQUIRED_SOURCE_DIRS.to_vec();
        required.sort();
        assert_eq!(union, required);

        let message = report.error_message().unwrap();
        let (missing_part, found_part) = match message.split_once("\n\nFound:\n") {
            Some((m, f)) => (m.to_string(), f.to_string()),
            None => (message.clone(), String::new()),
        };
        for dir in &report.missing {
            assert!(missing_part.contains(&format!("✗ {}/", dir)));
            assert!(!found_part.contains(&format!("✓ {}/", dir)));
        }
        for dir in &report.found {
            assert!(found_part.contains(&format!("✓ {}/", dir)));
        }
    }
}

#[test]
fn test_required_name_as_plain_file_is_missing() {
    let temp = TempDir::new().unwrap();
    for dir in ["templates/commands", "scripts/bash"] {
        fs::create_dir_all(join_relative(temp.path(), dir)).unwrap();
    }
    fs::write(temp.path().join("memory"), "not a directory").unwrap();

    let report = validate_local_repo(temp.path());
    assert_eq!(report.missing, vec!["memory"]);
    assert!(report
        .error_message()
        .unwrap()
        .contains("Missing required directories:\n  ✗ memory/"));
}

#[test]
fn test_empty_required_directories_count_as_present() {
    let temp = TempDir::new().unwrap();
    for dir in REQUIRED_SOURCE_DIRS {
        fs::create_dir_all(join_relative(temp.path(), dir)).unwrap();
    }
    assert!(validate_local_repo(temp.path()).is_valid());
}

// ─── Copy ──────────────────────────────────────────────────────────────────

#[test]
fn test_copy_into_empty_project_follows_mapping() {
    let source = create_source_repo();
    let project = TempDir::new().unwrap();

    let summary = copy_local_templates(project.path(), source.path(), false, None).unwrap();

    let files: Vec<String> = snapshot(project.path())
        .keys()
        .map(|p| p.to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(
        files,
        vec![
            ".claude/commands/plan.md",
            ".claude/commands/specify.md",
            ".specify/memory/constitution.md",
            ".specify/scripts/bash/common.sh",
            ".specify/scripts/bash/create-new-feature.sh",
            ".specify/templates/plan-template.md",
            ".specify/templates/spec-template.md",
        ]
    );
    assert!(!project.path().join(".specify/templates/commands").exists());
    assert_eq!(summary.total_files, 7);
    assert_eq!(
        summary.entries,
        vec![
            (".specify/templates", 2),
            (".claude/commands", 2),
            (".specify/scripts/bash", 2),
            (".specify/memory", 1),
        ]
    );
}

#[test]
fn test_copy_merges_into_existing_project() {
    let source = create_source_repo();
    let project = TempDir::new().unwrap();
    write(project.path(), "src/main.rs", "fn main() {}");
    write(project.path(), ".specify/templates/spec-template.md", "stale");
    write(project.path(), ".specify/templates/custom.md", "mine");

    copy_local_templates(project.path(), source.path(), true, None).unwrap();

    assert_eq!(
        read(project.path(), ".specify/templates/spec-template.md"),
        "# Spec template"
    );
    assert_eq!(read(project.path(), ".specify/templates/custom.md"), "mine");
    assert_eq!(read(project.path(), "src/main.rs"), "fn main() {}");
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_dereferenced() {
    let source = create_source_repo();
    let outside = TempDir::new().unwrap();
    let target = outside.path().join("shared.md");
    fs::write(&target, "shared content").unwrap();
    std::os::unix::fs::symlink(&target, source.path().join("memory/shared.md")).unwrap();

    let project = TempDir::new().unwrap();
    copy_local_templates(project.path(), source.path(), false, None).unwrap();

    let copied = project.path().join(".specify/memory/shared.md");
    let meta = fs::symlink_metadata(&copied).unwrap();
    assert!(meta.file_type().is_file());
    assert!(!meta.file_type().is_symlink());
    assert_eq!(fs::read_to_string(&copied).unwrap(), "shared content");
}

#[cfg(unix)]
#[test]
fn test_broken_symlink_is_copy_failure() {
    let source = create_source_repo();
    std::os::unix::fs::symlink(
        source.path().join("does-not-exist"),
        source.path().join("memory/dangling.md"),
    )
    .unwrap();

    let project = TempDir::new().unwrap();
    let err = copy_local_templates(project.path(), source.path(), false, None).unwrap_err();
    assert!(err.is_copy_failure());
}

#[test]
fn test_failure_on_third_entry_keeps_earlier_entries() {
    let source = create_source_repo();
    let project = TempDir::new().unwrap();
    // .specify/scripts as a plain file blocks .specify/scripts/bash
    write(project.path(), ".specify/scripts", "in the way");

    let mut progress = RecordingProgress::default();
    let err =
        copy_local_templates(project.path(), source.path(), false, Some(&mut progress)).unwrap_err();

    assert!(matches!(err, Error::CopyFailure { .. }));
    assert_eq!(
        read(project.path(), ".specify/templates/spec-template.md"),
        "# Spec template"
    );
    assert_eq!(
        read(project.path(), ".claude/commands/specify.md"),
        "specify command"
    );
    assert!(!project.path().join(".specify/memory").exists());

    assert_eq!(progress.events.len(), 3);
    assert_eq!(progress.events[0], "add:copy:Copy templates from local");
    assert_eq!(progress.events[1], "start:copy");
    assert!(progress.events[2].starts_with("error:copy:Failed to copy"));
}

#[test]
fn test_copy_twice_is_idempotent() {
    let source = create_source_repo();
    let once = TempDir::new().unwrap();
    let twice = TempDir::new().unwrap();

    copy_local_templates(once.path(), source.path(), false, None).unwrap();
    copy_local_templates(twice.path(), source.path(), false, None).unwrap();
    copy_local_templates(twice.path(), source.path(), false, None).unwrap();

    assert_eq!(snapshot(once.path()), snapshot(twice.path()));
}

#[test]
fn test_progress_reports_file_count() {
    let source = create_source_repo();
    let project = TempDir::new().unwrap();
    let mut progress = RecordingProgress::default();

    copy_local_templates(project.path(), source.path(), false, Some(&mut progress)).unwrap();

    assert_eq!(
        progress.events,
        vec![
            "add:copy:Copy templates from local".to_string(),
            "start:copy".to_string(),
            "complete:copy:7 files".to_string(),
        ]
    );
}
