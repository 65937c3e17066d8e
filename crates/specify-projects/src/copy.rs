//! Merge-copy of a validated template source into a project directory.

use crate::error::{Error, Result};
use crate::layout::{PathMapping, PATH_MAPPINGS};
use crate::progress::ProgressSink;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Step key reported to the progress sink
pub const COPY_STEP: &str = "copy";

/// Files copied per mapping entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopySummary {
    /// Total regular files written
    pub total_files: usize,
    /// (destination, files copied) for each mapping entry, in copy order
    pub entries: Vec<(&'static str, usize)>,
}

/// Copy every [`PATH_MAPPINGS`] entry from `local_path` into `project_path`.
///
/// Existing destination directories are merged into: files with the same
/// relative path are overwritten, everything else already there is kept.
/// Symbolic links are dereferenced. The first filesystem error stops the
/// remaining entries and is returned as [`Error::CopyFailure`]; entries
/// already copied stay in place.
///
/// `is_current_dir` only changes logging, both modes share the same copy.
pub fn copy_local_templates(
    project_path: &Path,
    local_path: &Path,
    is_current_dir: bool,
    mut tracker: Option<&mut dyn ProgressSink>,
) -> Result<CopySummary> {
    if let Some(t) = tracker.as_deref_mut() {
        t.add(COPY_STEP, "Copy templates from local");
        t.start(COPY_STEP);
    }

    info!(
        "Copying templates from {} into {}{}",
        local_path.display(),
        project_path.display(),
        if is_current_dir { " (current directory)" } else { "" }
    );

    match copy_mappings(project_path, local_path, &PATH_MAPPINGS) {
        Ok(summary) => {
            if let Some(t) = tracker.as_deref_mut() {
                t.complete(COPY_STEP, &format!("{} files", summary.total_files));
            }
            Ok(summary)
        }
        Err(e) => {
            if let Some(t) = tracker.as_deref_mut() {
                t.error(COPY_STEP, &e.to_string());
            }
            Err(e)
        }
    }
}

fn copy_mappings(
    project_path: &Path,
    local_path: &Path,
    mappings: &[PathMapping],
) -> Result<CopySummary> {
    let mut summary = CopySummary::default();

    for mapping in mappings {
        let source = mapping.source_in(local_path);
        let destination = mapping.destination_in(project_path);

        let copied = copy_subtree(&source, &destination, mapping.exclude)?;
        debug!(
            "{} -> {}: {} files",
            mapping.source, mapping.destination, copied
        );

        summary.total_files += copied;
        summary.entries.push((mapping.destination, copied));
    }

    Ok(summary)
}

/// Recursively copy `source` into `destination`, skipping the direct
/// children of `source` named in `exclude`. Returns the number of files written.
pub fn copy_subtree(source: &Path, destination: &Path, exclude: &[&str]) -> Result<usize> {
    fs::create_dir_all(destination).map_err(|e| Error::copy_failure(destination, e))?;

    let walker = WalkDir::new(source)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() == 1 && exclude.iter().any(|name| entry.file_name() == OsStr::new(name)))
        });

    let mut copied = 0;
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            Error::copy_failure(path, io::Error::from(e))
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::copy_failure(entry.path(), io::Error::other(e)))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| Error::copy_failure(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::copy_failure(parent, e))?;
        }
        // fs::copy opens the source path, so a link yields its target's bytes
        fs::copy(entry.path(), &target).map_err(|e| Error::copy_failure(entry.path(), e))?;
        copied += 1;
    }

    Ok(copied)
}
