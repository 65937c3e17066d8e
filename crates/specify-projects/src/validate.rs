//! Validation of a local template source before anything is copied from it.

use crate::error::{Error, Result};
use crate::layout::{join_relative, REQUIRED_SOURCE_DIRS};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Heading of the invalid-structure message
pub const INVALID_STRUCTURE_HEADING: &str = "Invalid spec-kit repository structure";

/// Outcome of checking a source repository against [`REQUIRED_SOURCE_DIRS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Required directories that are absent or not directories
    pub missing: Vec<&'static str>,
    /// Required directories that exist as directories
    pub found: Vec<&'static str>,
}

impl ValidationReport {
    /// True when no required directory is missing
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    /// Diagnostic listing missing then found directories, or `None` when valid
    pub fn error_message(&self) -> Option<String> {
        if self.is_valid() {
            return None;
        }

        let mut lines = vec![
            INVALID_STRUCTURE_HEADING.to_string(),
            String::new(),
            "Missing required directories:".to_string(),
        ];
        lines.extend(self.missing.iter().map(|dir| format!("  ✗ {}/", dir)));

        if !self.found.is_empty() {
            lines.push(String::new());
            lines.push("Found:".to_string());
            lines.extend(self.found.iter().map(|dir| format!("  ✓ {}/", dir)));
        }

        Some(lines.join("\n"))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_message() {
            Some(message) => f.write_str(&message),
            None => f.write_str("Valid spec-kit repository structure"),
        }
    }
}

/// Check that `local_path` holds every required directory.
///
/// The caller guarantees `local_path` exists and is a directory. Only
/// directory metadata is read; extra files and directories are ignored.
pub fn validate_local_repo(local_path: &Path) -> ValidationReport {
    let (found, missing): (Vec<_>, Vec<_>) = REQUIRED_SOURCE_DIRS
        .iter()
        .copied()
        .partition(|dir| join_relative(local_path, dir).is_dir());

    debug!(
        "Validated {}: {} found, {} missing",
        local_path.display(),
        found.len(),
        missing.len()
    );

    ValidationReport { missing, found }
}

/// Validate and turn an invalid structure into [`Error::InvalidStructure`]
pub fn require_valid_repo(local_path: &Path) -> Result<()> {
    match validate_local_repo(local_path).error_message() {
        Some(message) => Err(Error::invalid_structure(message)),
        None => Ok(()),
    }
}

/// Resolve a user-supplied source path to an absolute, canonical directory.
///
/// Relative paths are taken from the current working directory.
pub fn resolve_local_source(raw: impl AsRef<Path>) -> Result<PathBuf> {
    let raw = raw.as_ref();
    let absolute = if raw.is_absolute() {
        raw.to_path_buf()
    } else {
        std::env::current_dir()?.join(raw)
    };

    if !absolute.exists() {
        return Err(Error::path_not_found(&absolute));
    }
    if !absolute.is_dir() {
        return Err(Error::not_a_directory(&absolute));
    }

    Ok(absolute.canonicalize()?)
}
