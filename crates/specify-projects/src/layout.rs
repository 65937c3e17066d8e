//! Fixed layout of a template source repository and where its parts land
//! inside a project.
//!
//! Both tables are plain data: adding a mapped subtree is a one-line edit.

use std::path::{Path, PathBuf};

/// Directories a source repository must contain, in the order they are checked.
pub const REQUIRED_SOURCE_DIRS: [&str; 4] =
    ["templates", "scripts/bash", "memory", "templates/commands"];

/// One source subtree and the project subtree it is copied into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathMapping {
    /// Path relative to the source repository root
    pub source: &'static str,
    /// Path relative to the project root
    pub destination: &'static str,
    /// Direct children of `source` that are not copied by this entry
    pub exclude: &'static [&'static str],
}

/// Subtrees copied into a project, in copy order.
///
/// `templates/commands` is routed to `.claude/commands`, so the `templates`
/// entry skips its `commands` child.
pub const PATH_MAPPINGS: [PathMapping; 4] = [
    PathMapping {
        source: "templates",
        destination: ".specify/templates",
        exclude: &["commands"],
    },
    PathMapping {
        source: "templates/commands",
        destination: ".claude/commands",
        exclude: &[],
    },
    PathMapping {
        source: "scripts/bash",
        destination: ".specify/scripts/bash",
        exclude: &[],
    },
    PathMapping {
        source: "memory",
        destination: ".specify/memory",
        exclude: &[],
    },
];

/// Project directory holding shell scripts that must be executable
pub const SCRIPTS_DIR: &str = ".specify/scripts";

/// Join a `/`-separated relative path onto `base` using platform separators
pub fn join_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split('/')
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |acc, part| acc.join(part))
}

impl PathMapping {
    /// Absolute source subtree for a repository root
    pub fn source_in(&self, repo_root: &Path) -> PathBuf {
        join_relative(repo_root, self.source)
    }

    /// Absolute destination subtree for a project root
    pub fn destination_in(&self, project_root: &Path) -> PathBuf {
        join_relative(project_root, self.destination)
    }
}
