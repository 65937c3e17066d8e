//! Error types for specify-projects

use std::path::Path;
use thiserror::Error;

/// Result type alias using specify-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project scaffolding error types
#[derive(Error, Debug)]
pub enum Error {
    /// Local template source does not exist
    #[error("Local path not found: {path}")]
    PathNotFound { path: String },

    /// Local template source exists but is not a directory
    #[error("Local path is not a directory: {path}")]
    NotADirectory { path: String },

    /// Local template source is missing required directories
    #[error("{message}")]
    InvalidStructure { message: String },

    /// Filesystem failure while copying templates
    #[error("Failed to copy {path}: {source}")]
    CopyFailure {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Project directory already exists
    #[error("Directory '{path}' already exists")]
    ProjectExists { path: String },

    /// Project name / --here combination is unusable
    #[error("Invalid project target: {message}")]
    InvalidTarget { message: String },

    /// Git operation failed
    #[error("Git operation failed: {message}")]
    GitOperation { message: String },

    /// Git command not found
    #[error("Git command not found. Please ensure git is installed and in PATH")]
    GitNotFound,

    /// Required AI agent CLI is not installed
    #[error("{tool} not found in PATH. Install it or use --ignore-agent-tools to skip this check")]
    AgentToolNotFound { tool: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a path not found error
    pub fn path_not_found(path: impl AsRef<Path>) -> Self {
        Self::PathNotFound {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create a not-a-directory error
    pub fn not_a_directory(path: impl AsRef<Path>) -> Self {
        Self::NotADirectory {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create an invalid structure error carrying the validator's report
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    /// Create a copy failure for the path that could not be read or written
    pub fn copy_failure(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::CopyFailure {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Create a project exists error
    pub fn project_exists(path: impl AsRef<Path>) -> Self {
        Self::ProjectExists {
            path: path.as_ref().display().to_string(),
        }
    }

    /// Create an invalid target error
    pub fn invalid_target(message: impl Into<String>) -> Self {
        Self::InvalidTarget {
            message: message.into(),
        }
    }

    /// Create a git operation error
    pub fn git_operation(message: impl Into<String>) -> Self {
        Self::GitOperation {
            message: message.into(),
        }
    }

    /// Create an agent tool not found error
    pub fn agent_tool_not_found(tool: impl Into<String>) -> Self {
        Self::AgentToolNotFound { tool: tool.into() }
    }

    /// Whether this error came from the template copy step
    pub fn is_copy_failure(&self) -> bool {
        matches!(self, Self::CopyFailure { .. })
    }
}
