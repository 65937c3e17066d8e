//! Repository initialization operations

use crate::error::{Error, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::{debug, info};

/// Initialize a git repository at `path` and commit everything in it.
///
/// # Errors
/// Returns error if:
/// - Directory doesn't exist
/// - Git is not installed
/// - `git init`, `git add` or `git commit` fails
pub async fn init_repository(path: &Path, commit_message: &str) -> Result<()> {
    info!("Initializing git repository at: {}", path.display());

    check_git_available().await?;

    if !path.is_dir() {
        return Err(Error::git_operation(format!(
            "directory does not exist: {}",
            path.display()
        )));
    }

    run_git(path, &["init"]).await?;
    run_git(path, &["add", "."]).await?;
    run_git(path, &["commit", "-m", commit_message]).await?;

    info!("Initial commit created");
    Ok(())
}

/// Whether `path` is inside an existing git work tree
pub async fn is_git_repo(path: &Path) -> bool {
    if !path.is_dir() {
        return false;
    }

    match Command::new("git")
        .current_dir(path)
        .args(["rev-parse", "--is-inside-work-tree"])
        .output()
        .await
    {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}

/// Check if git is available in PATH
pub async fn check_git_available() -> Result<()> {
    let output = Command::new("git")
        .arg("--version")
        .output()
        .await
        .map_err(|_| Error::GitNotFound)?;

    if !output.status.success() {
        return Err(Error::GitNotFound);
    }

    Ok(())
}

async fn run_git(path: &Path, args: &[&str]) -> Result<()> {
    debug!("Running: git {}", args.join(" "));

    let output = Command::new("git")
        .current_dir(path)
        .args(args)
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::git_operation(format!(
            "git {} failed: {}",
            args.first().copied().unwrap_or_default(),
            stderr.trim()
        )));
    }

    Ok(())
}
