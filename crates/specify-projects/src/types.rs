//! Project destination resolution

use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory a project is initialized into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    /// Display name (directory name for `--here`)
    pub name: String,
    /// Absolute project path
    pub path: PathBuf,
    /// True when initializing into the current working directory
    pub is_current_dir: bool,
}

impl ProjectTarget {
    /// Resolve the target from a project name or the `--here` flag.
    ///
    /// Exactly one of the two must be given. A named project must not
    /// already exist under `cwd`.
    pub fn resolve(project_name: Option<&str>, here: bool, cwd: &Path) -> Result<Self> {
        match (project_name, here) {
            (Some(_), true) => Err(Error::invalid_target(
                "Cannot specify both project name and --here flag",
            )),
            (None, false) => Err(Error::invalid_target(
                "Must specify either a project name or use --here flag",
            )),
            (None, true) => Ok(Self {
                name: cwd
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| cwd.display().to_string()),
                path: cwd.to_path_buf(),
                is_current_dir: true,
            }),
            (Some(name), false) => {
                let name = name.trim();
                if name.is_empty() || name == "." || name == ".." {
                    return Err(Error::invalid_target(format!(
                        "'{}' is not a usable project name",
                        name
                    )));
                }

                let path = cwd.join(name);
                if path.exists() {
                    return Err(Error::project_exists(&path));
                }

                Ok(Self {
                    name: name.to_string(),
                    path,
                    is_current_dir: false,
                })
            }
        }
    }

    /// Entries already present in the target directory
    pub fn existing_entries(&self) -> Result<usize> {
        if !self.path.is_dir() {
            return Ok(0);
        }
        Ok(fs::read_dir(&self.path)?.count())
    }

    /// Create the directory for a fresh project
    pub fn ensure_exists(&self) -> Result<()> {
        fs::create_dir_all(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_named_project_under_cwd() {
        let temp = TempDir::new().unwrap();
        let target = ProjectTarget::resolve(Some("my-app"), false, temp.path()).unwrap();

        assert_eq!(target.name, "my-app");
        assert_eq!(target.path, temp.path().join("my-app"));
        assert!(!target.is_current_dir);
    }

    #[test]
    fn test_here_uses_cwd() {
        let temp = TempDir::new().unwrap();
        let target = ProjectTarget::resolve(None, true, temp.path()).unwrap();

        assert_eq!(target.path, temp.path());
        assert!(target.is_current_dir);
        assert_eq!(target.existing_entries().unwrap(), 0);
    }

    #[test]
    fn test_name_and_here_conflict() {
        let temp = TempDir::new().unwrap();
        let err = ProjectTarget::resolve(Some("x"), true, temp.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidTarget { .. }));
    }

    #[test]
    fn test_neither_name_nor_here() {
        let temp = TempDir::new().unwrap();
        let err = ProjectTarget::resolve(None, false, temp.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidTarget { .. }));
    }

    #[test]
    fn test_existing_directory_is_rejected() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("taken")).unwrap();

        let err = ProjectTarget::resolve(Some("taken"), false, temp.path()).unwrap_err();
        assert!(matches!(err, Error::ProjectExists { .. }));
    }

    #[test]
    fn test_ensure_exists_creates_directory() {
        let temp = TempDir::new().unwrap();
        let target = ProjectTarget::resolve(Some("fresh"), false, temp.path()).unwrap();

        target.ensure_exists().unwrap();
        assert!(target.path.is_dir());
    }
}
