//! Execute permissions for the shell scripts shipped with the templates.
//!
//! Release archives and some checkouts drop the executable bit, so after
//! copying every `*.sh` under `.specify/scripts` that starts with a shebang
//! gets execute bits matching its read bits. No-op outside unix.

use crate::layout::{join_relative, SCRIPTS_DIR};
use crate::progress::ProgressSink;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Step key reported to the progress sink
pub const CHMOD_STEP: &str = "chmod";

/// Outcome of a permission pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptPermissionReport {
    /// Scripts whose mode was changed
    pub updated: usize,
    /// Scripts that could not be updated, relative to the scripts dir
    pub failures: Vec<(PathBuf, String)>,
}

impl ScriptPermissionReport {
    /// Summary line for the progress sink
    pub fn detail(&self) -> String {
        if self.failures.is_empty() {
            format!("{} updated", self.updated)
        } else {
            format!("{} updated, {} failed", self.updated, self.failures.len())
        }
    }
}

/// Make shebang scripts under `<project>/.specify/scripts` executable.
///
/// Per-file failures are collected, not raised.
pub fn ensure_executable_scripts(
    project_path: &Path,
    tracker: Option<&mut dyn ProgressSink>,
) -> ScriptPermissionReport {
    let scripts_root = join_relative(project_path, SCRIPTS_DIR);
    let report = if scripts_root.is_dir() {
        update_scripts(&scripts_root)
    } else {
        debug!("No scripts directory at {}", scripts_root.display());
        ScriptPermissionReport::default()
    };

    if let Some(t) = tracker {
        t.add(CHMOD_STEP, "Set script permissions recursively");
        t.start(CHMOD_STEP);
        if report.failures.is_empty() {
            t.complete(CHMOD_STEP, &report.detail());
        } else {
            t.error(CHMOD_STEP, &report.detail());
        }
    }

    for (path, reason) in &report.failures {
        warn!("Could not mark {} executable: {}", path.display(), reason);
    }

    report
}

#[cfg(unix)]
fn update_scripts(scripts_root: &Path) -> ScriptPermissionReport {
    use walkdir::WalkDir;

    let mut report = ScriptPermissionReport::default();

    for entry in WalkDir::new(scripts_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(scripts_root).to_path_buf();
                report.failures.push((relative_to(&path, scripts_root), e.to_string()));
                continue;
            }
        };

        // symlinks are reported as links, not followed
        if !entry.file_type().is_file()
            || entry.path().extension().and_then(|e| e.to_str()) != Some("sh")
        {
            continue;
        }

        match make_executable(entry.path()) {
            Ok(true) => report.updated += 1,
            Ok(false) => {}
            Err(e) => report
                .failures
                .push((relative_to(entry.path(), scripts_root), e.to_string())),
        }
    }

    report
}

#[cfg(not(unix))]
fn update_scripts(_scripts_root: &Path) -> ScriptPermissionReport {
    ScriptPermissionReport::default()
}

/// Returns Ok(true) when the mode changed
#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<bool> {
    use std::fs::{self, File};
    use std::io::Read;
    use std::os::unix::fs::PermissionsExt;

    let mut shebang = [0u8; 2];
    let mut file = File::open(path)?;
    if file.read(&mut shebang)? < 2 || &shebang != b"#!" {
        return Ok(false);
    }

    let mode = fs::metadata(path)?.permissions().mode();
    if mode & 0o111 != 0 {
        return Ok(false);
    }

    let mut new_mode = mode;
    if mode & 0o400 != 0 {
        new_mode |= 0o100;
    }
    if mode & 0o040 != 0 {
        new_mode |= 0o010;
    }
    if mode & 0o004 != 0 {
        new_mode |= 0o001;
    }
    new_mode |= 0o100;

    fs::set_permissions(path, fs::Permissions::from_mode(new_mode))?;
    debug!("chmod {:o} {}", new_mode & 0o7777, path.display());
    Ok(true)
}

#[cfg(unix)]
fn relative_to(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_script(path: &Path, content: &str, mode: u32) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    fn mode_of(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    #[test]
    fn test_shebang_scripts_gain_execute_bits() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join(".specify/scripts/bash/common.sh");
        write_script(&script, "#!/usr/bin/env bash\necho hi\n", 0o644);

        let report = ensure_executable_scripts(temp.path(), None);

        assert_eq!(report.updated, 1);
        assert!(report.failures.is_empty());
        assert_eq!(mode_of(&script), 0o755);
    }

    #[test]
    fn test_owner_only_read_gets_owner_execute() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join(".specify/scripts/bash/private.sh");
        write_script(&script, "#!/bin/sh\n", 0o600);

        ensure_executable_scripts(temp.path(), None);
        assert_eq!(mode_of(&script), 0o700);
    }

    #[test]
    fn test_scripts_without_shebang_are_untouched() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join(".specify/scripts/bash/sourced.sh");
        write_script(&script, "export FOO=1\n", 0o644);

        let report = ensure_executable_scripts(temp.path(), None);

        assert_eq!(report.updated, 0);
        assert_eq!(mode_of(&script), 0o644);
    }

    #[test]
    fn test_already_executable_is_not_counted() {
        let temp = TempDir::new().unwrap();
        let script = temp.path().join(".specify/scripts/bash/run.sh");
        write_script(&script, "#!/bin/bash\n", 0o755);

        let report = ensure_executable_scripts(temp.path(), None);
        assert_eq!(report.updated, 0);
        assert_eq!(report.detail(), "0 updated");
    }

    #[test]
    fn test_missing_scripts_dir_is_noop() {
        let temp = TempDir::new().unwrap();
        let report = ensure_executable_scripts(temp.path(), None);
        assert_eq!(report, ScriptPermissionReport::default());
    }
}
