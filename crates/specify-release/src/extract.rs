//! Release archive extraction

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::debug;

/// Unpack a `.tar.gz` into `dest` and return the repository root inside it.
///
/// GitHub source tarballs wrap the tree in one `<owner>-<repo>-<sha>/`
/// directory; when that single top-level directory is present it is the
/// returned root, otherwise `dest` itself is.
pub fn extract_tarball(archive_path: &Path, dest: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dest)?;

    let file = File::open(archive_path)?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive.unpack(dest).map_err(|e| {
        Error::archive(format!("{}: {}", archive_path.display(), e))
    })?;

    let root = single_top_level_dir(dest)?.unwrap_or_else(|| dest.to_path_buf());
    debug!("Extracted {} to {}", archive_path.display(), root.display());
    Ok(root)
}

fn single_top_level_dir(dest: &Path) -> Result<Option<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dest)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        } else {
            // loose files next to the wrapper mean there is no wrapper
            return Ok(None);
        }
    }

    if dirs.len() == 1 {
        Ok(dirs.pop())
    } else {
        Ok(None)
    }
}
