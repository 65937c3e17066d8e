//! Remote template acquisition for the Specify CLI
//!
//! Provides:
//! - Latest-release lookup for the template repository on GitHub
//! - Streaming download of the release source tarball
//! - Extraction of the tarball into a directory tree the local copier accepts
//!
//! # Example
//!
//! ```no_run
//! use specify_core::RuntimeConfig;
//! use specify_release::{extract_tarball, FetchOptions, ReleaseManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RuntimeConfig::default();
//! let manager = ReleaseManager::new(&config, &FetchOptions::default())?;
//!
//! let release = manager.get_latest().await?;
//! let workdir = tempfile::tempdir()?;
//! let archive = manager.download_tarball(&release, workdir.path(), false).await?;
//! let root = extract_tarball(&archive, &workdir.path().join("src"))?;
//! println!("templates extracted to {}", root.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod extract;
pub mod releases;

pub use error::{Error, Result};
pub use extract::extract_tarball;
pub use releases::{FetchOptions, Release, ReleaseAsset, ReleaseManager};
