//! Git operations for freshly initialized projects
//!
//! # Examples
//!
//! ```no_run
//! use specify_projects::git::{init_repository, is_git_repo};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let path = Path::new("/tmp/my-project");
//! if !is_git_repo(path).await {
//!     init_repository(path, "Initial commit from Specify template").await?;
//! }
//! # Ok(())
//! # }
//! ```

mod init;

pub use init::{check_git_available, init_repository, is_git_repo};
