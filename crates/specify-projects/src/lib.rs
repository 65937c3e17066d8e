//! # specify-projects
//!
//! Project scaffolding library for the Specify CLI providing:
//! - Validation of a template source repository's layout
//! - Merge-copy of the template subtrees into a project directory
//! - Script permission fixes and git initialization of the new project
//!
//! # Examples
//!
//! ## Copy templates from a local checkout
//!
//! ```no_run
//! use specify_projects::{copy_local_templates, resolve_local_source, validate_local_repo};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = resolve_local_source("../spec-kit")?;
//! let report = validate_local_repo(&source);
//! if let Some(message) = report.error_message() {
//!     eprintln!("{}", message);
//!     return Ok(());
//! }
//!
//! copy_local_templates(Path::new("/tmp/my-project"), &source, false, None)?;
//! # Ok(())
//! # }
//! ```

pub mod copy;
pub mod error;
pub mod git;
pub mod layout;
pub mod progress;
pub mod scripts;
pub mod types;
pub mod validate;

pub use copy::{copy_local_templates, CopySummary};
pub use error::{Error, Result};
pub use layout::{PathMapping, PATH_MAPPINGS, REQUIRED_SOURCE_DIRS};
pub use progress::{NoopProgress, ProgressSink};
pub use scripts::{ensure_executable_scripts, ScriptPermissionReport};
pub use types::ProjectTarget;
pub use validate::{require_valid_repo, resolve_local_source, validate_local_repo, ValidationReport};
