//! CLI command implementations

pub mod completions;
pub mod init;
pub mod version;
