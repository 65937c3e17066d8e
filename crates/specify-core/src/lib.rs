//! # specify-core
//!
//! Core library for the Specify CLI providing:
//! - Runtime configuration types (network, GitHub source, git workflow, display)
//! - Hierarchical configuration loading with file and environment overrides
//! - The shared error type for configuration failures

pub mod config;
pub mod error;
pub mod types;

pub use config::HierarchicalConfigLoader;
pub use error::{Error, Result};
pub use types::RuntimeConfig;
