//! Type definitions shared across Specify crates

mod runtime_config;

pub use runtime_config::{
    DisplayConfig, GitHubConfig, GitWorkflowConfig, NetworkConfig, RuntimeConfig,
};
