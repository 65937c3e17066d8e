//! Runtime configuration types
//!
//! These types control where templates are fetched from, how long network
//! calls may take, and how the freshly initialized project is committed.

use serde::{Deserialize, Serialize};

/// Complete runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Template source repository on GitHub
    #[serde(default)]
    pub github: GitHubConfig,

    /// Git workflow defaults
    #[serde(default)]
    pub git_workflow: GitWorkflowConfig,

    /// Display and output settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Network and HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// HTTP timeout in seconds for API calls
    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    /// Timeout in seconds for the release archive download
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout(),
            download_timeout_secs: default_download_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_http_timeout() -> u64 {
    30
}
fn default_download_timeout() -> u64 {
    300 // 5 minutes
}
fn default_user_agent() -> String {
    format!(
        "specify/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// GitHub repository hosting the templates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// Repository owner
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// Repository name
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Base URL for GitHub API
    #[serde(default = "default_github_api_url")]
    pub api_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            api_url: default_github_api_url(),
        }
    }
}

impl GitHubConfig {
    /// `owner/name` slug of the template repository
    pub fn slug(&self) -> String {
        format!("{}/{}", self.repo_owner, self.repo_name)
    }
}

fn default_repo_owner() -> String {
    "github".to_string()
}
fn default_repo_name() -> String {
    "spec-kit".to_string()
}
fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

/// Git workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitWorkflowConfig {
    /// Commit message used for the first commit of a new project
    #[serde(default = "default_initial_commit_message")]
    pub initial_commit_message: String,
}

impl Default for GitWorkflowConfig {
    fn default() -> Self {
        Self {
            initial_commit_message: default_initial_commit_message(),
        }
    }
}

fn default_initial_commit_message() -> String {
    "Initial commit from Specify template".to_string()
}

/// Display and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DisplayConfig {
    /// Enable colored output
    #[serde(default = "default_color_enabled")]
    pub color_enabled: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_enabled: default_color_enabled(),
        }
    }
}

fn default_color_enabled() -> bool {
    true
}
