//! GitHub releases of the template repository

use crate::error::{Error, Result};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use specify_core::types::GitHubConfig;
use specify_core::RuntimeConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Release information
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Release tag (e.g., "v0.0.55")
    pub tag_name: String,

    /// Release name
    #[serde(default)]
    pub name: Option<String>,

    /// Source archive of the tagged tree
    pub tarball_url: String,

    /// Whether this is a prerelease
    #[serde(default)]
    pub prerelease: bool,

    /// Whether this is a draft
    #[serde(default)]
    pub draft: bool,

    /// Release assets
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,

    /// Published date
    #[serde(default)]
    pub published_at: Option<String>,
}

/// Release asset
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseAsset {
    /// Asset name
    pub name: String,

    /// Download URL
    pub browser_download_url: String,

    /// Asset size in bytes
    pub size: u64,
}

/// Flags that only matter when templates are fetched over the network
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    /// Token sent as `Authorization: Bearer`
    pub github_token: Option<String>,
    /// Accept invalid TLS certificates
    pub skip_tls: bool,
    /// Attach response bodies to HTTP errors
    pub debug: bool,
}

impl FetchOptions {
    /// Pick the token from the CLI flag, then `GH_TOKEN`, then `GITHUB_TOKEN`.
    /// Blank values count as unset.
    pub fn resolve_token(cli_token: Option<String>) -> Option<String> {
        cli_token
            .or_else(|| std::env::var("GH_TOKEN").ok())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

/// Looks up and downloads releases of the configured template repository
pub struct ReleaseManager {
    client: reqwest::Client,
    github: GitHubConfig,
    download_timeout: Duration,
    debug: bool,
}

impl ReleaseManager {
    /// Create a release manager from runtime config and fetch flags
    pub fn new(config: &RuntimeConfig, options: &FetchOptions) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        if let Some(token) = &options.github_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        if options.skip_tls {
            debug!("TLS certificate verification disabled");
        }

        let client = reqwest::Client::builder()
            .user_agent(&config.network.user_agent)
            .default_headers(headers)
            .connect_timeout(Duration::from_secs(config.network.http_timeout_secs))
            .danger_accept_invalid_certs(options.skip_tls)
            .build()?;

        Ok(Self {
            client,
            github: config.github.clone(),
            download_timeout: Duration::from_secs(config.network.download_timeout_secs),
            debug: options.debug,
        })
    }

    /// Get the latest published release
    pub async fn get_latest(&self) -> Result<Release> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.github.api_url.trim_end_matches('/'),
            self.github.repo_owner,
            self.github.repo_name
        );

        debug!("Fetching latest release from: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::release_not_found(self.github.slug()));
        }
        if !status.is_success() {
            let detail = self.error_detail(response).await;
            return Err(Error::http(status.as_u16(), url, detail));
        }

        let release: Release = response.json().await?;
        if release.draft {
            return Err(Error::release_not_found(self.github.slug()));
        }

        info!("Latest release: {}", release.tag_name);
        Ok(release)
    }

    /// Stream the release source tarball into `dest_dir`.
    ///
    /// Returns the path of the written `.tar.gz`.
    pub async fn download_tarball(
        &self,
        release: &Release,
        dest_dir: &Path,
        show_progress: bool,
    ) -> Result<PathBuf> {
        let file_path = dest_dir.join(self.archive_name(release));
        info!("Downloading {} to {}", release.tarball_url, file_path.display());

        let response = self
            .client
            .get(&release.tarball_url)
            .timeout(self.download_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = self.error_detail(response).await;
            return Err(Error::http(status.as_u16(), release.tarball_url.clone(), detail));
        }

        let bar = match (show_progress, response.content_length()) {
            (true, Some(len)) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::with_template(
                        "{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
                );
                pb
            }
            _ => ProgressBar::hidden(),
        };
        bar.set_message(release.tag_name.clone());

        let mut file = tokio::fs::File::create(&file_path).await?;
        let mut downloaded = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            bar.set_position(downloaded);
        }
        file.flush().await?;
        bar.finish_and_clear();

        debug!("Downloaded {} bytes", downloaded);
        Ok(file_path)
    }

    /// File name used for a downloaded source tarball
    pub fn archive_name(&self, release: &Release) -> String {
        format!("{}-{}.tar.gz", self.github.repo_name, release.tag_name)
    }

    async fn error_detail(&self, response: reqwest::Response) -> Option<String> {
        if !self.debug {
            return None;
        }
        let body = response.text().await.ok()?;
        Some(body.chars().take(400).collect())
    }
}
