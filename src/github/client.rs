use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::http::HttpClient;

use super::repo::GitHubRepo;
use super::types::{LatestRelease, RepoMetadata};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The two read-only endpoints the site polls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubApi: Send + Sync {
    async fn latest_release(&self, repo: &GitHubRepo) -> Result<LatestRelease>;
    async fn repo_metadata(&self, repo: &GitHubRepo) -> Result<RepoMetadata>;
}

pub struct GitHub {
    http_client: HttpClient,
    api_url: String,
}

impl GitHub {
    #[tracing::instrument(skip(http_client, api_url))]
    pub fn new(http_client: HttpClient, api_url: Option<String>) -> Self {
        let api_url = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self {
            http_client,
            api_url,
        }
    }
}

#[async_trait]
impl GitHubApi for GitHub {
    #[tracing::instrument(skip(self))]
    async fn latest_release(&self, repo: &GitHubRepo) -> Result<LatestRelease> {
        let url = repo.latest_release_url(&self.api_url);
        debug!("Fetching latest release from {}...", url);
        self.http_client.get_json(&url).await
    }

    #[tracing::instrument(skip(self))]
    async fn repo_metadata(&self, repo: &GitHubRepo) -> Result<RepoMetadata> {
        let url = repo.metadata_url(&self.api_url);
        debug!("Fetching repo metadata from {}...", url);
        self.http_client.get_json(&url).await
    }
}
