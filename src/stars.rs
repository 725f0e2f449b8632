//! Repository star count with the same cache-then-refresh lifecycle as releases.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::github::{GitHubApi, GitHubRepo};
use crate::http::log_refresh_failure;
use crate::store::{KeyValueStore, STARS_SLOT};

#[derive(Clone)]
pub struct StarCountFetcher {
    github: Arc<dyn GitHubApi>,
    store: Arc<dyn KeyValueStore>,
    repo: GitHubRepo,
}

impl StarCountFetcher {
    pub fn new(github: Arc<dyn GitHubApi>, store: Arc<dyn KeyValueStore>, repo: GitHubRepo) -> Self {
        Self { github, store, repo }
    }

    /// Reads the cached count. A slot that is not an integer reads as absent.
    pub fn load_cached(&self) -> Option<u64> {
        let cached = self.store.get(STARS_SLOT)?;
        match cached.trim().parse() {
            Ok(count) => Some(count),
            Err(_) => {
                debug!("Ignoring malformed cached star count: {:?}", cached);
                None
            }
        }
    }

    #[tracing::instrument(skip(self), fields(repo = %self.repo))]
    pub async fn fetch(&self) -> Option<u64> {
        match self.github.repo_metadata(&self.repo).await {
            Ok(metadata) => {
                if metadata.stargazers_count.is_none() {
                    debug!("Repository metadata of {} has no star count", self.repo);
                }
                metadata.stargazers_count
            }
            Err(e) => {
                log_refresh_failure("star count", &e);
                None
            }
        }
    }

    pub fn persist(&self, count: u64) {
        if let Err(e) = self.store.set(STARS_SLOT, &count.to_string()) {
            warn!("Failed to cache star count: {:#}", e);
        }
    }

    pub async fn refresh(&self) -> Option<u64> {
        let count = self.fetch().await?;
        info!("{} has {} stars", self.repo, count);
        self.persist(count);
        Some(count)
    }
}
