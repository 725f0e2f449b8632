use std::sync::Arc;

use log::{debug, info, warn};

use crate::github::{GitHubApi, GitHubRepo};
use crate::http::log_refresh_failure;
use crate::store::{KeyValueStore, RELEASE_SLOT};

use super::descriptor::ReleaseDescriptor;

/// Package extension of the Android build.
pub const DEFAULT_PACKAGE_EXTENSION: &str = ".apk";

/// Keeps the cached release descriptor in step with the latest upstream release.
///
/// Every failure is swallowed here: callers only ever see "a descriptor" or
/// "nothing new", and the cached slot is left alone unless a fetch succeeds.
#[derive(Clone)]
pub struct ReleaseFetcher {
    github: Arc<dyn GitHubApi>,
    store: Arc<dyn KeyValueStore>,
    repo: GitHubRepo,
    extension: String,
}

impl ReleaseFetcher {
    pub fn new(github: Arc<dyn GitHubApi>, store: Arc<dyn KeyValueStore>, repo: GitHubRepo) -> Self {
        Self {
            github,
            store,
            repo,
            extension: DEFAULT_PACKAGE_EXTENSION.to_string(),
        }
    }

    /// Selects assets ending in `extension` instead of `.apk`.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn repo(&self) -> &GitHubRepo {
        &self.repo
    }

    /// Reads the cached descriptor, if any.
    pub fn load_cached(&self) -> Option<ReleaseDescriptor> {
        let cached = self.store.get(RELEASE_SLOT)?;
        let descriptor = ReleaseDescriptor::parse(&cached);
        if descriptor.is_none() {
            debug!("Ignoring malformed cached release: {:?}", cached);
        }
        descriptor
    }

    /// Asks upstream for the latest release and derives a descriptor from it.
    #[tracing::instrument(skip(self), fields(repo = %self.repo))]
    pub async fn fetch_latest(&self) -> Option<ReleaseDescriptor> {
        let release = match self.github.latest_release(&self.repo).await {
            Ok(release) => release,
            Err(e) => {
                log_refresh_failure("release", &e);
                return None;
            }
        };

        let descriptor = ReleaseDescriptor::from_release(&release, &self.extension);
        if descriptor.is_none() {
            debug!(
                "Release {} of {} has no asset ending in {}",
                release.version_label(),
                self.repo,
                self.extension
            );
        }
        descriptor
    }

    /// Overwrites the cached slot.
    pub fn persist(&self, descriptor: &ReleaseDescriptor) {
        if let Err(e) = self.store.set(RELEASE_SLOT, &descriptor.to_json()) {
            warn!("Failed to cache release {}: {:#}", descriptor.version, e);
        }
    }

    /// Fetches and, on success, caches the latest descriptor.
    pub async fn refresh(&self) -> Option<ReleaseDescriptor> {
        let descriptor = self.fetch_latest().await?;
        info!(
            "Latest release of {}: {} ({})",
            self.repo, descriptor.version, descriptor.size
        );
        self.persist(&descriptor);
        Some(descriptor)
    }
}
