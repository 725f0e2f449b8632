//! The "download" action shared by the navbar and the download section.
//!
//! With a resolved asset URL the action saves the package straight to disk
//! and nothing else is opened. Without one (still loading, or every fetch
//! failed) it falls back to opening the public releases page.

mod navigator;

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::path::PathBuf;

use crate::release::ReleaseDescriptor;

pub use navigator::{SystemNavigator, file_name_from_url};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Navigator: Send + Sync {
    /// Fetches `url` directly to disk without navigating anywhere.
    async fn save_to_disk(&self, url: &str) -> Result<PathBuf>;

    /// Opens `url` as a page in a new browser context.
    fn open_in_new_context(&self, url: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The package was written to this path.
    Saved(PathBuf),
    /// No asset URL was known; this page was opened instead.
    OpenedFallback(String),
}

pub struct DownloadTrigger<N: Navigator> {
    navigator: N,
    fallback_url: String,
}

impl<N: Navigator> DownloadTrigger<N> {
    pub fn new(navigator: N, fallback_url: impl Into<String>) -> Self {
        Self {
            navigator,
            fallback_url: fallback_url.into(),
        }
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    #[tracing::instrument(skip(self, descriptor))]
    pub async fn activate(&self, descriptor: Option<&ReleaseDescriptor>) -> Result<DownloadOutcome> {
        match descriptor.filter(|d| !d.download_url.is_empty()) {
            Some(descriptor) => {
                info!("Downloading {} ({})", descriptor.version, descriptor.size);
                let path = self.navigator.save_to_disk(&descriptor.download_url).await?;
                Ok(DownloadOutcome::Saved(path))
            }
            None => {
                info!("No package resolved yet, opening {}", self.fallback_url);
                self.navigator.open_in_new_context(&self.fallback_url)?;
                Ok(DownloadOutcome::OpenedFallback(self.fallback_url.clone()))
            }
        }
    }
}
