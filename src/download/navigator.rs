use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use std::path::{Path, PathBuf};

use crate::http::HttpClient;
use crate::runtime::Runtime;

use super::Navigator;

const DEFAULT_FILE_NAME: &str = "download";

/// Last non-empty path segment of `url`, ignoring query and fragment.
pub fn file_name_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}

/// Saves packages into a download directory and opens pages in the
/// system browser.
pub struct SystemNavigator<R: Runtime> {
    runtime: R,
    http_client: HttpClient,
    download_dir: PathBuf,
    launch_browser: bool,
}

impl<R: Runtime> SystemNavigator<R> {
    pub fn new(runtime: R, http_client: HttpClient, download_dir: PathBuf) -> Self {
        Self {
            runtime,
            http_client,
            download_dir,
            launch_browser: true,
        }
    }

    /// When disabled, fallback pages are only reported, never launched.
    pub fn launch_browser(mut self, launch: bool) -> Self {
        self.launch_browser = launch;
        self
    }

    fn discard_partial(&self, partial: &Path) {
        if !self.runtime.exists(partial) {
            return;
        }
        if let Err(e) = self.runtime.remove_file(partial) {
            warn!("Failed to remove partial download {}: {:#}", partial.display(), e);
        }
    }
}

#[async_trait]
impl<R: Runtime> Navigator for SystemNavigator<R> {
    #[tracing::instrument(skip(self))]
    async fn save_to_disk(&self, url: &str) -> Result<PathBuf> {
        self.runtime
            .create_dir_all(&self.download_dir)
            .with_context(|| format!("Failed to create {}", self.download_dir.display()))?;

        let target = self.download_dir.join(file_name_from_url(url));
        let partial = target.with_file_name(format!(
            "{}.part",
            target
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        ));

        info!("Downloading {} to {}...", url, target.display());
        let result = self
            .http_client
            .download_file(url, || {
                self.runtime
                    .create_file(&partial)
                    .with_context(|| format!("Failed to create {}", partial.display()))
            })
            .await;

        let bytes = match result {
            Ok(bytes) => bytes,
            Err(e) => {
                self.discard_partial(&partial);
                return Err(e);
            }
        };

        if let Err(e) = self.runtime.rename(&partial, &target) {
            self.discard_partial(&partial);
            return Err(e.context(format!("Failed to move download to {}", target.display())));
        }

        debug!("Saved {} bytes to {}", bytes, target.display());
        Ok(target)
    }

    fn open_in_new_context(&self, url: &str) -> Result<()> {
        if !self.launch_browser {
            debug!("Browser launch disabled, not opening {}", url);
            return Ok(());
        }
        opener::open_browser(url).with_context(|| format!("Failed to open {} in a browser", url))
    }
}
