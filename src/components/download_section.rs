use crate::github::GitHubRepo;
use crate::poll::FeedUpdate;
use crate::release::{ReleaseDescriptor, ReleaseFetcher};

/// The "Ready to flux?" call-to-action with the package download button.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSection {
    release: Option<ReleaseDescriptor>,
    loading: bool,
    fallback_url: String,
}

impl DownloadSection {
    pub fn new(repo: &GitHubRepo, web_url: &str) -> Self {
        Self {
            release: None,
            loading: true,
            fallback_url: repo.releases_page(web_url),
        }
    }

    /// Shows the cached descriptor, if any. A cache hit ends the loading state.
    pub fn mount(&mut self, release: &ReleaseFetcher) {
        if let Some(cached) = release.load_cached() {
            self.release = Some(cached);
            self.loading = false;
        }
    }

    /// Records the result of a refresh. Loading ends either way; a failure
    /// keeps what is shown.
    pub fn finish_refresh(&mut self, result: Option<ReleaseDescriptor>) {
        if let Some(descriptor) = result {
            self.release = Some(descriptor);
        }
        self.loading = false;
    }

    pub fn apply(&mut self, update: &FeedUpdate) {
        if let FeedUpdate::Release(result) = update {
            self.finish_refresh(result.clone());
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn release(&self) -> Option<&ReleaseDescriptor> {
        self.release.as_ref()
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    pub fn download_target(&self) -> &str {
        match &self.release {
            Some(d) if !d.download_url.is_empty() => &d.download_url,
            _ => &self.fallback_url,
        }
    }

    pub fn render(&self) -> String {
        let label = match (&self.release, self.loading) {
            (Some(d), _) => format!("Download APK ({} • {})", d.version, d.size),
            (None, true) => "Download APK (loading...)".to_string(),
            (None, false) => "Download APK".to_string(),
        };
        format!(
            "Ready to flux?\n  Google Play (coming soon)\n  {} <{}>",
            label,
            self.download_target()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{DEFAULT_WEB_URL, MockGitHubApi};
    use crate::store::{MemoryStore, RELEASE_SLOT};
    use std::sync::Arc;

    fn repo() -> GitHubRepo {
        "som120/AniFlux".parse().unwrap()
    }

    fn descriptor() -> ReleaseDescriptor {
        ReleaseDescriptor {
            download_url: "https://dl/app.apk".to_string(),
            version: "v2.0.0".to_string(),
            size: "31.2 MB".to_string(),
        }
    }

    #[test]
    fn test_starts_loading_with_releases_page_fallback() {
        let section = DownloadSection::new(&repo(), DEFAULT_WEB_URL);
        assert!(section.is_loading());
        assert_eq!(
            section.download_target(),
            "https://github.com/som120/AniFlux/releases"
        );
        assert!(section.render().contains("Download APK (loading...)"));
    }

    #[test]
    fn test_mount_with_cache_stops_loading() {
        let store = Arc::new(MemoryStore::with_slots([(RELEASE_SLOT, descriptor().to_json())]));
        let fetcher = ReleaseFetcher::new(Arc::new(MockGitHubApi::new()), store, repo());

        let mut section = DownloadSection::new(&repo(), DEFAULT_WEB_URL);
        section.mount(&fetcher);

        assert!(!section.is_loading());
        assert!(section.render().contains("Download APK (v2.0.0 • 31.2 MB) <https://dl/app.apk>"));
    }

    #[test]
    fn test_mount_with_corrupted_cache_keeps_loading() {
        let store = Arc::new(MemoryStore::with_slots([(RELEASE_SLOT, "garbage")]));
        let fetcher = ReleaseFetcher::new(Arc::new(MockGitHubApi::new()), store, repo());

        let mut section = DownloadSection::new(&repo(), DEFAULT_WEB_URL);
        section.mount(&fetcher);

        assert!(section.is_loading());
        assert_eq!(section.release(), None);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_descriptor() {
        let mut section = DownloadSection::new(&repo(), DEFAULT_WEB_URL);
        section.finish_refresh(Some(descriptor()));
        section.finish_refresh(None);

        assert_eq!(section.release(), Some(&descriptor()));
        assert_eq!(section.download_target(), "https://dl/app.apk");
    }

    #[test]
    fn test_failed_first_refresh_without_cache() {
        let mut section = DownloadSection::new(&repo(), DEFAULT_WEB_URL);
        section.finish_refresh(None);

        assert!(!section.is_loading());
        assert!(section.render().contains("Download APK <https://github.com/som120/AniFlux/releases>"));
    }

    #[test]
    fn test_star_updates_are_ignored() {
        let mut section = DownloadSection::new(&repo(), DEFAULT_WEB_URL);
        section.apply(&FeedUpdate::Stars(3));
        assert!(section.is_loading());

        section.apply(&FeedUpdate::Release(Some(descriptor())));
        assert!(!section.is_loading());
    }

    #[test]
    fn test_empty_release_update_ends_loading() {
        let mut section = DownloadSection::new(&repo(), DEFAULT_WEB_URL);
        section.apply(&FeedUpdate::Release(None));

        assert!(!section.is_loading());
        assert!(section.render().contains("Download APK <https://github.com/som120/AniFlux/releases>"));
    }
}
