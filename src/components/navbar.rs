use crate::github::GitHubRepo;
use crate::poll::FeedUpdate;
use crate::release::{ReleaseDescriptor, ReleaseFetcher};
use crate::stars::StarCountFetcher;

/// Top navigation bar: brand, star count and the "Get App" action.
#[derive(Debug, Clone, PartialEq)]
pub struct Navbar {
    stars: Option<u64>,
    release: Option<ReleaseDescriptor>,
    repo_page: String,
    fallback_url: String,
}

impl Navbar {
    pub fn new(repo: &GitHubRepo, web_url: &str) -> Self {
        Self {
            stars: None,
            release: None,
            repo_page: format!("{}/{}", web_url.trim_end_matches('/'), repo),
            fallback_url: repo.latest_release_page(web_url),
        }
    }

    /// Shows whatever is cached before any request is made.
    pub fn mount(&mut self, release: &ReleaseFetcher, stars: &StarCountFetcher) {
        self.stars = stars.load_cached();
        self.release = release.load_cached();
    }

    pub fn apply(&mut self, update: &FeedUpdate) {
        match update {
            FeedUpdate::Release(Some(descriptor)) => self.release = Some(descriptor.clone()),
            FeedUpdate::Release(None) => {}
            FeedUpdate::Stars(count) => self.stars = Some(*count),
        }
    }

    pub fn stars(&self) -> Option<u64> {
        self.stars
    }

    pub fn release(&self) -> Option<&ReleaseDescriptor> {
        self.release.as_ref()
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    /// Where "Get App" leads: the package itself, or the latest release page.
    pub fn download_target(&self) -> &str {
        match &self.release {
            Some(d) if !d.download_url.is_empty() => &d.download_url,
            _ => &self.fallback_url,
        }
    }

    pub fn render(&self) -> String {
        let stars = match self.stars {
            Some(count) => format!(" {} ★", count),
            None => String::new(),
        };
        format!(
            "AniFlux | Star on GitHub{} <{}> | Get App <{}>",
            stars,
            self.repo_page,
            self.download_target()
        )
    }
}
