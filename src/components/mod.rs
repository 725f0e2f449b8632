//! Terminal renditions of the two landing-page components that show live
//! release data. Both read from the same fetchers and the same cache.

mod download_section;
mod navbar;

use std::time::Duration;

use crate::poll::{FeedUpdate, PollingDriver};
use crate::release::ReleaseFetcher;
use crate::stars::StarCountFetcher;

pub use download_section::DownloadSection;
pub use navbar::Navbar;

/// The live parts of the landing page, wired to one pair of fetchers.
pub struct Landing {
    release: ReleaseFetcher,
    stars: StarCountFetcher,
    pub navbar: Navbar,
    pub download_section: DownloadSection,
}

impl Landing {
    pub fn new(release: ReleaseFetcher, stars: StarCountFetcher, web_url: &str) -> Self {
        let repo = release.repo().clone();
        Self {
            navbar: Navbar::new(&repo, web_url),
            download_section: DownloadSection::new(&repo, web_url),
            release,
            stars,
        }
    }

    /// Renders cached data into both components.
    pub fn mount(&mut self) {
        self.navbar.mount(&self.release, &self.stars);
        self.download_section.mount(&self.release);
    }

    /// One refresh of both fetchers, applied to both components.
    pub async fn refresh_once(&mut self) {
        let (release, stars) = tokio::join!(self.release.refresh(), self.stars.refresh());

        if let Some(count) = stars {
            self.navbar.apply(&FeedUpdate::Stars(count));
        }
        self.apply(&FeedUpdate::Release(release));
    }

    pub fn apply(&mut self, update: &FeedUpdate) {
        self.navbar.apply(update);
        self.download_section.apply(update);
    }

    /// A driver that polls the same fetchers this page reads from.
    pub fn polling_driver(&self, interval: Duration) -> PollingDriver {
        PollingDriver::new(self.release.clone(), self.stars.clone()).with_interval(interval)
    }

    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.navbar.render(), self.download_section.render())
    }
}
