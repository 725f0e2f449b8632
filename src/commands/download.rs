use std::path::PathBuf;

use anyhow::Result;

use crate::{
    download::{DownloadOutcome, DownloadTrigger, Navigator, SystemNavigator},
    runtime::Runtime,
};

use super::services::Services;

/// Which component's button was pressed. They differ only in fallback page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Source {
    /// "Get App": falls back to the latest release page
    Navbar,
    /// "Download APK": falls back to the release listing
    #[default]
    Section,
}

/// Refreshes once, then presses the download button of `source`.
#[tracing::instrument(skip(services, navigator))]
pub async fn download<N: Navigator>(
    services: &Services,
    navigator: N,
    source: Source,
) -> Result<DownloadOutcome> {
    let mut landing = services.landing();
    landing.refresh_once().await;

    let (descriptor, fallback) = match source {
        Source::Navbar => (
            landing.navbar.release().cloned(),
            landing.navbar.fallback_url().to_string(),
        ),
        Source::Section => (
            landing.download_section.release().cloned(),
            landing.download_section.fallback_url().to_string(),
        ),
    };

    DownloadTrigger::new(navigator, fallback)
        .activate(descriptor.as_ref())
        .await
}

/// Builds the real navigator: downloads go to `dir` (or the user's download
/// folder), fallback pages open in the browser unless `no_browser` is set.
pub fn system_navigator<R: Runtime>(
    runtime: R,
    services: &Services,
    dir: Option<PathBuf>,
    no_browser: bool,
) -> Result<SystemNavigator<R>> {
    let dir = match dir {
        Some(dir) => dir,
        None => runtime
            .download_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot determine a download directory; pass --dir"))?,
    };
    Ok(SystemNavigator::new(runtime, services.http_client.clone(), dir).launch_browser(!no_browser))
}

pub fn print_outcome(outcome: &DownloadOutcome, no_browser: bool) {
    match outcome {
        DownloadOutcome::Saved(path) => println!("Saved {}", path.display()),
        DownloadOutcome::OpenedFallback(url) if no_browser => {
            println!("No package available yet, see {}", url)
        }
        DownloadOutcome::OpenedFallback(url) => println!("Opened {}", url),
    }
}
