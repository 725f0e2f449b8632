//! Service factory for building application dependencies.
//!
//! Services (HTTP client, GitHub client, cache store, fetchers) are built
//! from configuration values but are not part of the configuration itself.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{
    components::Landing,
    github::{GitHub, GitHubApi},
    http::HttpClient,
    release::ReleaseFetcher,
    runtime::Runtime,
    stars::StarCountFetcher,
    store::{FileStore, KeyValueStore},
};

use super::config::Config;

const USER_AGENT: &str = "aniflux-site";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build an HTTP client with optional authentication token
pub fn build_http_client(token: Option<&str>) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();

    if let Some(token) = token {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        debug!("HTTP client configured with authentication");
    }

    let client = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    Ok(HttpClient::new(client))
}

/// Everything the commands need, sharing one HTTP client and one store.
pub struct Services {
    pub config: Config,
    pub http_client: HttpClient,
    pub github: Arc<dyn GitHubApi>,
    pub store: Arc<dyn KeyValueStore>,
}

impl Services {
    pub fn from_config<R: Runtime + 'static>(runtime: R, config: Config) -> Result<Self> {
        let http_client = build_http_client(config.token.as_deref())?;
        let github = GitHub::new(http_client.clone(), Some(config.api_url.clone()));
        let store = FileStore::new(runtime, config.cache_dir.clone());

        Ok(Self {
            http_client,
            github: Arc::new(github),
            store: Arc::new(store),
            config,
        })
    }

    pub fn release_fetcher(&self) -> ReleaseFetcher {
        ReleaseFetcher::new(
            self.github.clone(),
            self.store.clone(),
            self.config.repo.clone(),
        )
        .with_extension(self.config.extension.clone())
    }

    pub fn star_fetcher(&self) -> StarCountFetcher {
        StarCountFetcher::new(
            self.github.clone(),
            self.store.clone(),
            self.config.repo.clone(),
        )
    }

    /// Both components, mounted from the cache.
    pub fn landing(&self) -> Landing {
        let mut landing = Landing::new(
            self.release_fetcher(),
            self.star_fetcher(),
            &self.config.web_url,
        );
        landing.mount();
        landing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GitHubRepo;
    use crate::runtime::RealRuntime;
    use crate::store::{RELEASE_SLOT, STARS_SLOT};
    use mockito::{Matcher, Server};
    use std::path::PathBuf;

    fn config(cache_dir: PathBuf, api_url: String) -> Config {
        Config {
            api_url,
            web_url: "https://github.com".to_string(),
            repo: "som120/AniFlux".parse::<GitHubRepo>().unwrap(),
            token: None,
            cache_dir,
            extension: ".apk".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_http_client_with_token() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .match_header(
                "Authorization",
                Matcher::Exact("Bearer test_token".to_string()),
            )
            .match_header("User-Agent", "aniflux-site")
            .create();

        let http_client = build_http_client(Some("test_token")).unwrap();
        let _ = http_client.inner().get(server.url()).send().await;

        mock.assert();
    }

    #[tokio::test]
    async fn test_build_http_client_without_token() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/")
            .match_header("Authorization", Matcher::Missing)
            .create();

        let http_client = build_http_client(None).unwrap();
        let _ = http_client.inner().get(server.url()).send().await;

        mock.assert();
    }

    #[test]
    fn test_build_http_client_rejects_invalid_token() {
        assert!(build_http_client(Some("bad\ntoken")).is_err());
    }

    #[tokio::test]
    async fn test_services_share_one_store() {
        let mut server = Server::new_async().await;
        let _release = server
            .mock("GET", "/repos/som120/AniFlux/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"tag_name": "v1", "assets": [{"name": "a.apk", "size": 1024, "browser_download_url": "https://dl/a.apk"}]}"#,
            )
            .create_async()
            .await;
        let _repo = server
            .mock("GET", "/repos/som120/AniFlux")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"stargazers_count": 4}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let services =
            Services::from_config(RealRuntime, config(dir.path().to_path_buf(), server.url()))
                .unwrap();

        assert!(services.release_fetcher().refresh().await.is_some());
        assert!(services.star_fetcher().refresh().await.is_some());

        assert!(services.store.get(RELEASE_SLOT).is_some());
        assert_eq!(services.store.get(STARS_SLOT).as_deref(), Some("4"));

        let landing = services.landing();
        assert_eq!(landing.navbar.stars(), Some(4));
        assert_eq!(landing.download_section.download_target(), "https://dl/a.apk");
    }
}
