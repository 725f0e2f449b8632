use anyhow::{Context, Result};
use log::debug;
use std::path::PathBuf;

use crate::{
    github::{DEFAULT_API_URL, DEFAULT_WEB_URL, GitHubRepo},
    release::DEFAULT_PACKAGE_EXTENSION,
    runtime::Runtime,
};

/// Repository whose releases the site advertises.
pub const DEFAULT_REPO: &str = "som120/AniFlux";

/// Values given on the command line (or through their environment variables).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub web_url: Option<String>,
    pub repo: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub extension: Option<String>,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub web_url: String,
    pub repo: GitHubRepo,
    pub token: Option<String>,
    pub cache_dir: PathBuf,
    pub extension: String,
}

impl Config {
    pub fn load<R: Runtime>(runtime: &R, overrides: ConfigOverrides) -> Result<Self> {
        let repo = overrides
            .repo
            .as_deref()
            .unwrap_or(DEFAULT_REPO)
            .parse::<GitHubRepo>()?;

        let cache_dir = match overrides.cache_dir {
            Some(dir) => dir,
            None => runtime
                .cache_dir()
                .map(|dir| dir.join("aniflux"))
                .context("Cannot determine a cache directory; pass --cache-dir")?,
        };

        let token = runtime
            .env_var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        if token.is_some() {
            debug!("Using GITHUB_TOKEN for authentication");
        }

        let extension = overrides
            .extension
            .unwrap_or_else(|| DEFAULT_PACKAGE_EXTENSION.to_string());
        if extension.is_empty() {
            anyhow::bail!("Package extension cannot be empty");
        }

        Ok(Self {
            api_url: overrides
                .api_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            web_url: overrides
                .web_url
                .unwrap_or_else(|| DEFAULT_WEB_URL.to_string()),
            repo,
            token,
            cache_dir,
            extension,
        })
    }
}
