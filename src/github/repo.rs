use anyhow::{Result, anyhow};
use std::str::FromStr;

/// Public web host the fallback release pages live on.
pub const DEFAULT_WEB_URL: &str = "https://github.com";

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
}

impl GitHubRepo {
    /// `{api}/repos/{owner}/{repo}`: repository metadata, including the star count.
    pub fn metadata_url(&self, api_url: &str) -> String {
        format!(
            "{}/repos/{}/{}",
            api_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// `{api}/repos/{owner}/{repo}/releases/latest`
    pub fn latest_release_url(&self, api_url: &str) -> String {
        format!("{}/releases/latest", self.metadata_url(api_url))
    }

    /// Public listing of every release.
    pub fn releases_page(&self, web_url: &str) -> String {
        format!(
            "{}/{}/{}/releases",
            web_url.trim_end_matches('/'),
            self.owner,
            self.repo
        )
    }

    /// Public page of the latest release.
    pub fn latest_release_page(&self, web_url: &str) -> String {
        format!("{}/latest", self.releases_page(web_url))
    }
}

impl std::fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for GitHubRepo {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            Err(anyhow!("Invalid repository format. Expected 'owner/repo'."))
        } else {
            Ok(GitHubRepo {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> GitHubRepo {
        "som120/AniFlux".parse().unwrap()
    }

    #[test]
    fn test_parse_github_repo_valid() {
        assert_eq!(
            repo(),
            GitHubRepo {
                owner: "som120".to_string(),
                repo: "AniFlux".to_string()
            }
        );
        assert_eq!(repo().to_string(), "som120/AniFlux");
    }

    #[test]
    fn test_parse_github_repo_invalid() {
        assert!("som120".parse::<GitHubRepo>().is_err());
        assert!("som120/".parse::<GitHubRepo>().is_err());
        assert!("/AniFlux".parse::<GitHubRepo>().is_err());
        assert!("a/b/c".parse::<GitHubRepo>().is_err());
    }

    #[test]
    fn test_api_urls() {
        assert_eq!(
            repo().metadata_url("https://api.github.com"),
            "https://api.github.com/repos/som120/AniFlux"
        );
        assert_eq!(
            repo().latest_release_url("https://api.github.com/"),
            "https://api.github.com/repos/som120/AniFlux/releases/latest"
        );
    }

    #[test]
    fn test_web_urls() {
        assert_eq!(
            repo().releases_page(DEFAULT_WEB_URL),
            "https://github.com/som120/AniFlux/releases"
        );
        assert_eq!(
            repo().latest_release_page(DEFAULT_WEB_URL),
            "https://github.com/som120/AniFlux/releases/latest"
        );
    }
}
