use serde::{Deserialize, Serialize};

/// The subset of `GET /repos/{owner}/{repo}` the site displays.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct RepoMetadata {
    pub stargazers_count: Option<u64>,
}

/// Represents a GitHub release asset
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone)]
pub struct ReleaseAsset {
    pub name: String,
    pub size: u64,
    pub browser_download_url: String,
}

/// Represents the payload of `GET /repos/{owner}/{repo}/releases/latest`
#[derive(Deserialize, Serialize, Debug, PartialEq, Clone, Default)]
pub struct LatestRelease {
    pub tag_name: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

impl LatestRelease {
    /// First asset, in upstream order, whose name ends with `extension`.
    pub fn find_asset(&self, extension: &str) -> Option<&ReleaseAsset> {
        self.assets.iter().find(|a| a.name.ends_with(extension))
    }

    /// Tag, else release name, else `"Latest"`. Empty strings count as missing.
    pub fn version_label(&self) -> String {
        [&self.tag_name, &self.name]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| "Latest".to_string())
    }
}
