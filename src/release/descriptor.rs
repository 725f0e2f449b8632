use serde::{Deserialize, Serialize};

use crate::github::LatestRelease;

use super::size::format_bytes;

/// What the site knows about the newest downloadable package.
///
/// Stored as `{"downloadUrl": .., "version": .., "size": ..}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDescriptor {
    pub download_url: String,
    pub version: String,
    pub size: String,
}

impl ReleaseDescriptor {
    /// Builds a descriptor from the first asset ending in `extension`.
    /// Returns `None` when the release carries no such asset.
    pub fn from_release(release: &LatestRelease, extension: &str) -> Option<Self> {
        let asset = release.find_asset(extension)?;
        Some(Self {
            download_url: asset.browser_download_url.clone(),
            version: release.version_label(),
            size: format_bytes(asset.size),
        })
    }

    /// Parses a cached slot value. Anything that is not a complete
    /// descriptor is treated as absent.
    pub fn parse(cached: &str) -> Option<Self> {
        serde_json::from_str(cached).ok()
    }

    pub fn to_json(&self) -> String {
        // A struct of three strings always serializes
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::ReleaseAsset;

    fn payload(tag: Option<&str>, name: Option<&str>) -> LatestRelease {
        LatestRelease {
            tag_name: tag.map(String::from),
            name: name.map(String::from),
            assets: vec![
                ReleaseAsset {
                    name: "app.txt".to_string(),
                    size: 10,
                    browser_download_url: "T".to_string(),
                },
                ReleaseAsset {
                    name: "app.apk".to_string(),
                    size: 1572864,
                    browser_download_url: "U".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_from_release_picks_package_asset() {
        let descriptor = ReleaseDescriptor::from_release(&payload(Some("v1.4.0"), None), ".apk");
        assert_eq!(
            descriptor,
            Some(ReleaseDescriptor {
                download_url: "U".to_string(),
                version: "v1.4.0".to_string(),
                size: "1.5 MB".to_string(),
            })
        );
    }

    #[test]
    fn test_from_release_version_falls_back() {
        let by_name = ReleaseDescriptor::from_release(&payload(None, Some("Beta")), ".apk").unwrap();
        assert_eq!(by_name.version, "Beta");

        let placeholder = ReleaseDescriptor::from_release(&payload(None, None), ".apk").unwrap();
        assert_eq!(placeholder.version, "Latest");
    }

    #[test]
    fn test_from_release_without_package_asset() {
        assert_eq!(
            ReleaseDescriptor::from_release(&payload(Some("v1"), None), ".ipa"),
            None
        );
    }

    #[test]
    fn test_json_shape() {
        let descriptor = ReleaseDescriptor {
            download_url: "U".to_string(),
            version: "v1".to_string(),
            size: "2 MB".to_string(),
        };
        let value: serde_json::Value = serde_json::from_str(&descriptor.to_json()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"downloadUrl": "U", "version": "v1", "size": "2 MB"})
        );
        assert_eq!(
            ReleaseDescriptor::parse(&descriptor.to_json()),
            Some(descriptor)
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(ReleaseDescriptor::parse("not json"), None);
        assert_eq!(ReleaseDescriptor::parse(""), None);
        assert_eq!(ReleaseDescriptor::parse(r#"{"downloadUrl": "U"}"#), None);
        assert_eq!(ReleaseDescriptor::parse("[1, 2, 3]"), None);
    }
}
