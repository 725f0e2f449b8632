//! GitHub REST API: the latest-release and repository-metadata endpoints.

mod client;
mod repo;
mod types;

pub use client::{DEFAULT_API_URL, GitHub, GitHubApi};
#[cfg(test)]
pub use client::MockGitHubApi;
pub use repo::{DEFAULT_WEB_URL, GitHubRepo};
pub use types::{LatestRelease, ReleaseAsset, RepoMetadata};
