//! Live release data for the AniFlux landing page: the latest Android
//! package and the repository star count, cached locally and kept fresh by
//! polling the GitHub API.

pub mod commands;
pub mod components;
pub mod download;
pub mod github;
pub mod http;
pub mod poll;
pub mod release;
pub mod runtime;
pub mod stars;
pub mod store;
