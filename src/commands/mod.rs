//! Command handlers behind the `aniflux` binary.

pub mod cache;
pub mod config;
mod download;
pub mod services;
mod status;
mod watch;

pub use download::{Source, download, print_outcome, system_navigator};
pub use status::status;
pub use watch::watch;
