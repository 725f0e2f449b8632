//! Environment and platform directory lookups.

use std::env;
use std::path::PathBuf;

use super::RealRuntime;

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) fn env_var_impl(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) fn cache_dir_impl(&self) -> Option<PathBuf> {
        dirs::cache_dir()
    }

    /// The user's download folder, falling back to the current directory.
    #[tracing::instrument(skip(self))]
    pub(crate) fn download_dir_impl(&self) -> Option<PathBuf> {
        dirs::download_dir().or_else(|| env::current_dir().ok())
    }
}
