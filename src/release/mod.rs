//! Release descriptor: fetch, cache and format the latest downloadable package.

mod descriptor;
mod fetcher;
mod size;

pub use descriptor::ReleaseDescriptor;
pub use fetcher::{DEFAULT_PACKAGE_EXTENSION, ReleaseFetcher};
pub use size::format_bytes;
