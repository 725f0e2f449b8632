//! Key-value storage for the cached slots.
//!
//! The fetchers never touch storage directly; they receive an
//! `Arc<dyn KeyValueStore>` so the same cache can be shared by several
//! consumers and swapped for an in-memory store in tests.

mod file;
mod memory;

use anyhow::Result;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Slot holding the serialized release descriptor.
pub const RELEASE_SLOT: &str = "aniflux-release";

/// Slot holding the star count as a plain numeric string.
pub const STARS_SLOT: &str = "aniflux-stars";

/// Persistent string slots, modelled on browser local storage.
///
/// Reads never fail: a slot that cannot be read is reported as absent.
/// Writes are last-writer-wins.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
