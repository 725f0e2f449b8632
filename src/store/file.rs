use anyhow::{Context, Result};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::runtime::Runtime;

use super::KeyValueStore;

const STORAGE_FILE: &str = "storage.json";

/// Values are kept as raw JSON so a slot this crate cannot read survives
/// writes to the other slots.
type Slots = BTreeMap<String, serde_json::Value>;

/// Store backed by a single JSON object file (`{"slot": "value", ...}`).
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename. Writers within one process are serialized; across processes the
/// last rename wins.
pub struct FileStore<R: Runtime> {
    runtime: R,
    dir: PathBuf,
    lock: Mutex<()>,
}

impl<R: Runtime> FileStore<R> {
    pub fn new(runtime: R, dir: PathBuf) -> Self {
        Self {
            runtime,
            dir,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE)
    }

    /// Reads every slot. A missing file is empty; an unreadable one is an
    /// error. Syntactically broken JSON is empty, since no slot in it can be
    /// recovered.
    fn load(&self, path: &Path) -> Result<Slots> {
        if !self.runtime.exists(path) {
            return Ok(Slots::new());
        }

        let content = self
            .runtime
            .read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        match serde_json::from_str(&content) {
            Ok(slots) => Ok(slots),
            Err(e) => {
                warn!("Ignoring corrupted storage file {}: {}", path.display(), e);
                Ok(Slots::new())
            }
        }
    }

    #[tracing::instrument(skip(self, slots))]
    fn save(&self, path: &Path, slots: &Slots) -> Result<()> {
        self.runtime
            .create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;

        let json = serde_json::to_string_pretty(slots)?;
        let tmp = path.with_extension("json.tmp");
        self.runtime.write(&tmp, json.as_bytes())?;
        self.runtime
            .rename(&tmp, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Saved {} slot(s) to {}", slots.len(), path.display());
        Ok(())
    }

    fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Slots),
    {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let path = self.path();
        let mut slots = self.load(&path)?;
        apply(&mut slots);
        self.save(&path, &slots)
    }
}

impl<R: Runtime> KeyValueStore for FileStore<R> {
    #[tracing::instrument(skip(self))]
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let path = self.path();
        let mut slots = match self.load(&path) {
            Ok(slots) => slots,
            Err(e) => {
                warn!("{:#}", e);
                return None;
            }
        };

        match slots.remove(key)? {
            serde_json::Value::String(value) => Some(value),
            other => {
                debug!("Slot {} in {} is not a string: {}", key, path.display(), other);
                None
            }
        }
    }

    #[tracing::instrument(skip(self, value))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|slots| {
            slots.insert(key.to_string(), serde_json::Value::String(value.to_string()));
        })
    }

    #[tracing::instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<()> {
        self.update(|slots| {
            slots.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};
    use mockall::predicate::eq;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(RealRuntime, dir.path().join("aniflux"));
        assert_eq!(store.get("aniflux-release"), None);
    }

    #[test]
    fn test_set_creates_directory_and_persists_across_instances() {
        let dir = tempdir().unwrap();
        let cache_dir = dir.path().join("nested/aniflux");

        let store = FileStore::new(RealRuntime, cache_dir.clone());
        store.set("aniflux-stars", "42").unwrap();
        store.set("aniflux-release", r#"{"downloadUrl":"U"}"#).unwrap();
        drop(store);

        let reopened = FileStore::new(RealRuntime, cache_dir.clone());
        assert_eq!(reopened.get("aniflux-stars").as_deref(), Some("42"));
        assert_eq!(
            reopened.get("aniflux-release").as_deref(),
            Some(r#"{"downloadUrl":"U"}"#)
        );
        assert!(!cache_dir.join("storage.json.tmp").exists());
    }

    #[test]
    fn test_set_overwrites_and_remove_clears() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(RealRuntime, dir.path().to_path_buf());

        store.set("aniflux-stars", "1").unwrap();
        store.set("aniflux-stars", "2").unwrap();
        assert_eq!(store.get("aniflux-stars").as_deref(), Some("2"));

        store.remove("aniflux-stars").unwrap();
        assert_eq!(store.get("aniflux-stars"), None);
    }

    #[test]
    fn test_corrupted_file_reads_as_empty_and_is_replaced_on_write() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(RealRuntime, dir.path().to_path_buf());
        std::fs::write(store.path(), "this is not json").unwrap();

        assert_eq!(store.get("aniflux-stars"), None);

        store.set("aniflux-stars", "7").unwrap();
        assert_eq!(store.get("aniflux-stars").as_deref(), Some("7"));
    }

    #[test]
    fn test_unreadable_file_reads_as_absent() {
        let dir = PathBuf::from("/cache/aniflux");
        let path = dir.join("storage.json");

        let mut runtime = MockRuntime::new();
        runtime
            .expect_exists()
            .with(eq(path.clone()))
            .returning(|_| true);
        runtime
            .expect_read_to_string()
            .with(eq(path))
            .returning(|_| Err(anyhow::anyhow!("permission denied")));

        let store = FileStore::new(runtime, dir);
        assert_eq!(store.get("aniflux-release"), None);
    }

    #[test]
    fn test_unreadable_file_is_never_overwritten() {
        let dir = PathBuf::from("/cache/aniflux");

        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| true);
        runtime
            .expect_read_to_string()
            .returning(|_| Err(anyhow::anyhow!("EIO")));
        runtime.expect_create_dir_all().never();
        runtime.expect_write().never();
        runtime.expect_rename().never();

        let store = FileStore::new(runtime, dir);
        let err = store.set("aniflux-stars", "9").unwrap_err();
        assert!(format!("{:#}", err).contains("EIO"));
        assert!(store.remove("aniflux-release").is_err());
    }

    #[test]
    fn test_unknown_values_survive_writes_to_other_slots() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(RealRuntime, dir.path().to_path_buf());
        std::fs::write(
            store.path(),
            r#"{"aniflux-release": "R", "aniflux-stars": 12, "theme": {"dark": true}}"#,
        )
        .unwrap();

        assert_eq!(store.get("aniflux-stars"), None);
        store.set("aniflux-stars", "13").unwrap();

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(
            saved,
            serde_json::json!({
                "aniflux-release": "R",
                "aniflux-stars": "13",
                "theme": {"dark": true},
            })
        );
        assert_eq!(store.get("aniflux-release").as_deref(), Some("R"));
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = PathBuf::from("/readonly/aniflux");

        let mut runtime = MockRuntime::new();
        runtime.expect_exists().returning(|_| false);
        runtime
            .expect_create_dir_all()
            .returning(|_| Err(anyhow::anyhow!("read-only file system")));

        let store = FileStore::new(runtime, dir);
        let err = store.set("aniflux-stars", "3").unwrap_err();
        assert!(format!("{:#}", err).contains("read-only"));
    }
}
