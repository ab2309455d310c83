//! Storage - Key/Value Stores
//!
//! `localStorage` and `sessionStorage` stand-ins. The file store persists
//! across runs; the memory store lives as long as the page.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::helpers::get_or_create_data_dir;

/// String key/value storage
pub trait KeyValueStore: std::fmt::Debug {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;
}

/// Storage held in memory only
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store
    pub fn with_items<'a>(items: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Storage persisted as a JSON object in a single file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`; a missing or unreadable file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let items = match Self::read(&path) {
            Ok(items) => items,
            Err(e) => {
                warn!(path = ?path, error = %e, "Ignoring unreadable storage file");
                BTreeMap::new()
            }
        };
        debug!(path = ?path, items = items.len(), "Opened file store");
        Self { path, items }
    }

    /// Open `local-storage.json` in the application data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(get_or_create_data_dir()?.join("local-storage.json")))
    }

    fn read(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn flush(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.items)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        if self.items.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::with_items([("pacific-panama-language", "es")]);
        assert_eq!(store.get_item("pacific-panama-language").as_deref(), Some("es"));

        store.set_item("pacific-panama-language", "en").expect("set");
        assert_eq!(store.get_item("pacific-panama-language").as_deref(), Some("en"));

        store.remove_item("pacific-panama-language").expect("remove");
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("local-storage.json");

        let mut store = FileStore::open(&path);
        assert_eq!(store.get_item("pacific-panama-language"), None);
        store.set_item("pacific-panama-language", "es").expect("set");

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get_item("pacific-panama-language").as_deref(), Some("es"));
    }

    #[test]
    fn test_file_store_recovers_from_corrupt_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("local-storage.json");
        fs::write(&path, "{not json").expect("write");

        let mut store = FileStore::open(&path);
        assert_eq!(store.get_item("anything"), None);
        store.set_item("k", "v").expect("set");
        assert_eq!(FileStore::open(&path).get_item("k").as_deref(), Some("v"));
    }
}
