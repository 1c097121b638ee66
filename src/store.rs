//! Persisted key-value capability.
//!
//! The search engine remembers the last typed query across sessions. The
//! capability is a trait so the engine under test needs only the in-memory
//! fake; the real implementation keeps one file per key under the platform
//! data directory.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const STORE_DIR: &str = "pcsearch";

/// Minimal persisted string store. Writes are best-effort: persistence
/// failures must never break the search session, so implementations log and
/// swallow errors.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// File-backed store under `<data_dir>/pcsearch/<key>`.
#[derive(Debug, Default)]
pub struct FileStore;

impl FileStore {
    pub fn new() -> Self {
        Self
    }

    fn path_for(key: &str) -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join(STORE_DIR).join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = Self::path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents.trim_end_matches('\n').to_string()),
            Err(_) => None,
        }
    }

    /// No file locking - last writer wins if multiple instances run simultaneously.
    fn set(&mut self, key: &str, value: &str) {
        let Some(path) = Self::path_for(key) else {
            log::warn!("No data directory available; not persisting '{}'", key);
            return;
        };

        let result = path
            .parent()
            .map(fs::create_dir_all)
            .unwrap_or(Ok(()))
            .and_then(|_| fs::write(&path, value));

        if let Err(e) = result {
            log::warn!("Failed to persist '{}' to {:?}: {}", key, path, e);
        }
    }
}

/// In-memory store for tests and for running with persistence disabled.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with a single entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}
