use crate::domain::ports::KeyValueStore;
use crate::domain::roster::RosterSnapshot;
use crate::utils::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Key-value store kept as one JSON object on disk. A missing file is an
/// empty store.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

pub fn load_snapshot<K: KeyValueStore + ?Sized>(store: &K, key: &str) -> Result<RosterSnapshot> {
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => {
            tracing::debug!("No roster snapshot under '{}', starting fresh", key);
            Ok(RosterSnapshot::default())
        }
    }
}

pub fn save_snapshot<K: KeyValueStore + ?Sized>(
    store: &mut K,
    key: &str,
    snapshot: &RosterSnapshot,
) -> Result<()> {
    let raw = serde_json::to_string(snapshot)?;
    store.set(key, &raw)?;
    tracing::debug!("Saved {} roster records under '{}'", snapshot.players.len(), key);
    Ok(())
}
