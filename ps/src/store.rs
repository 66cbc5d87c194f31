//! Core PrefStore implementation

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors from preference store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access store directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preferences file is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Key not found: {0}")]
    NotFound(String),
}

/// The preferences store
///
/// All keys map to strings. The whole document is rewritten on every
/// mutation; writes go through a temp file then rename so a crash never
/// leaves a half-written prefs file.
pub struct PrefStore {
    base_path: PathBuf,
}

impl PrefStore {
    /// Open or create a preference store at the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).map_err(|source| StoreError::Io {
            path: base_path.clone(),
            source,
        })?;
        debug!(?base_path, "Opened preference store");
        Ok(Self { base_path })
    }

    fn prefs_path(&self) -> PathBuf {
        self.base_path.join(crate::PREFS_FILE)
    }

    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        let path = self.prefs_path();
        if !path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        let value: Value = serde_json::from_str(&content)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    fn save(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        let path = self.prefs_path();
        let tmp = self.base_path.join(format!("{}.tmp", crate::PREFS_FILE));
        let content = serde_json::to_string_pretty(&Value::Object(map.clone()))?;
        fs::write(&tmp, content).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })?;
        Ok(())
    }

    /// Get a preference value
    pub fn get(&self, key: &str) -> Result<String, StoreError> {
        debug!(%key, "PrefStore::get: called");
        let map = self.load()?;
        match map.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }

    /// Set a preference value, overwriting any existing value
    pub fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        debug!(%key, "PrefStore::set: called");
        let mut map = self.load()?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&map)?;
        info!(%key, "Saved preference");
        Ok(())
    }

    /// Delete a preference
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        debug!(%key, "PrefStore::delete: called");
        let mut map = self.load()?;
        if map.remove(key).is_none() {
            return Err(StoreError::NotFound(key.to_string()));
        }
        self.save(&map)?;
        info!(%key, "Deleted preference");
        Ok(())
    }

    /// List all keys
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        debug!("PrefStore::keys: called");
        let map = self.load()?;
        Ok(map.keys().cloned().collect())
    }

    /// All key/value pairs
    pub fn entries(&self) -> Result<Vec<(String, String)>, StoreError> {
        debug!("PrefStore::entries: called");
        let map = self.load()?;
        Ok(map
            .iter()
            .map(|(k, v)| {
                let rendered = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), rendered)
            })
            .collect())
    }

    /// Remove every stored preference
    pub fn clear(&self) -> Result<usize, StoreError> {
        debug!("PrefStore::clear: called");
        let map = self.load()?;
        let count = map.len();
        self.save(&Map::new())?;
        info!(count, "Cleared preferences");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_and_get() {
        let temp = TempDir::new().unwrap();
        let store = PrefStore::open(temp.path()).unwrap();

        store.set("default-location", "Vancouver, BC").unwrap();
        assert_eq!(store.get("default-location").unwrap(), "Vancouver, BC");
    }

    #[test]
    fn test_get_missing_key() {
        let temp = TempDir::new().unwrap();
        let store = PrefStore::open(temp.path()).unwrap();

        let err = store.get("nope").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_overwrite() {
        let temp = TempDir::new().unwrap();
        let store = PrefStore::open(temp.path()).unwrap();

        store.set("preferred-times", "weekday evenings").unwrap();
        store.set("preferred-times", "weekends").unwrap();
        assert_eq!(store.get("preferred-times").unwrap(), "weekends");
    }

    #[test]
    fn test_delete() {
        let temp = TempDir::new().unwrap();
        let store = PrefStore::open(temp.path()).unwrap();

        store.set("a", "1").unwrap();
        store.delete("a").unwrap();
        assert!(store.get("a").is_err());

        let err = store.delete("a").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_keys_and_clear() {
        let temp = TempDir::new().unwrap();
        let store = PrefStore::open(temp.path()).unwrap();

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);

        let cleared = store.clear().unwrap();
        assert_eq!(cleared, 2);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_persists_across_opens() {
        let temp = TempDir::new().unwrap();
        {
            let store = PrefStore::open(temp.path()).unwrap();
            store.set("k", "v").unwrap();
        }
        let store = PrefStore::open(temp.path()).unwrap();
        assert_eq!(store.get("k").unwrap(), "v");
    }
}
