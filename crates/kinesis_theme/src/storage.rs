//! Preference persistence
//!
//! Preferences are string key/value pairs. [`FileStorage`] keeps them in a
//! small JSON object under the user's config directory and replaces the file
//! atomically on every write.

use crate::error::StorageError;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Key/value store for user preferences
pub trait PreferenceStorage {
    /// Read a value. A missing key is `Ok(None)`.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Preferences that live only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: FxHashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated storage
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.values.insert(key.to_string(), value.to_string());
        storage
    }
}

impl PreferenceStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences persisted to a JSON file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/kinesis/preferences.json`
    pub fn default_path() -> Result<PathBuf, StorageError> {
        let dir = dirs::config_dir().ok_or(StorageError::NoConfigDir)?;
        Ok(dir.join("kinesis").join("preferences.json"))
    }

    /// Storage at [`FileStorage::default_path`]
    pub fn at_default_location() -> Result<Self, StorageError> {
        Ok(Self::new(Self::default_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|source| StorageError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(values)?;
        let write_err = |source: io::Error| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp).map_err(write_err)?;
            file.write_all(json.as_bytes()).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }
        fs::rename(&tmp, &self.path).map_err(write_err)
    }
}

impl PreferenceStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = match self.read_all() {
            Ok(values) => values,
            Err(StorageError::Parse { path, .. }) => {
                tracing::warn!(path = %path.display(), "replacing malformed preferences file");
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        values.insert(key.to_string(), value.to_string());
        self.write_all(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load("theme").unwrap(), None);
        storage.store("theme", "dark").unwrap();
        assert_eq!(storage.load("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("prefs.json"));
        assert_eq!(storage.load("theme").unwrap(), None);
    }

    #[test]
    fn file_storage_keeps_other_keys_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kinesis").join("preferences.json");
        let mut storage = FileStorage::new(&path);

        storage.store("locale", "en").unwrap();
        storage.store("theme", "dark").unwrap();
        storage.store("theme", "light").unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.load("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(reopened.load("locale").unwrap().as_deref(), Some("en"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn malformed_file_errors_on_load_and_is_replaced_on_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(matches!(storage.load("theme"), Err(StorageError::Parse { .. })));

        storage.store("theme", "dark").unwrap();
        assert_eq!(storage.load("theme").unwrap().as_deref(), Some("dark"));
    }
}
