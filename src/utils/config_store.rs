//! ConfigStore - Local JSON File Storage
//!
//! Backs the persisted collaborators (favorites, preferences). Fetched
//! catalog data is never written here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;
use crate::helpers::get_or_create_data_dir;

/// A directory holding small config files
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at the platform data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self {
            dir: get_or_create_data_dir()?,
        })
    }

    /// Store rooted at `dir`, created if missing
    pub fn at(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }

    /// Load a JSON file, or `T::default()` when it does not exist
    pub fn load_json<T: DeserializeOwned + Default>(&self, filename: &str) -> Result<T> {
        let path = self.path(filename);
        if !path.exists() {
            return Ok(T::default());
        }
        let content = fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(T::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Save a JSON file (pretty printed)
    pub fn save_json<T: Serialize>(&self, filename: &str, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)?;
        fs::write(self.path(filename), content)?;
        Ok(())
    }

    /// Delete a file if present
    pub fn delete(&self, filename: &str) -> Result<()> {
        let path = self.path(filename);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn temp_store() -> ConfigStore {
    let dir = std::env::temp_dir().join(format!("pokedex-core-{}", uuid::Uuid::new_v4()));
    ConfigStore::at(dir).expect("temp store")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_missing_file_yields_default() {
        let store = temp_store();
        let map: BTreeMap<String, String> = store.load_json("absent.json").expect("load");
        assert!(map.is_empty());
    }

    #[test]
    fn test_json_save_load_delete() {
        let store = temp_store();
        let mut map = BTreeMap::new();
        map.insert("@pokedex_language".to_string(), "en".to_string());
        store.save_json("prefs.json", &map).expect("save");

        let loaded: BTreeMap<String, String> = store.load_json("prefs.json").expect("load");
        assert_eq!(loaded, map);

        store.delete("prefs.json").expect("delete");
        assert!(!store.path("prefs.json").exists());
        let _ = fs::remove_dir_all(store.dir());
    }
}
