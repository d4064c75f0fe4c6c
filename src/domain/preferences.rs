//! Preferences - Persisted User Preferences Collaborator
//!
//! The catalog core only depends on string get/set by key; the record below
//! maps those keys onto typed preferences.

use std::collections::BTreeMap;

use ahash::AHashMap;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::Result;
use crate::i18n::Locale;
use crate::utils::ConfigStore;

pub const LANGUAGE_KEY: &str = "@pokedex_language";
pub const DARK_MODE_KEY: &str = "@pokedex_darkMode";
pub const FAVORITE_TYPE_KEY: &str = "@pokedex_favoriteType";

const PREFERENCES_FILE: &str = "preferences.json";

/// Async key-value storage by string key
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store, used in tests and as a fallback when no data dir exists
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<AHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by `preferences.json`; every `set` rewrites the file
#[derive(Debug)]
pub struct JsonFileStore {
    store: ConfigStore,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    pub fn open(store: ConfigStore) -> Result<Self> {
        let values: BTreeMap<String, String> = store.load_json(PREFERENCES_FILE)?;
        Ok(Self {
            store,
            values: Mutex::new(values),
        })
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().await;
        values.insert(key.to_string(), value.to_string());
        self.store.save_json(PREFERENCES_FILE, &*values)
    }
}

/// Typed user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub language: String,
    pub dark_mode: bool,
    /// Category name, or `none`
    pub favorite_type: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "pt-br".to_string(),
            dark_mode: false,
            favorite_type: "none".to_string(),
        }
    }
}

impl Preferences {
    /// Read from `store`; absent keys keep their defaults
    pub async fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let mut prefs = Self::default();
        if let Some(language) = store.get(LANGUAGE_KEY).await? {
            prefs.language = language;
        }
        if let Some(dark_mode) = store.get(DARK_MODE_KEY).await? {
            prefs.dark_mode = dark_mode == "true";
        }
        if let Some(favorite_type) = store.get(FAVORITE_TYPE_KEY).await? {
            prefs.favorite_type = favorite_type;
        }
        Ok(prefs)
    }

    /// Language the user explicitly chose, if any
    pub async fn stored_language(store: &dyn KeyValueStore) -> Result<Option<String>> {
        store.get(LANGUAGE_KEY).await
    }

    pub async fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        store.set(LANGUAGE_KEY, &self.language).await?;
        store
            .set(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" })
            .await?;
        store.set(FAVORITE_TYPE_KEY, &self.favorite_type).await?;
        Ok(())
    }

    pub fn locale(&self) -> Locale {
        Locale::from_tag(&self.language)
    }

    /// Favorite category, if one was chosen
    pub fn favorite_type(&self) -> Option<&str> {
        match self.favorite_type.as_str() {
            "" | "none" => None,
            other => Some(other),
        }
    }
}
