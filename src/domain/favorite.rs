//! Favorite - User Favorites Collaborator
//!
//! Insertion-ordered snapshots of full items, keyed by item id. The fetch
//! pipeline only hands items to this store; it never reads it back.

use chrono::{DateTime, Utc};
use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

use crate::domain::item::Item;
use crate::error::Result;
use crate::utils::ConfigStore;

const FAVORITES_FILE: &str = "favorites.json";

/// A saved item snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    /// Full item as it was when saved
    pub item: Item,
    /// When the favorite was added
    pub added_at: DateTime<Utc>,
}

/// Favorites keyed by item id, in the order they were added
#[derive(Debug, Clone, Default)]
pub struct FavoritesStore {
    entries: LinkedHashMap<u32, Favorite>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `favorites.json` in `store`
    pub fn load(store: &ConfigStore) -> Result<Self> {
        let saved: Vec<Favorite> = store.load_json(FAVORITES_FILE)?;
        let mut favorites = Self::new();
        for favorite in saved {
            favorites.entries.insert(favorite.item.id, favorite);
        }
        tracing::debug!("Loaded {} favorites", favorites.len());
        Ok(favorites)
    }

    /// Persist to `favorites.json` in `store`
    pub fn save(&self, store: &ConfigStore) -> Result<()> {
        let list: Vec<&Favorite> = self.entries.values().collect();
        store.save_json(FAVORITES_FILE, &list)
    }

    /// Add an item; returns `false` if it was already a favorite
    pub fn add(&mut self, item: Item) -> bool {
        if self.entries.contains_key(&item.id) {
            return false;
        }
        self.entries.insert(
            item.id,
            Favorite {
                item,
                added_at: Utc::now(),
            },
        );
        true
    }

    pub fn remove(&mut self, id: u32) -> Option<Favorite> {
        self.entries.remove(&id)
    }

    /// Add if absent, remove if present; returns whether it is now a favorite
    pub fn toggle(&mut self, item: Item) -> bool {
        if self.entries.remove(&item.id).is_some() {
            false
        } else {
            self.add(item)
        }
    }

    /// Replace the snapshot of an existing favorite, keeping its position
    pub fn update(&mut self, item: Item) -> bool {
        match self.entries.get_mut(&item.id) {
            Some(existing) => {
                existing.item = item;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn items(&self) -> Vec<&Item> {
        self.entries.values().map(|f| &f.item).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
