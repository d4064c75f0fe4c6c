//! Result Cache
//!
//! Session-scoped memo of fetched items, keyed by id and by exact inclusive
//! range. No TTL, no eviction: upstream records are static for a session.
//! A range lookup hits only when `[start, end]` matches a stored key exactly.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use ahash::AHashMap;
use serde::Serialize;

use crate::domain::item::Item;

/// Inclusive id range key, displayed as `start-end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeKey {
    pub start: u32,
    pub end: u32,
}

impl RangeKey {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Entry counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Items cached by id
    pub item_count: usize,
    /// Ranges cached
    pub range_count: usize,
    /// Items held across all cached ranges
    pub items_in_ranges: usize,
}

/// Two-tier item cache shared by fetchers, resolvers and controllers
#[derive(Debug, Default)]
pub struct ResultCache {
    items: RwLock<AHashMap<u32, Item>>,
    ranges: RwLock<AHashMap<RangeKey, Vec<Item>>>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_item(&self, id: u32) -> Option<Item> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn put_item(&self, item: Item) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(item.id, item);
    }

    /// Items stored for exactly `[start, end]`
    pub fn get_range(&self, start: u32, end: u32) -> Option<Vec<Item>> {
        let key = RangeKey::new(start, end);
        let hit = self
            .ranges
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        tracing::debug!(
            "Range cache {} for {}",
            if hit.is_some() { "hit" } else { "miss" },
            key
        );
        hit
    }

    pub fn put_range(&self, start: u32, end: u32, items: Vec<Item>) {
        self.ranges
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(RangeKey::new(start, end), items);
    }

    pub fn clear(&self) {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.ranges
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        tracing::debug!("Result cache cleared");
    }

    pub fn stats(&self) -> CacheStats {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        let ranges = self.ranges.read().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            item_count: items.len(),
            range_count: ranges.len(),
            items_in_ranges: ranges.values().map(Vec::len).sum(),
        }
    }
}
