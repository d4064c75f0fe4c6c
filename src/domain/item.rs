//! Item - Canonical Catalog Entity (`/pokemon/{id}`)
//!
//! Only `id` and `name` are required; nested sub-records default to empty so
//! a sparse upstream record still decodes. `Item::validate` enforces the
//! required-field contract at the API boundary.

use serde::{Deserialize, Serialize};

use crate::domain::reference::ItemReference;
use crate::error::{Error, Result};

/// A fetched catalog entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable positive id
    pub id: u32,
    /// Unique lowercase hyphenated name
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub types: Vec<ItemType>,
    #[serde(default)]
    pub stats: Vec<ItemStat>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub abilities: Vec<ItemAbility>,
    #[serde(default)]
    pub moves: Vec<ItemMove>,
}

/// Category slot (`types[]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemType {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: ItemReference,
}

/// Base statistic (`stats[]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: ItemReference,
}

/// Ability slot (`abilities[]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAbility {
    pub ability: ItemReference,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u8,
}

/// Move-learn record (`moves[]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMove {
    #[serde(rename = "move")]
    pub learned: ItemReference,
}

/// Sprite and artwork URIs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<Artwork>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl Item {
    /// Reject records missing the identity fields
    pub fn validate(self) -> Result<Self> {
        if self.id == 0 {
            return Err(Error::Invalid {
                message: format!("item '{}' has no positive id", self.name),
            });
        }
        if self.name.trim().is_empty() {
            return Err(Error::Invalid {
                message: format!("item {} has an empty name", self.id),
            });
        }
        Ok(self)
    }

    /// Category names in slot order
    pub fn type_names(&self) -> Vec<&str> {
        let mut types: Vec<&ItemType> = self.types.iter().collect();
        types.sort_by_key(|t| t.slot);
        types.into_iter().map(|t| t.kind.name.as_str()).collect()
    }

    /// Sum of all base statistics
    pub fn total_stats(&self) -> u32 {
        self.stats.iter().map(|s| s.base_stat).sum()
    }

    /// Best available image: official artwork, then the default sprite
    pub fn image_url(&self) -> Option<&str> {
        self.sprites
            .other
            .as_ref()
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref())
            .or(self.sprites.front_default.as_deref())
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t.kind.name == type_name)
    }
}

/// One window of items and whether more remain after it
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemPage {
    pub items: Vec<Item>,
    pub has_more: bool,
}

impl ItemPage {
    pub fn new(items: Vec<Item>, has_more: bool) -> Self {
        Self { items, has_more }
    }

    /// Terminal empty page
    pub fn empty() -> Self {
        Self::default()
    }
}
