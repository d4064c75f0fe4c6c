//! Resources - Upstream Collection and Detail Schemas
//!
//! Typed shapes for the non-item endpoints. Each keeps only the fields the
//! resolvers and detail view read; everything else in the upstream JSON is
//! ignored.

use serde::{Deserialize, Serialize};

use crate::domain::reference::ItemReference;

/// `/type/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon: Vec<TypeMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMember {
    #[serde(default)]
    pub slot: u8,
    pub pokemon: ItemReference,
}

/// `/generation/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generation {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub main_region: Option<ItemReference>,
    #[serde(default)]
    pub pokemon_species: Vec<ItemReference>,
}

/// `/location/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub region: Option<ItemReference>,
    #[serde(default)]
    pub areas: Vec<ItemReference>,
}

/// `/location-area/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationArea {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub pokemon_encounters: Vec<Encounter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    pub pokemon: ItemReference,
}

/// `/move/{id or name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub accuracy: Option<u32>,
    #[serde(default)]
    pub pp: Option<u32>,
    #[serde(default, rename = "type")]
    pub kind: Option<ItemReference>,
    #[serde(default)]
    pub learned_by_pokemon: Vec<ItemReference>,
}

/// `/region/{id or name}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub locations: Vec<ItemReference>,
}

/// `/pokemon-species/{id or name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorText>,
    /// Female eighths, `-1` when genderless
    #[serde(default = "genderless")]
    pub gender_rate: i8,
    #[serde(default)]
    pub capture_rate: u32,
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
    #[serde(default)]
    pub generation: Option<ItemReference>,
    #[serde(default)]
    pub habitat: Option<ItemReference>,
    #[serde(default)]
    pub growth_rate: Option<ItemReference>,
    #[serde(default)]
    pub egg_groups: Vec<ItemReference>,
}

fn genderless() -> i8 {
    -1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub name: String,
    pub language: ItemReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorText {
    pub flavor_text: String,
    pub language: ItemReference,
}

impl Species {
    /// Name in `language`, if the species carries one
    pub fn name_in(&self, language: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|n| n.language.name.eq_ignore_ascii_case(language))
            .map(|n| n.name.as_str())
    }

    /// First flavor text in `language`
    pub fn flavor_text_in(&self, language: &str) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|f| f.language.name.eq_ignore_ascii_case(language))
            .map(|f| f.flavor_text.as_str())
    }
}
