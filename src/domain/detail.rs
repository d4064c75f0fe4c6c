//! Detail - Assembled Per-Item View
//!
//! Combines an [`Item`] with its [`Species`] record into the fields a detail
//! screen shows. Display helpers are locale-aware where upstream carries
//! localized text.

use serde::Serialize;

use crate::domain::item::Item;
use crate::domain::resources::Species;

/// Gender split in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GenderSplit {
    pub male: f32,
    pub female: f32,
}

impl GenderSplit {
    /// From upstream `gender_rate` (female eighths, `-1` = genderless)
    pub fn from_rate(rate: i8) -> Option<Self> {
        if rate < 0 {
            return None;
        }
        let female = f32::from(rate) / 8.0 * 100.0;
        Some(Self {
            male: 100.0 - female,
            female,
        })
    }
}

/// Rich per-item view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetail {
    pub item: Item,
    pub species: Species,
    pub display_name: String,
    pub description: String,
    pub dex_number: String,
    pub total_stats: u32,
    pub gender: Option<GenderSplit>,
    pub height: String,
    pub weight: String,
}

impl ItemDetail {
    /// Assemble the view for `language` (e.g. `pt-BR`, `en`)
    pub fn assemble(item: Item, species: Species, language: &str) -> Self {
        let display_name = species
            .name_in(language)
            .map(str::to_string)
            .unwrap_or_else(|| capitalize(&species.name));
        let description = species
            .flavor_text_in(language)
            .map(clean_flavor_text)
            .unwrap_or_default();

        Self {
            display_name,
            description,
            dex_number: format_dex_number(item.id),
            total_stats: item.total_stats(),
            gender: GenderSplit::from_rate(species.gender_rate),
            height: format_height(item.height),
            weight: format_weight(item.weight),
            item,
            species,
        }
    }
}

/// `#001` style number, at least three digits
pub fn format_dex_number(id: u32) -> String {
    format!("#{id:03}")
}

/// Upstream height is in decimetres
pub fn format_height(decimetres: u32) -> String {
    let meters = f64::from(decimetres) / 10.0;
    let feet = meters * 3.28084;
    let whole_feet = feet.floor();
    let inches = ((feet - whole_feet) * 12.0).floor();
    format!("{}'{}\" ({:.1}m)", whole_feet as u32, inches as u32, meters)
}

/// Upstream weight is in hectograms
pub fn format_weight(hectograms: u32) -> String {
    let kg = f64::from(hectograms) / 10.0;
    let lbs = kg * 2.20462;
    format!("{lbs:.1} lbs ({kg:.1} kg)")
}

/// Uppercase the first character
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"mt-moon"` -> `"Mt Moon"`
pub fn humanize(name: &str) -> String {
    name.split('-')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

// Flavor text carries hard line breaks and form feeds from the cartridge text
fn clean_flavor_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::fixtures;

    fn species(json: &str) -> Species {
        serde_json::from_str(json).expect("species")
    }

    #[test]
    fn test_assemble_prefers_localized_name() {
        let s = species(
            r#"{"id":1,"name":"bulbasaur","gender_rate":1,
                "names":[{"name":"Bulbizarre","language":{"name":"fr","url":"u/5/"}}],
                "flavor_text_entries":[{"flavor_text":"A strange\nseed was\fplanted.","language":{"name":"en","url":"u/9/"}}]}"#,
        );
        let detail = ItemDetail::assemble(fixtures::item(1, "bulbasaur"), s.clone(), "fr");
        assert_eq!(detail.display_name, "Bulbizarre");
        assert_eq!(detail.description, "");

        let detail = ItemDetail::assemble(fixtures::item(1, "bulbasaur"), s, "en");
        assert_eq!(detail.display_name, "Bulbasaur");
        assert_eq!(detail.description, "A strange seed was planted.");
        assert_eq!(detail.dex_number, "#001");
        assert_eq!(detail.total_stats, 45);
        let gender = detail.gender.expect("gendered");
        assert_eq!(gender.female, 12.5);
        assert_eq!(gender.male, 87.5);
    }

    #[test]
    fn test_genderless() {
        assert!(GenderSplit::from_rate(-1).is_none());
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_dex_number(25), "#025");
        assert_eq!(format_dex_number(1008), "#1008");
        assert_eq!(format_height(7), "2'3\" (0.7m)");
        assert_eq!(format_weight(69), "15.2 lbs (6.9 kg)");
        assert_eq!(humanize("mt-moon"), "Mt Moon");
        assert_eq!(capitalize(""), "");
    }
}
