//! i18n - Internationalization Module
//!
//! Provides simple translation functions using HashMap-based lookups for the
//! messages controllers surface in their `error` state.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// English
    En,
    /// Brazilian Portuguese
    #[default]
    PtBr,
}

impl Locale {
    /// Parse a locale tag (`en`, `en-US`, `pt-BR`, `pt-br`); unknown tags fall back to the default
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag == "en" || tag.starts_with("en-") || tag.starts_with("en_") {
            Locale::En
        } else {
            Locale::PtBr
        }
    }

    /// BCP-47 tag, also the upstream language name used for localized text
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::PtBr => "pt-BR",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::PtBr => "Português (Brasil)",
        }
    }
}

/// Translation resources
static TRANSLATIONS: OnceLock<HashMap<&'static str, (&'static str, &'static str)>> =
    OnceLock::new();

/// Initialize translations (key -> (en, pt-BR))
fn init_translations() -> HashMap<&'static str, (&'static str, &'static str)> {
    let mut map = HashMap::new();

    // Pagination
    map.insert(
        "error-initial-load",
        ("Failed to load the initial list", "Erro ao carregar lista inicial de Pokémon"),
    );
    map.insert(
        "error-load-more",
        ("Failed to load more entries", "Erro ao carregar mais Pokémon"),
    );

    // Filters
    map.insert(
        "error-filter",
        ("Failed to apply filter", "Erro ao aplicar filtro"),
    );
    map.insert("error-unknown-game", ("Unknown game", "Jogo desconhecido"));

    // Search
    map.insert("error-search", ("Search failed", "Erro ao buscar Pokémon"));

    // Detail
    map.insert(
        "error-detail",
        ("Failed to load entry details", "Erro ao carregar dados do Pokémon"),
    );

    // Filter options
    map.insert("option-generation", ("Generation", "Geração"));

    // Transport
    map.insert(
        "error-network",
        ("Network unavailable, try again", "Rede indisponível, tente novamente"),
    );

    map
}

/// Translate a key
pub fn t(key: &str, locale: Locale) -> &'static str {
    let translations = TRANSLATIONS.get_or_init(init_translations);

    match translations.get(key) {
        Some((en, pt)) => match locale {
            Locale::En => *en,
            Locale::PtBr => *pt,
        },
        None => "???",
    }
}
