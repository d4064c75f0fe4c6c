//! Reference - Named Resource Links and Listing Pages

use serde::{Deserialize, Serialize};

/// Lightweight `{name, url}` pointer returned by upstream listing endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReference {
    pub name: String,
    pub url: String,
}

impl ItemReference {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Numeric id taken from the trailing path segment (`.../<resource>/<id>/`)
    ///
    /// Returns `None` when the URL does not follow that shape. Callers treat
    /// such references as unusable and skip them.
    pub fn id(&self) -> Option<u32> {
        let segment = self.url.trim_end_matches('/').rsplit('/').next()?;
        match segment.parse::<u32>() {
            Ok(id) if id > 0 => Some(id),
            _ => None,
        }
    }
}

/// Paginated listing envelope: `{count, next, previous, results}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPage {
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<ItemReference>,
}

/// Extract ids from references, dropping (and logging) unusable ones
pub fn ids_from_references<'a>(refs: impl IntoIterator<Item = &'a ItemReference>) -> Vec<u32> {
    refs.into_iter()
        .filter_map(|reference| {
            let id = reference.id();
            if id.is_none() {
                tracing::warn!(
                    "Skipping reference '{}' with unusable url {}",
                    reference.name,
                    reference.url
                );
            }
            id
        })
        .collect()
}
