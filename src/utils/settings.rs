//! Settings - Catalog Client Configuration
//!
//! Read from `settings.toml` in the platform config directory. Every field
//! has a default, so a missing or partial file is fine.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    API_BASE_URL, DEFAULT_LOCALE, DERIVED_CONCURRENCY, PAGE_SIZE, RANGE_BATCH_DELAY_MS,
    RANGE_BATCH_SIZE, REQUEST_TIMEOUT_SECS, SEARCH_LISTING_LIMIT, SEARCH_RESULT_LIMIT,
};
use crate::error::{Error, Result};
use crate::helpers::get_or_create_config_dir;
use crate::i18n::Locale;

const SETTINGS_FILE: &str = "settings.toml";

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Upstream REST base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Concurrent fetches per range batch
    pub batch_size: usize,
    /// Pause between range batches in milliseconds
    pub batch_delay_ms: u64,
    /// Items per pagination window
    pub page_size: usize,
    /// Listing snapshot size for relevance search
    pub search_listing_limit: usize,
    /// Ranked results kept by relevance search
    pub search_result_limit: usize,
    /// Concurrent resolutions in derived-list resolvers
    pub derived_concurrency: usize,
    /// Locale tag for user-visible messages
    pub locale: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            batch_size: RANGE_BATCH_SIZE,
            batch_delay_ms: RANGE_BATCH_DELAY_MS,
            page_size: PAGE_SIZE,
            search_listing_limit: SEARCH_LISTING_LIMIT,
            search_result_limit: SEARCH_RESULT_LIMIT,
            derived_concurrency: DERIVED_CONCURRENCY,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Settings {
    /// Load from the platform config directory
    pub fn load() -> Result<Self> {
        let path = get_or_create_config_dir()?.join(SETTINGS_FILE);
        Self::load_from(&path)
    }

    /// Load from an explicit path; missing or empty file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        #[cfg(debug_assertions)]
        tracing::info!("Settings file: {}", path.display());

        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Write to an explicit path as TOML
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Parse TOML text and validate
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = toml::from_str(content)?;
        settings.validate()
    }

    pub fn validate(mut self) -> Result<Self> {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        if self.base_url.is_empty() {
            return Err(Error::Invalid {
                message: "base_url must not be empty".to_string(),
            });
        }
        if self.batch_size == 0 || self.page_size == 0 {
            return Err(Error::Invalid {
                message: "batch_size and page_size must be positive".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Invalid {
                message: "request_timeout_secs must be positive".to_string(),
            });
        }
        self.derived_concurrency = self.derived_concurrency.max(1);
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn locale(&self) -> Locale {
        Locale::from_tag(&self.locale)
    }

    /// Settings for tests: no batch delay, English messages
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            base_url: "http://test.local/api/v2".to_string(),
            batch_delay_ms: 0,
            locale: "en".to_string(),
            ..Self::default()
        }
    }
}
