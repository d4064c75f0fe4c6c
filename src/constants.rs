//! Catalog Constants
//!
//! Reference values for the upstream API and the fetch pipeline.

/// Upstream REST API base URL
pub const API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Per-request timeout
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Concurrent single-id fetches per range batch
pub const RANGE_BATCH_SIZE: usize = 10;

/// Pause between consecutive range batches
pub const RANGE_BATCH_DELAY_MS: u64 = 100;

/// Items per pagination window
pub const PAGE_SIZE: usize = 20;

/// Size of the listing snapshot scored by the relevance search
pub const SEARCH_LISTING_LIMIT: usize = 1000;

/// Maximum number of ranked search results
pub const SEARCH_RESULT_LIMIT: usize = 20;

/// Concurrent resolutions used by derived-list resolvers
pub const DERIVED_CONCURRENCY: usize = 20;

/// Relevance scores
pub const SCORE_EXACT: u32 = 100;
pub const SCORE_PREFIX: u32 = 90;
pub const SCORE_SUBSTRING: u32 = 80;
pub const SCORE_TOKEN_PAIR: u32 = 10;

/// Filter picker listing sizes
pub const LOCATION_OPTIONS_LIMIT: usize = 50;
pub const MOVE_OPTIONS_LIMIT: usize = 100;

/// Default UI locale tag
pub const DEFAULT_LOCALE: &str = "pt-BR";
