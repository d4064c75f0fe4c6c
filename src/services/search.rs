//! Relevance Search
//!
//! Client-side ranking over one large listing snapshot. Upstream has no
//! server-side search, so every query re-fetches the listing and scores each
//! candidate name.

use serde::Serialize;

use crate::constants::{SCORE_EXACT, SCORE_PREFIX, SCORE_SUBSTRING, SCORE_TOKEN_PAIR};
use crate::domain::reference::ItemReference;
use crate::error::Result;
use crate::services::client::RemoteClient;

/// A ranked candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub reference: ItemReference,
    pub score: u32,
}

/// Relevance of `name` for `query`; `0` means no match
///
/// Both sides are compared case-insensitively; the query is trimmed. Query
/// tokens split on spaces, name tokens on hyphens.
pub fn score(name: &str, query: &str) -> u32 {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return 0;
    }
    let name = name.to_lowercase();

    if name == query {
        return SCORE_EXACT;
    }
    if name.starts_with(&query) {
        return SCORE_PREFIX;
    }
    if name.contains(&query) {
        return SCORE_SUBSTRING;
    }

    let name_tokens: Vec<&str> = name.split('-').filter(|t| !t.is_empty()).collect();
    let pairs = query
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(|q| name_tokens.iter().filter(|n| n.contains(q)).count() as u32)
        .sum::<u32>();
    pairs * SCORE_TOKEN_PAIR
}

/// Score every candidate, drop non-matches, keep the top `limit`
///
/// Equal scores keep their listing order.
pub fn rank(candidates: &[ItemReference], query: &str, limit: usize) -> Vec<SearchHit> {
    let mut hits: Vec<SearchHit> = candidates
        .iter()
        .filter_map(|reference| {
            let score = score(&reference.name, query);
            (score > 0).then(|| SearchHit {
                reference: reference.clone(),
                score,
            })
        })
        .collect();
    // sort_by is stable
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(limit);
    hits
}

#[derive(Debug, Clone)]
pub struct Searcher {
    client: RemoteClient,
    listing_limit: usize,
    result_limit: usize,
}

impl Searcher {
    pub fn new(client: RemoteClient, listing_limit: usize, result_limit: usize) -> Self {
        Self {
            client,
            listing_limit,
            result_limit,
        }
    }

    /// Ranked references for `query`, capped at the result limit
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let listing = self.client.list_items(self.listing_limit, 0).await?;
        let hits = rank(&listing.results, query, self.result_limit);
        tracing::info!(
            "Search '{}': {} of {} candidates ranked",
            query.trim(),
            hits.len(),
            listing.results.len()
        );
        Ok(hits)
    }
}
