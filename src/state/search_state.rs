//! Search State
//!
//! Free-text search over the catalog. Exposes `{results, is_loading,
//! error}` and a `search(query)` entry point.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam_channel::Sender;

use crate::domain::item::Item;
use crate::i18n::Locale;
use crate::services::{FeedEvent, Resolver, Searcher};
use crate::state::controller::user_message;

const FEED: &str = "search";

/// Snapshot of the search feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub results: Vec<Item>,
    pub is_loading: bool,
    pub error: Option<Arc<str>>,
    /// Last query that was searched, trimmed
    pub query: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    state: SearchState,
    epoch: u64,
}

pub struct SearchController {
    searcher: Searcher,
    resolver: Resolver,
    locale: Locale,
    events: Sender<FeedEvent>,
    inner: Mutex<Inner>,
}

impl SearchController {
    pub fn new(
        searcher: Searcher,
        resolver: Resolver,
        locale: Locale,
        events: Sender<FeedEvent>,
    ) -> Self {
        Self {
            searcher,
            resolver,
            locale,
            events,
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SearchState {
        self.lock().state.clone()
    }

    /// Search for `query`
    ///
    /// A blank query clears the results without touching the network.
    /// Repeating the last successful query does nothing.
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            self.clear();
            return;
        }

        let token = {
            let mut inner = self.lock();
            if inner.state.query.as_deref() == Some(query) && inner.state.error.is_none() {
                return;
            }
            inner.epoch += 1;
            inner.state.is_loading = true;
            inner.state.error = None;
            inner.state.query = Some(query.to_string());
            inner.epoch
        };

        let result = match self.searcher.search_by_name(query).await {
            Ok(hits) => {
                let ids: Vec<u32> = hits.iter().filter_map(|h| h.reference.id()).collect();
                Ok(self.resolver.items_for_ids(&ids).await)
            }
            Err(e) => {
                tracing::warn!("Search '{}' failed: {}", query, e);
                Err(user_message(&e, "error-search", self.locale))
            }
        };

        let mut inner = self.lock();
        if inner.epoch != token {
            tracing::debug!("Discarding stale search for '{}'", query);
            let _ = self.events.send(FeedEvent::StaleDiscarded { feed: FEED.into() });
            return;
        }
        inner.state.is_loading = false;
        match result {
            Ok(results) => {
                let count = results.len();
                inner.state.results = results;
                let _ = self.events.send(FeedEvent::PageLoaded {
                    feed: FEED.into(),
                    count,
                    offset: 0,
                });
            }
            Err(message) => {
                inner.state.error = Some(message.clone());
                let _ = self.events.send(FeedEvent::LoadFailed {
                    feed: FEED.into(),
                    message,
                });
            }
        }
    }

    /// Clear results, error and the remembered query
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.epoch += 1;
        inner.state = SearchState::default();
    }
}

impl std::fmt::Debug for SearchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchController")
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::services::testing::{BASE, FakeTransport, item_name, list_json};
    use crate::services::{RangeFetcher, RemoteClient, ResultCache};

    const LISTING: &str = "http://test.local/api/v2/pokemon?limit=1000&offset=0";

    fn controller(fake: &Arc<FakeTransport>) -> SearchController {
        let client = RemoteClient::new(BASE, fake.clone());
        let fetcher = RangeFetcher::new(client.clone(), 10, Duration::ZERO);
        let resolver = Resolver::new(fetcher, Arc::new(ResultCache::new()), 20);
        let (tx, _rx) = crossbeam_channel::unbounded();
        SearchController::new(Searcher::new(client, 1000, 20), resolver, Locale::En, tx)
    }

    fn route_listing(fake: &FakeTransport) {
        fake.route(
            LISTING,
            list_json(
                "pokemon",
                &[(1, "bulbasaur"), (25, "pikachu"), (26, "raichu"), (172, "pichu")],
            ),
        );
        fake.route_items(1, 1);
        fake.route_items(25, 26);
        fake.route_items(172, 172);
    }

    #[tokio::test]
    async fn test_search_resolves_ranked_items() {
        let fake = FakeTransport::new();
        route_listing(&fake);
        let search = controller(&fake);

        search.search(" chu ").await;
        let state = search.state();
        let names: Vec<&str> = state.results.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec![item_name(25), item_name(26), item_name(172)]);
        assert!(!state.is_loading);
        assert_eq!(state.query.as_deref(), Some("chu"));
    }

    #[tokio::test]
    async fn test_blank_and_repeated_queries_skip_network() {
        let fake = FakeTransport::new();
        route_listing(&fake);
        let search = controller(&fake);

        search.search("   ").await;
        assert_eq!(fake.calls(), 0);

        search.search("pika").await;
        let calls = fake.calls();
        search.search("pika").await;
        assert_eq!(fake.calls(), calls);

        search.search("").await;
        assert!(search.state().results.is_empty());
        assert_eq!(search.state().query, None);
    }

    #[tokio::test]
    async fn test_failed_listing_sets_error() {
        let fake = FakeTransport::new();
        fake.offline(LISTING);
        let search = controller(&fake);

        search.search("pika").await;
        let state = search.state();
        assert!(state.results.is_empty());
        assert!(!state.is_loading);
        assert_eq!(
            state.error.as_deref(),
            Some("Search failed (Network unavailable, try again)")
        );
    }
}
