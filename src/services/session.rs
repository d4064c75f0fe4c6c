//! Catalog Session
//!
//! Composition root for one browsing session. Owns the shared result cache
//! and the event channel, and builds the controllers a presentation layer
//! drives. Dropping the session drops its cache.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::domain::detail::ItemDetail;
use crate::error::Result;
use crate::i18n::Locale;
use crate::services::{
    CacheStats, FeedEvent, HttpTransport, RangeFetcher, RemoteClient, Resolver, ResultCache,
    Searcher, Transport,
};
use crate::state::{CatalogSource, FilteredFeed, PaginationController, SearchController};
use crate::utils::Settings;

pub struct CatalogSession {
    settings: Settings,
    cache: Arc<ResultCache>,
    client: RemoteClient,
    fetcher: RangeFetcher,
    resolver: Resolver,
    searcher: Searcher,
    /// Event sender handed to every controller
    tx: Sender<FeedEvent>,
    /// Event receiver for the presentation layer
    rx: Receiver<FeedEvent>,
}

impl CatalogSession {
    /// Session over HTTP with the given settings
    pub fn new(settings: Settings) -> Result<Self> {
        let transport = HttpTransport::new(settings.request_timeout())?;
        Ok(Self::with_transport(settings, Arc::new(transport)))
    }

    /// Session over an arbitrary transport
    pub fn with_transport(settings: Settings, transport: Arc<dyn Transport>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();

        let cache = Arc::new(ResultCache::new());
        let client = RemoteClient::new(settings.base_url.as_str(), transport);
        let fetcher = RangeFetcher::new(
            client.clone(),
            settings.batch_size,
            settings.batch_delay(),
        );
        let resolver = Resolver::new(fetcher.clone(), cache.clone(), settings.derived_concurrency);
        let searcher = Searcher::new(
            client.clone(),
            settings.search_listing_limit,
            settings.search_result_limit,
        );

        tracing::info!(
            "Catalog session on {} (batch {}, page {})",
            settings.base_url,
            settings.batch_size,
            settings.page_size
        );

        Self {
            settings,
            cache,
            client,
            fetcher,
            resolver,
            searcher,
            tx,
            rx,
        }
    }

    /// Get the event receiver for the presentation layer
    ///
    /// Events from all controllers are multiplexed into this single channel.
    /// The channel is unbounded: a long-lived session needs a consumer
    /// draining it.
    pub fn events(&self) -> Receiver<FeedEvent> {
        self.rx.clone()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn locale(&self) -> Locale {
        self.settings.locale()
    }

    pub fn client(&self) -> &RemoteClient {
        &self.client
    }

    pub fn fetcher(&self) -> &RangeFetcher {
        &self.fetcher
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn searcher(&self) -> &Searcher {
        &self.searcher
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    // ==================== Controllers ====================

    /// Unfiltered infinite-scroll feed over contiguous ids
    pub fn catalog_feed(&self) -> PaginationController {
        let source = CatalogSource::new(self.fetcher.clone(), self.cache.clone());
        PaginationController::new(
            Arc::new(source),
            self.settings.page_size,
            self.locale(),
            self.tx.clone(),
        )
    }

    /// Feed driven by one switchable filter
    pub fn filtered_feed(&self) -> FilteredFeed {
        FilteredFeed::new(
            self.resolver.clone(),
            self.searcher.clone(),
            self.settings.page_size,
            self.locale(),
            self.tx.clone(),
        )
    }

    pub fn search_controller(&self) -> SearchController {
        SearchController::new(
            self.searcher.clone(),
            self.resolver.clone(),
            self.locale(),
            self.tx.clone(),
        )
    }

    // ==================== Direct Operations ====================

    pub async fn item_detail(&self, id: u32) -> Result<ItemDetail> {
        self.resolver.item_detail(id, self.locale()).await
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

impl std::fmt::Debug for CatalogSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogSession")
            .field("base_url", &self.settings.base_url)
            .field("cache", &self.cache.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{BASE, FakeTransport};
    use crate::state::{Applied, LoadPhase};

    fn session(fake: &Arc<FakeTransport>) -> CatalogSession {
        CatalogSession::with_transport(Settings::for_tests(), fake.clone())
    }

    #[tokio::test]
    async fn test_full_page_keeps_has_more() {
        let fake = FakeTransport::new();
        fake.route_items(1, 40);
        let session = session(&fake);
        let feed = session.catalog_feed();

        assert_eq!(feed.load_initial().await, Applied::Page);
        let state = feed.state();
        assert_eq!(state.items().len(), 20);
        assert_eq!(state.offset(), 20);
        assert!(state.has_more());
    }

    #[tokio::test]
    async fn test_short_page_stops_load_more() {
        let fake = FakeTransport::new();
        fake.route_items(1, 5);
        let session = session(&fake);
        let feed = session.catalog_feed();

        feed.load_initial().await;
        let before = feed.state();
        assert_eq!(before.items().len(), 5);
        assert!(!before.has_more());

        let calls = fake.calls();
        assert_eq!(feed.load_more().await, None);
        assert_eq!(fake.calls(), calls);
        assert_eq!(feed.state(), before);
    }

    #[tokio::test]
    async fn test_load_more_appends_then_exhausts() {
        let fake = FakeTransport::new();
        fake.route_items(1, 40);
        let session = session(&fake);
        let feed = session.catalog_feed();

        feed.load_initial().await;
        assert_eq!(feed.load_more().await, Some(Applied::Page));
        let ids: Vec<u32> = feed.state().items().iter().map(|i| i.id).collect();
        assert_eq!(ids, (1..=40).collect::<Vec<_>>());
        assert!(feed.state().has_more());

        feed.load_more().await;
        let state = feed.state();
        assert_eq!(state.phase(), LoadPhase::Exhausted);
        assert!(!state.has_more());
        assert_eq!(state.items().len(), 40);
    }

    #[tokio::test]
    async fn test_reset_starts_over_from_zero() {
        let fake = FakeTransport::new();
        fake.route_items(1, 60);
        let session = session(&fake);
        let feed = session.catalog_feed();

        feed.load_initial().await;
        feed.load_more().await;
        feed.reset();

        let state = feed.state();
        assert!(state.items().is_empty());
        assert_eq!(state.offset(), 0);
        assert!(state.has_more());
        assert_eq!(state.error(), None);
        assert_eq!(feed.load_more().await, None);

        feed.load_initial().await;
        assert_eq!(feed.state().items()[0].id, 1);
        assert_eq!(feed.state().offset(), 20);
    }

    #[tokio::test]
    async fn test_window_of_missing_ids_exhausts() {
        let fake = FakeTransport::new();
        fake.route_items(1, 20);
        let session = session(&fake);
        let feed = session.catalog_feed();
        feed.load_initial().await;

        // Every id of the next window is missing upstream
        let calls = fake.calls();
        feed.load_more().await;
        assert!(fake.calls() > calls);
        assert_eq!(feed.state().items().len(), 20);
        assert_eq!(feed.state().phase(), LoadPhase::Exhausted);
    }

    #[tokio::test]
    async fn test_refetch_recovers_after_transient_failure() {
        let fake = FakeTransport::new();
        fake.route_items(1, 60);
        let flaky = format!("{BASE}/pokemon/5");
        fake.offline(flaky.clone());
        let session = session(&fake);
        let feed = session.catalog_feed();

        feed.load_initial().await;
        assert_eq!(feed.state().items().len(), 19);

        fake.online(&flaky);
        assert_eq!(feed.refetch().await, Applied::Page);
        let state = feed.state();
        assert_eq!(state.items().len(), 20);
        assert!(state.has_more());
        assert_eq!(fake.calls_to(&flaky), 2);
    }

    #[tokio::test]
    async fn test_events_reach_session_receiver() {
        let fake = FakeTransport::new();
        fake.route_items(1, 5);
        let session = session(&fake);
        let events = session.events();

        session.catalog_feed().load_initial().await;
        let received: Vec<FeedEvent> = events.try_iter().collect();
        assert!(received.iter().any(|e| matches!(e, FeedEvent::PageLoaded { count: 5, .. })));
        assert!(received.iter().any(|e| matches!(e, FeedEvent::Exhausted { .. })));
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_session_shares_cache() {
        let fake = FakeTransport::new();
        fake.route_items(1, 20);
        let session = session(&fake);

        session.catalog_feed().load_initial().await;
        let calls = fake.calls();
        session.catalog_feed().load_initial().await;
        assert_eq!(fake.calls(), calls);
        assert_eq!(session.cache_stats().range_count, 1);

        session.clear_cache();
        assert_eq!(session.cache_stats().item_count, 0);
    }
}
