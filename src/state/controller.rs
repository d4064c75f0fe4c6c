//! Pagination Controller
//!
//! Drives a [`PaginationState`] from a [`PageSource`]. The state lock is
//! never held across a fetch; each load captures an epoch token up front and
//! its result is applied only if the token is still current.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use crossbeam_channel::Sender;

use crate::domain::item::ItemPage;
use crate::error::{Error, Result};
use crate::i18n::{Locale, t};
use crate::services::FeedEvent;
use crate::state::pagination::{Applied, PaginationState};

/// Where a feed's pages come from
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Feed label used in logs and events
    fn label(&self) -> String;

    /// Items `[offset, offset + limit)` of the feed
    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<ItemPage>;
}

/// Message shown for a failed load
pub(crate) fn user_message(err: &Error, key: &str, locale: Locale) -> Arc<str> {
    match err {
        Error::UnknownGame { .. } => t("error-unknown-game", locale).into(),
        e if e.is_transport() => {
            format!("{} ({})", t(key, locale), t("error-network", locale)).into()
        }
        _ => t(key, locale).into(),
    }
}

fn page_len(result: &Result<ItemPage>) -> usize {
    result.as_ref().map(|page| page.items.len()).unwrap_or(0)
}

pub struct PaginationController {
    feed: Arc<str>,
    source: Arc<dyn PageSource>,
    state: Mutex<PaginationState>,
    locale: Locale,
    events: Sender<FeedEvent>,
}

impl PaginationController {
    pub fn new(
        source: Arc<dyn PageSource>,
        page_size: usize,
        locale: Locale,
        events: Sender<FeedEvent>,
    ) -> Self {
        Self {
            feed: source.label().into(),
            source,
            state: Mutex::new(PaginationState::new(page_size)),
            locale,
            events,
        }
    }

    pub fn feed(&self) -> &str {
        &self.feed
    }

    /// Snapshot of the current state
    pub fn state(&self) -> PaginationState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, PaginationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: FeedEvent) {
        let _ = self.events.send(event);
    }

    /// Load the first page, replacing whatever is shown
    pub async fn load_initial(&self) -> Applied {
        let (token, page_size) = {
            let mut state = self.lock();
            (state.begin_initial(), state.page_size())
        };
        tracing::info!("{}: loading first {} items", self.feed, page_size);

        let result = self.source.fetch_page(0, page_size).await;
        let count = page_len(&result);
        let result = self.describe(result, "error-initial-load");
        let applied = self.lock().finish_initial(token, result);
        self.after(applied, 0, count);
        applied
    }

    /// Load the next page
    ///
    /// No-op (returns `None`, no fetch) while loading, before the first
    /// page, or when nothing remains.
    pub async fn load_more(&self) -> Option<Applied> {
        let (token, offset, page_size) = {
            let mut state = self.lock();
            let (token, offset) = state.begin_more()?;
            (token, offset, state.page_size())
        };
        tracing::debug!("{}: loading more at offset {}", self.feed, offset);

        let result = self.source.fetch_page(offset, page_size).await;
        let count = page_len(&result);
        let result = self.describe(result, "error-load-more");
        let applied = self.lock().finish_more(token, result);
        self.after(applied, offset, count);
        Some(applied)
    }

    /// Same as [`Self::load_initial`]
    pub async fn refetch(&self) -> Applied {
        self.load_initial().await
    }

    /// Clear items, offset and error; any in-flight load becomes stale
    pub fn reset(&self) {
        self.lock().reset();
        tracing::debug!("{}: reset", self.feed);
        self.emit(FeedEvent::Reset {
            feed: self.feed.clone(),
        });
    }

    fn describe(&self, result: Result<ItemPage>, key: &str) -> Result<ItemPage, Arc<str>> {
        result.map_err(|e| {
            tracing::warn!("{}: load failed: {}", self.feed, e);
            user_message(&e, key, self.locale)
        })
    }

    fn after(&self, applied: Applied, offset: usize, count: usize) {
        let (total, has_more, error) = {
            let state = self.lock();
            (
                state.items().len(),
                state.has_more(),
                state.error().map(Arc::<str>::from),
            )
        };
        let feed = self.feed.clone();
        match applied {
            Applied::Page => {
                tracing::info!(
                    "{}: {} items loaded, {} total, has_more={}",
                    feed,
                    count,
                    total,
                    has_more
                );
                self.emit(FeedEvent::PageLoaded {
                    feed: feed.clone(),
                    count,
                    offset,
                });
                if !has_more {
                    self.emit(FeedEvent::Exhausted { feed });
                }
            }
            Applied::Failed => {
                let message = error.unwrap_or_else(|| Arc::from(""));
                self.emit(FeedEvent::LoadFailed { feed, message });
            }
            Applied::Stale => {
                tracing::debug!("{}: discarded stale result", feed);
                self.emit(FeedEvent::StaleDiscarded { feed });
            }
        }
    }
}

impl std::fmt::Debug for PaginationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationController")
            .field("feed", &self.feed)
            .field("state", &self.state())
            .finish()
    }
}
