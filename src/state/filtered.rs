//! Filtered Feed
//!
//! Holds the one active filter and the controller built for it. Switching
//! filters resets the previous controller (its in-flight loads turn stale)
//! and builds a fresh one from scratch; nothing carries over.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crossbeam_channel::Sender;

use crate::domain::filter::FilterSpec;
use crate::i18n::Locale;
use crate::services::{FeedEvent, Resolver, Searcher};
use crate::state::controller::PaginationController;
use crate::state::pagination::{Applied, PaginationState};
use crate::state::sources::source_for;

type Active = Option<(FilterSpec, Arc<PaginationController>)>;

pub struct FilteredFeed {
    resolver: Resolver,
    searcher: Searcher,
    page_size: usize,
    locale: Locale,
    events: Sender<FeedEvent>,
    active: Mutex<Active>,
}

impl FilteredFeed {
    pub fn new(
        resolver: Resolver,
        searcher: Searcher,
        page_size: usize,
        locale: Locale,
        events: Sender<FeedEvent>,
    ) -> Self {
        Self {
            resolver,
            searcher,
            page_size,
            locale,
            events,
            active: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Active> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn active_filter(&self) -> Option<FilterSpec> {
        self.lock().as_ref().map(|(filter, _)| filter.clone())
    }

    pub fn controller(&self) -> Option<Arc<PaginationController>> {
        self.lock().as_ref().map(|(_, controller)| controller.clone())
    }

    /// Snapshot of the active feed, if any
    pub fn state(&self) -> Option<PaginationState> {
        self.controller().map(|c| c.state())
    }

    /// Make `filter` the active one and load its first page
    ///
    /// Re-applying the active filter is a no-op. `None` clears the feed.
    pub async fn apply(&self, filter: Option<FilterSpec>) -> Option<Arc<PaginationController>> {
        let (previous, controller) = {
            let mut active = self.lock();
            if let (Some(next), Some((current, controller))) = (&filter, active.as_ref())
                && next == current
            {
                return Some(controller.clone());
            }
            let controller = filter.as_ref().map(|f| {
                let source = source_for(f, &self.resolver, &self.searcher);
                Arc::new(PaginationController::new(
                    source,
                    self.page_size,
                    self.locale,
                    self.events.clone(),
                ))
            });
            let next = filter.clone().zip(controller.clone());
            (std::mem::replace(&mut *active, next), controller)
        };

        if let Some((old_filter, old)) = previous {
            match &filter {
                Some(next) => tracing::info!("Filter changed: {} -> {}", old_filter, next),
                None => tracing::info!("Filter cleared: {}", old_filter),
            }
            old.reset();
        }

        let controller = controller?;
        controller.load_initial().await;
        Some(controller)
    }

    /// Type-filtered convenience: switch the active category
    pub async fn set_category(
        &self,
        category: Option<&str>,
    ) -> Option<Arc<PaginationController>> {
        let filter = category
            .map(str::trim)
            .filter(|c| !c.is_empty() && *c != "none")
            .map(|c| FilterSpec::Category(c.to_ascii_lowercase()));
        self.apply(filter).await
    }

    /// Next page of the active feed; no-op when none is active
    pub async fn load_more(&self) -> Option<Applied> {
        let controller = self.controller()?;
        controller.load_more().await
    }

    /// Drop the active filter
    pub fn clear(&self) {
        if let Some((_, controller)) = self.lock().take() {
            controller.reset();
        }
    }
}
