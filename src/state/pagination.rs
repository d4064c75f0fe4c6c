//! Pagination State
//!
//! Pure state machine behind every infinite-scroll feed:
//!
//! ```text
//! Idle ──load_initial──▶ Loading ──ok──▶ Ready ◀──ok (non-empty)── LoadingMore
//!   ▲                                      │                            ▲
//!   │                                      └────────load_more───────────┘
//!   └──────────── reset (from any phase)          ok (empty) ──▶ Exhausted
//! ```
//!
//! Every load captures the current epoch. `reset` and `begin_initial` bump
//! it, so a result that lands after either is recognised as stale.

use std::sync::Arc;

use crate::domain::item::{Item, ItemPage};

/// Lifecycle phase of a feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing loaded yet, or reset
    #[default]
    Idle,
    /// First page in flight
    Loading,
    /// At least one page applied; may have more
    Ready,
    /// A follow-up page in flight
    LoadingMore,
    /// A follow-up page came back empty
    Exhausted,
}

/// Result of applying a finished load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The page was applied
    Page,
    /// The load failed; `error` is set, items are kept
    Failed,
    /// The load was superseded and its result dropped
    Stale,
}

/// Snapshot of a feed
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationState {
    items: Vec<Item>,
    offset: usize,
    has_more: bool,
    phase: LoadPhase,
    error: Option<Arc<str>>,
    page_size: usize,
    epoch: u64,
}

impl PaginationState {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            offset: 0,
            has_more: true,
            phase: LoadPhase::Idle,
            error: None,
            page_size: page_size.max(1),
            epoch: 0,
        }
    }

    // ==================== Getters ====================

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Offset the next page will be requested at
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_initial_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn is_loading_more(&self) -> bool {
        self.phase == LoadPhase::LoadingMore
    }

    pub fn is_loading(&self) -> bool {
        self.is_initial_loading() || self.is_loading_more()
    }

    /// Whether a first page has been applied since the last reset
    pub fn is_initialized(&self) -> bool {
        matches!(
            self.phase,
            LoadPhase::Ready | LoadPhase::LoadingMore | LoadPhase::Exhausted
        )
    }

    // ==================== Transitions ====================

    /// Start a first-page load; returns its epoch token
    ///
    /// Items already shown stay until the new page replaces them.
    pub fn begin_initial(&mut self) -> u64 {
        self.epoch += 1;
        self.phase = LoadPhase::Loading;
        self.error = None;
        self.epoch
    }

    /// Start a follow-up load; returns `(token, offset)`
    ///
    /// `None` while another load is in flight, before the first page, or
    /// once the feed has no more pages.
    pub fn begin_more(&mut self) -> Option<(u64, usize)> {
        if self.phase != LoadPhase::Ready || !self.has_more {
            return None;
        }
        self.phase = LoadPhase::LoadingMore;
        Some((self.epoch, self.offset))
    }

    pub fn finish_initial(&mut self, token: u64, result: Result<ItemPage, Arc<str>>) -> Applied {
        if token != self.epoch {
            return Applied::Stale;
        }
        match result {
            Ok(page) => {
                self.has_more = page.has_more && !page.items.is_empty();
                self.items = page.items;
                self.offset = self.page_size;
                self.phase = LoadPhase::Ready;
                Applied::Page
            }
            Err(message) => {
                self.error = Some(message);
                self.phase = if self.items.is_empty() {
                    LoadPhase::Idle
                } else {
                    LoadPhase::Ready
                };
                Applied::Failed
            }
        }
    }

    pub fn finish_more(&mut self, token: u64, result: Result<ItemPage, Arc<str>>) -> Applied {
        if token != self.epoch {
            return Applied::Stale;
        }
        match result {
            Ok(page) if page.items.is_empty() => {
                self.has_more = false;
                self.phase = LoadPhase::Exhausted;
                Applied::Page
            }
            Ok(page) => {
                self.items.extend(page.items);
                self.offset += self.page_size;
                self.has_more = page.has_more;
                self.phase = LoadPhase::Ready;
                Applied::Page
            }
            Err(message) => {
                self.error = Some(message);
                self.phase = LoadPhase::Ready;
                Applied::Failed
            }
        }
    }

    /// Back to the initial state; in-flight loads become stale
    pub fn reset(&mut self) {
        self.items.clear();
        self.offset = 0;
        self.has_more = true;
        self.error = None;
        self.phase = LoadPhase::Idle;
        self.epoch += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::fixtures::item;

    fn page(ids: std::ops::RangeInclusive<u32>, has_more: bool) -> ItemPage {
        ItemPage::new(ids.map(|id| item(id, "x")).collect(), has_more)
    }

    #[test]
    fn test_initial_then_more_then_exhausted() {
        let mut state = PaginationState::new(20);
        assert!(state.begin_more().is_none());

        let token = state.begin_initial();
        assert!(state.is_initial_loading());
        assert_eq!(state.finish_initial(token, Ok(page(1..=20, true))), Applied::Page);
        assert_eq!(state.offset(), 20);
        assert!(state.has_more());

        let (token, offset) = state.begin_more().expect("ready");
        assert_eq!(offset, 20);
        assert!(state.begin_more().is_none());
        assert_eq!(state.finish_more(token, Ok(page(21..=40, true))), Applied::Page);
        assert_eq!(state.items().len(), 40);
        assert_eq!(state.offset(), 40);

        let (token, _) = state.begin_more().expect("ready");
        state.finish_more(token, Ok(ItemPage::new(Vec::new(), true)));
        assert_eq!(state.phase(), LoadPhase::Exhausted);
        assert!(!state.has_more());
        assert!(state.begin_more().is_none());
    }

    #[test]
    fn test_empty_first_page_has_no_more() {
        let mut state = PaginationState::new(20);
        let token = state.begin_initial();
        state.finish_initial(token, Ok(ItemPage::new(Vec::new(), true)));
        assert_eq!(state.phase(), LoadPhase::Ready);
        assert!(!state.has_more());
    }

    #[test]
    fn test_failed_more_keeps_items() {
        let mut state = PaginationState::new(20);
        let token = state.begin_initial();
        state.finish_initial(token, Ok(page(1..=20, true)));

        let (token, _) = state.begin_more().expect("ready");
        assert_eq!(state.finish_more(token, Err("offline".into())), Applied::Failed);
        assert_eq!(state.items().len(), 20);
        assert_eq!(state.error(), Some("offline"));
        assert_eq!(state.phase(), LoadPhase::Ready);
    }

    #[test]
    fn test_reset_discards_in_flight_result() {
        let mut state = PaginationState::new(20);
        let token = state.begin_initial();
        state.finish_initial(token, Ok(page(1..=20, true)));
        let (token, _) = state.begin_more().expect("ready");

        state.reset();
        assert_eq!(state.finish_more(token, Ok(page(21..=40, true))), Applied::Stale);
        assert!(state.items().is_empty());
        assert_eq!(state.offset(), 0);
        assert!(state.has_more());
        assert_eq!(state.error(), None);
        assert_eq!(state.phase(), LoadPhase::Idle);
    }
}
