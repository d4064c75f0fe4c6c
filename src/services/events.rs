//! Feed Events
//!
//! Notifications published by pagination and search controllers. A
//! presentation layer drains them from the session's channel instead of
//! polling controller state.

use std::sync::Arc;

/// Events emitted by controllers
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedEvent {
    /// A page was applied to the feed
    PageLoaded {
        /// Feed label, e.g. `catalog` or `type=fire`
        feed: Arc<str>,
        /// Items in the page
        count: usize,
        /// Offset the page was requested at
        offset: usize,
    },

    /// A load failed; previously loaded items are kept
    LoadFailed { feed: Arc<str>, message: Arc<str> },

    /// No more pages remain
    Exhausted { feed: Arc<str> },

    /// The feed was cleared back to its initial state
    Reset { feed: Arc<str> },

    /// A result arrived for a superseded request and was dropped
    StaleDiscarded { feed: Arc<str> },
}

impl FeedEvent {
    /// Label of the feed that emitted the event
    pub fn feed(&self) -> &str {
        match self {
            FeedEvent::PageLoaded { feed, .. }
            | FeedEvent::LoadFailed { feed, .. }
            | FeedEvent::Exhausted { feed }
            | FeedEvent::Reset { feed }
            | FeedEvent::StaleDiscarded { feed } => feed,
        }
    }
}
