//! Service Layer
//!
//! Data acquisition over the upstream REST API: transport, typed client,
//! result cache, batched range fetching, relevance search and derived-list
//! resolution, wired together by [`CatalogSession`].
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      CatalogSession                          │
//! │  ┌────────────┐  ┌──────────────┐  ┌────────────────────┐    │
//! │  │  Searcher  │  │   Resolver   │  │    ResultCache     │    │
//! │  └─────┬──────┘  └──────┬───────┘  └─────────▲──────────┘    │
//! │        │         ┌──────▼───────┐            │               │
//! │        │         │ RangeFetcher │────────────┘               │
//! │        │         └──────┬───────┘                            │
//! │        └───────▶ RemoteClient ──▶ Transport                  │
//! └──────────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼ FeedEvent
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      State Layer                             │
//! │      (PaginationController, FilteredFeed, SearchController)  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod cache;
mod client;
mod events;
mod range;
mod resolvers;
mod search;
mod session;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::*;
pub use client::*;
pub use events::*;
pub use range::*;
pub use resolvers::*;
pub use search::*;
pub use session::*;
pub use transport::*;
