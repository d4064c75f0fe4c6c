//! Page Sources
//!
//! One [`PageSource`] per feed kind. The plain catalog pages through
//! contiguous ids; filtered feeds page through the id list their resolver
//! derives, fetched once per source.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::domain::filter::FilterSpec;
use crate::domain::item::ItemPage;
use crate::error::{Error, Result};
use crate::services::{ResultCache, RangeFetcher, Resolver, Searcher};
use crate::state::controller::PageSource;

/// Every item, by contiguous id: offset `n` starts at id `n + 1`
pub struct CatalogSource {
    fetcher: RangeFetcher,
    cache: Arc<ResultCache>,
}

impl CatalogSource {
    pub fn new(fetcher: RangeFetcher, cache: Arc<ResultCache>) -> Self {
        Self { fetcher, cache }
    }
}

#[async_trait]
impl PageSource for CatalogSource {
    fn label(&self) -> String {
        "catalog".to_string()
    }

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<ItemPage> {
        let to_id = |n: usize| {
            u32::try_from(n).map_err(|_| Error::Invalid {
                message: format!("offset {n} is out of range"),
            })
        };
        let start = to_id(offset + 1)?;
        let end = to_id(offset + limit)?;
        let items = self
            .fetcher
            .fetch_range(start, end, Some(&self.cache))
            .await?;
        // A short page means the end of the corpus
        let has_more = items.len() == limit;
        Ok(ItemPage::new(items, has_more))
    }
}

/// Items behind a resolver-derived id list
pub struct IdListSource {
    resolver: Resolver,
    filter: FilterSpec,
    ids: OnceCell<Vec<u32>>,
}

impl IdListSource {
    pub fn new(resolver: Resolver, filter: FilterSpec) -> Self {
        Self {
            resolver,
            filter,
            ids: OnceCell::new(),
        }
    }

    async fn ids(&self) -> Result<&[u32]> {
        let ids = self
            .ids
            .get_or_try_init(|| async {
                let ids = self.resolver.ids_for(&self.filter).await?;
                tracing::info!("{}: resolved {} ids", self.filter, ids.len());
                Ok::<_, Error>(ids)
            })
            .await?;
        Ok(ids)
    }
}

#[async_trait]
impl PageSource for IdListSource {
    fn label(&self) -> String {
        self.filter.to_string()
    }

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<ItemPage> {
        let ids = self.ids().await?;
        Ok(self.resolver.page_of_ids(ids, offset, limit).await)
    }
}

/// Windows into a curated game's id range
pub struct GameSource {
    resolver: Resolver,
    game: String,
}

impl GameSource {
    pub fn new(resolver: Resolver, game: impl Into<String>) -> Self {
        Self {
            resolver,
            game: game.into(),
        }
    }
}

#[async_trait]
impl PageSource for GameSource {
    fn label(&self) -> String {
        format!("game={}", self.game)
    }

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<ItemPage> {
        self.resolver
            .more_items_for_game(&self.game, offset, limit)
            .await
    }
}

/// A single page of ranked name matches
pub struct SearchSource {
    searcher: Searcher,
    resolver: Resolver,
    query: String,
}

impl SearchSource {
    pub fn new(searcher: Searcher, resolver: Resolver, query: impl Into<String>) -> Self {
        Self {
            searcher,
            resolver,
            query: query.into(),
        }
    }
}

#[async_trait]
impl PageSource for SearchSource {
    fn label(&self) -> String {
        format!("name={}", self.query)
    }

    async fn fetch_page(&self, offset: usize, _limit: usize) -> Result<ItemPage> {
        if offset > 0 {
            return Ok(ItemPage::empty());
        }
        let hits = self.searcher.search_by_name(&self.query).await?;
        let ids: Vec<u32> = hits.iter().filter_map(|h| h.reference.id()).collect();
        let items = self.resolver.items_for_ids(&ids).await;
        Ok(ItemPage::new(items, false))
    }
}

/// Source backing a feed filtered by `filter`
pub fn source_for(filter: &FilterSpec, resolver: &Resolver, searcher: &Searcher) -> Arc<dyn PageSource> {
    match filter {
        FilterSpec::Game(game) => Arc::new(GameSource::new(resolver.clone(), game.clone())),
        FilterSpec::Name(query) => Arc::new(SearchSource::new(
            searcher.clone(),
            resolver.clone(),
            query.clone(),
        )),
        FilterSpec::Category(_)
        | FilterSpec::Generation(_)
        | FilterSpec::Location(_)
        | FilterSpec::Move(_)
        | FilterSpec::Region(_) => Arc::new(IdListSource::new(resolver.clone(), filter.clone())),
    }
}
