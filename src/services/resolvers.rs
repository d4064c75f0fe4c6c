//! Derived-List Resolvers
//!
//! Turn a higher-level filter (category, generation, move, region, location,
//! curated game) into item ids or items. Every fan-out hop is settled per
//! sub-request: one failed sub-resource drops its contribution and the rest
//! of the chain carries on.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;

use futures::StreamExt;
use serde::Serialize;

use crate::constants::{LOCATION_OPTIONS_LIMIT, MOVE_OPTIONS_LIMIT};
use crate::domain::detail::{ItemDetail, humanize};
use crate::domain::filter::{FilterKind, FilterSpec};
use crate::domain::game::{self, GAMES, GameWindow};
use crate::domain::item::{Item, ItemPage};
use crate::domain::reference::{ItemReference, ids_from_references};
use crate::error::{Error, Result};
use crate::i18n::{Locale, t};
use crate::services::cache::ResultCache;
use crate::services::client::RemoteClient;
use crate::services::range::RangeFetcher;

/// Upstream categories that never hold catalog entries
const HIDDEN_TYPES: &[&str] = &["unknown", "shadow", "stellar"];

/// One entry of a filter picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// Value passed back as the filter value
    pub id: String,
    pub label: String,
}

/// Run `f` over `inputs` with at most `concurrency` in flight, keeping
/// successes in input order and dropping failures
async fn settle_all<I, F, Fut, R>(inputs: I, concurrency: usize, f: F) -> Vec<R>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<R>>,
{
    futures::stream::iter(inputs)
        .map(f)
        .buffered(concurrency.max(1))
        .filter_map(|result| async move {
            match result {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!("Dropping sub-resource: {}", e);
                    None
                }
            }
        })
        .collect()
        .await
}

/// Path key for a reference: its numeric id when it has one, else its name
fn reference_key(reference: &ItemReference) -> String {
    reference
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| reference.name.clone())
}

#[derive(Debug, Clone)]
pub struct Resolver {
    client: RemoteClient,
    fetcher: RangeFetcher,
    cache: Arc<ResultCache>,
    concurrency: usize,
}

impl Resolver {
    pub fn new(fetcher: RangeFetcher, cache: Arc<ResultCache>, concurrency: usize) -> Self {
        Self {
            client: fetcher.client().clone(),
            fetcher,
            cache,
            concurrency: concurrency.max(1),
        }
    }

    pub fn fetcher(&self) -> &RangeFetcher {
        &self.fetcher
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    // ==================== Id lists ====================

    /// Ids of every member of a category, in upstream slot order
    pub async fn ids_for_type(&self, name: &str) -> Result<Vec<u32>> {
        let detail = self.client.get_type(name).await?;
        Ok(ids_from_references(detail.pokemon.iter().map(|m| &m.pokemon)))
    }

    /// Species ids introduced in a generation, ascending
    pub async fn ids_for_generation(&self, index: u32) -> Result<Vec<u32>> {
        let generation = self.client.get_generation(index).await?;
        let mut ids = ids_from_references(&generation.pokemon_species);
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    /// Ids that can learn a move, in upstream order
    pub async fn ids_for_move(&self, id_or_name: &str) -> Result<Vec<u32>> {
        let learned = self.client.get_move(id_or_name).await?;
        Ok(ids_from_references(&learned.learned_by_pokemon))
    }

    /// Ids encountered anywhere in a region, ascending and unique
    ///
    /// region -> locations -> areas -> encounters
    pub async fn ids_for_region(&self, id_or_name: &str) -> Result<Vec<u32>> {
        let region = self.client.get_region(id_or_name).await?;
        let keys: Vec<String> = region.locations.iter().map(reference_key).collect();
        let locations = settle_all(keys, self.concurrency, |key: String| async move {
            self.client.get_location(&key).await
        })
        .await;

        let area_refs: Vec<&ItemReference> =
            locations.iter().flat_map(|l| l.areas.iter()).collect();
        let ids = self.encountered_ids(area_refs).await;

        tracing::info!(
            "Region {}: {} locations, {} ids",
            region.name,
            locations.len(),
            ids.len()
        );
        Ok(ids)
    }

    /// Ids encountered in one location, ascending and unique
    pub async fn ids_for_location(&self, id_or_name: &str) -> Result<Vec<u32>> {
        let location = self.client.get_location(id_or_name).await?;
        Ok(self.encountered_ids(location.areas.iter()).await)
    }

    async fn encountered_ids<'a>(
        &self,
        areas: impl IntoIterator<Item = &'a ItemReference>,
    ) -> Vec<u32> {
        let keys: Vec<String> = areas.into_iter().map(reference_key).collect();
        let areas = settle_all(keys, self.concurrency, |key: String| async move {
            self.client.get_location_area(&key).await
        })
        .await;

        let ids: BTreeSet<u32> = areas
            .iter()
            .flat_map(|area| {
                ids_from_references(area.pokemon_encounters.iter().map(|e| &e.pokemon))
            })
            .collect();
        ids.into_iter().collect()
    }

    /// Id list behind any id-list filter
    ///
    /// Name and game filters are not id-list backed and yield `Invalid`.
    pub async fn ids_for(&self, filter: &FilterSpec) -> Result<Vec<u32>> {
        match filter {
            FilterSpec::Category(name) => self.ids_for_type(name).await,
            FilterSpec::Generation(index) => self.ids_for_generation(*index).await,
            FilterSpec::Move(id_or_name) => self.ids_for_move(id_or_name).await,
            FilterSpec::Region(id_or_name) => self.ids_for_region(id_or_name).await,
            FilterSpec::Location(id_or_name) => self.ids_for_location(id_or_name).await,
            FilterSpec::Name(_) | FilterSpec::Game(_) => Err(Error::Invalid {
                message: format!("filter '{filter}' does not resolve to an id list"),
            }),
        }
    }

    // ==================== Items ====================

    /// Items for `ids`, keeping their order; unavailable ids are dropped
    pub async fn items_for_ids(&self, ids: &[u32]) -> Vec<Item> {
        self.fetcher
            .fetch_ids(ids, Some(&self.cache), self.concurrency)
            .await
    }

    /// Window `[offset, offset + limit)` of an id list, resolved to items
    pub async fn page_of_ids(&self, ids: &[u32], offset: usize, limit: usize) -> ItemPage {
        let start = offset.min(ids.len());
        let end = offset.saturating_add(limit).min(ids.len());
        let items = self.items_for_ids(&ids[start..end]).await;
        ItemPage::new(items, end < ids.len())
    }

    /// First `limit` items for an id-list filter
    pub async fn items_for(&self, filter: &FilterSpec, limit: usize) -> Result<Vec<Item>> {
        if let FilterSpec::Game(game_id) = filter {
            return Ok(self.items_for_game(game_id, limit).await?.items);
        }
        let ids = self.ids_for(filter).await?;
        Ok(self.page_of_ids(&ids, 0, limit).await.items)
    }

    // ==================== Curated games ====================

    /// Window into a game's range; `None` past its end
    pub fn game_window(
        &self,
        game_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Option<GameWindow>> {
        Ok(game::lookup(game_id)?.window(offset, limit))
    }

    /// First `limit` items of a game
    pub async fn items_for_game(&self, game_id: &str, limit: usize) -> Result<ItemPage> {
        self.more_items_for_game(game_id, 0, limit).await
    }

    /// Items `[start + offset, start + offset + limit - 1]` of a game, clipped to its end
    pub async fn more_items_for_game(
        &self,
        game_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<ItemPage> {
        let Some(window) = self.game_window(game_id, offset, limit)? else {
            return Ok(ItemPage::empty());
        };
        let items = self
            .fetcher
            .fetch_range(window.start, window.end, Some(&self.cache))
            .await?;
        Ok(ItemPage::new(items, window.has_more))
    }

    // ==================== Detail ====================

    /// Item and species fetched together, assembled for `locale`
    pub async fn item_detail(&self, id: u32, locale: Locale) -> Result<ItemDetail> {
        let species_key = id.to_string();
        let (item, species) = futures::try_join!(
            self.fetcher.fetch_item(id, Some(&self.cache)),
            self.client.get_species(&species_key),
        )?;
        Ok(ItemDetail::assemble(item, species, locale.tag()))
    }

    // ==================== Filter options ====================

    /// Options a picker shows for `kind`
    pub async fn filter_options(
        &self,
        kind: FilterKind,
        locale: Locale,
    ) -> Result<Vec<FilterOption>> {
        let humanized = |references: Vec<ItemReference>| -> Vec<FilterOption> {
            references
                .into_iter()
                .map(|r| FilterOption {
                    label: humanize(&r.name),
                    id: r.name,
                })
                .collect()
        };

        let options = match kind {
            FilterKind::Category => humanized(
                self.client
                    .list_types()
                    .await?
                    .results
                    .into_iter()
                    .filter(|r| !HIDDEN_TYPES.contains(&r.name.as_str()))
                    .collect(),
            ),
            FilterKind::Generation => {
                let label = t("option-generation", locale);
                (1..=self.client.list_generations().await?.results.len())
                    .map(|index| FilterOption {
                        id: index.to_string(),
                        label: format!("{label} {index}"),
                    })
                    .collect()
            }
            FilterKind::Location => humanized(
                self.client
                    .list_locations(LOCATION_OPTIONS_LIMIT, 0)
                    .await?
                    .results,
            ),
            FilterKind::Move => humanized(
                self.client
                    .list_moves(MOVE_OPTIONS_LIMIT, 0)
                    .await?
                    .results,
            ),
            FilterKind::Region => humanized(self.client.list_regions().await?.results),
            FilterKind::Game => GAMES
                .iter()
                .map(|g| FilterOption {
                    id: g.id.to_string(),
                    label: g.title.to_string(),
                })
                .collect(),
            FilterKind::Name => {
                return Err(Error::Invalid {
                    message: "name search has no option list".to_string(),
                });
            }
        };
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use serde_json::json;

    use crate::services::testing::{
        BASE, FakeTransport, list_json, reference_json, species_json,
    };

    fn resolver(fake: &Arc<FakeTransport>) -> Resolver {
        let fetcher = RangeFetcher::new(RemoteClient::new(BASE, fake.clone()), 10, Duration::ZERO);
        Resolver::new(fetcher, Arc::new(ResultCache::new()), 20)
    }

    fn ids(items: &[Item]) -> Vec<u32> {
        items.iter().map(|i| i.id).collect()
    }

    fn route_kanto(fake: &FakeTransport) {
        fake.route(
            format!("{BASE}/region/kanto"),
            json!({
                "id": 1,
                "name": "kanto",
                "locations": [
                    reference_json("location", 86, "pallet-town"),
                    reference_json("location", 88, "viridian-forest"),
                    reference_json("location", 90, "broken-location"),
                ]
            }),
        );
        fake.route(
            format!("{BASE}/location/86"),
            json!({ "id": 86, "name": "pallet-town", "areas": [reference_json("location-area", 285, "pallet-town-area")] }),
        );
        fake.route(
            format!("{BASE}/location/88"),
            json!({
                "id": 88,
                "name": "viridian-forest",
                "areas": [
                    reference_json("location-area", 321, "viridian-forest-area"),
                    reference_json("location-area", 999, "missing-area"),
                ]
            }),
        );
        fake.route(
            format!("{BASE}/location-area/285"),
            json!({ "id": 285, "name": "pallet-town-area", "pokemon_encounters": [
                { "pokemon": reference_json("pokemon", 72, "tentacool") },
                { "pokemon": reference_json("pokemon", 10, "caterpie") },
            ]}),
        );
        fake.route(
            format!("{BASE}/location-area/321"),
            json!({ "id": 321, "name": "viridian-forest-area", "pokemon_encounters": [
                { "pokemon": reference_json("pokemon", 10, "caterpie") },
                { "pokemon": reference_json("pokemon", 25, "pikachu") },
                { "pokemon": { "name": "broken", "url": "not-a-url" } },
            ]}),
        );
    }

    #[tokio::test]
    async fn test_region_chain_tolerates_missing_hops() {
        let fake = FakeTransport::new();
        route_kanto(&fake);

        let ids = resolver(&fake).ids_for_region("kanto").await.expect("region");
        assert_eq!(ids, vec![10, 25, 72]);
    }

    #[tokio::test]
    async fn test_location_resolves_its_areas() {
        let fake = FakeTransport::new();
        route_kanto(&fake);

        let ids = resolver(&fake).ids_for_location("88").await.expect("location");
        assert_eq!(ids, vec![10, 25]);
    }

    #[tokio::test]
    async fn test_type_and_move_keep_upstream_order() {
        let fake = FakeTransport::new();
        fake.route(
            format!("{BASE}/type/electric"),
            json!({ "id": 13, "name": "electric", "pokemon": [
                { "slot": 1, "pokemon": reference_json("pokemon", 26, "raichu") },
                { "slot": 1, "pokemon": reference_json("pokemon", 25, "pikachu") },
            ]}),
        );
        fake.route(
            format!("{BASE}/move/thunderbolt"),
            json!({ "id": 85, "name": "thunderbolt", "learned_by_pokemon": [
                reference_json("pokemon", 145, "zapdos"),
                reference_json("pokemon", 25, "pikachu"),
            ]}),
        );
        let resolver = resolver(&fake);

        assert_eq!(resolver.ids_for_type("electric").await.expect("type"), vec![26, 25]);
        assert_eq!(
            resolver.ids_for(&FilterSpec::Move("thunderbolt".into())).await.expect("move"),
            vec![145, 25]
        );
    }

    #[tokio::test]
    async fn test_generation_page_drops_failed_items() {
        let fake = FakeTransport::new();
        fake.route(
            format!("{BASE}/generation/1"),
            json!({ "id": 1, "name": "generation-i", "pokemon_species": [
                reference_json("pokemon-species", 3, "venusaur"),
                reference_json("pokemon-species", 1, "bulbasaur"),
                reference_json("pokemon-species", 2, "ivysaur"),
            ]}),
        );
        fake.route_items(1, 3);
        fake.unroute(&format!("{BASE}/pokemon/2"));
        let resolver = resolver(&fake);

        let items = resolver
            .items_for(&FilterSpec::Generation(1), 20)
            .await
            .expect("generation");
        assert_eq!(ids(&items), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_page_of_ids_windows() {
        let fake = FakeTransport::new();
        fake.route_items(1, 25);
        let resolver = resolver(&fake);
        let all: Vec<u32> = (1..=25).collect();

        let first = resolver.page_of_ids(&all, 0, 20).await;
        assert_eq!(first.items.len(), 20);
        assert!(first.has_more);

        let second = resolver.page_of_ids(&all, 20, 20).await;
        assert_eq!(ids(&second.items), (21..=25).collect::<Vec<_>>());
        assert!(!second.has_more);

        let past = resolver.page_of_ids(&all, 40, 20).await;
        assert!(past.items.is_empty());
        assert!(!past.has_more);
    }

    #[tokio::test]
    async fn test_game_windows_resume() {
        let fake = FakeTransport::new();
        fake.route_items(1, 151);
        let resolver = resolver(&fake);

        let first = resolver.items_for_game("red-green", 20).await.expect("first");
        assert_eq!(ids(&first.items), (1..=20).collect::<Vec<_>>());
        assert!(first.has_more);

        let second = resolver
            .more_items_for_game("red-green", 20, 20)
            .await
            .expect("second");
        assert_eq!(ids(&second.items), (21..=40).collect::<Vec<_>>());

        let tail = resolver
            .more_items_for_game("red-green", 145, 20)
            .await
            .expect("tail");
        assert_eq!(ids(&tail.items), (146..=151).collect::<Vec<_>>());
        assert!(!tail.has_more);

        fake.reset_calls();
        let past = resolver
            .more_items_for_game("red-green", 151, 20)
            .await
            .expect("past end");
        assert!(past.items.is_empty());
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_game_makes_no_calls() {
        let fake = FakeTransport::new();
        let resolver = resolver(&fake);

        let err = resolver
            .items_for_game("pokemon-snap", 20)
            .await
            .expect_err("unknown");
        assert!(matches!(err, Error::UnknownGame { .. }));
        let err = resolver
            .more_items_for_game("pokemon-snap", 20, 20)
            .await
            .expect_err("unknown");
        assert!(matches!(err, Error::UnknownGame { .. }));
        assert_eq!(fake.calls(), 0);
    }

    #[tokio::test]
    async fn test_item_detail_is_localized() {
        let fake = FakeTransport::new();
        fake.route_items(4, 4);
        fake.route(format!("{BASE}/pokemon-species/4"), species_json(4));
        let resolver = resolver(&fake);

        let detail = resolver.item_detail(4, Locale::PtBr).await.expect("pt");
        assert_eq!(detail.display_name, "Item-pt 4");
        assert_eq!(detail.dex_number, "#004");

        let detail = resolver.item_detail(4, Locale::En).await.expect("en");
        assert_eq!(detail.display_name, "Item 4");
        assert_eq!(detail.description, "A test entry.");
    }

    #[tokio::test]
    async fn test_filter_options() {
        let fake = FakeTransport::new();
        fake.route(
            format!("{BASE}/type"),
            list_json("type", &[(10, "fire"), (10001, "unknown"), (11, "water")]),
        );
        fake.route(
            format!("{BASE}/generation"),
            list_json("generation", &[(1, "generation-i"), (2, "generation-ii")]),
        );
        fake.route(
            format!("{BASE}/location?limit=50&offset=0"),
            list_json("location", &[(67, "mt-moon")]),
        );
        let resolver = resolver(&fake);

        let types = resolver
            .filter_options(FilterKind::Category, Locale::En)
            .await
            .expect("types");
        let labels: Vec<&str> = types.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Fire", "Water"]);

        let generations = resolver
            .filter_options(FilterKind::Generation, Locale::PtBr)
            .await
            .expect("generations");
        assert_eq!(generations[1].id, "2");
        assert_eq!(generations[1].label, "Geração 2");

        let locations = resolver
            .filter_options(FilterKind::Location, Locale::En)
            .await
            .expect("locations");
        assert_eq!(
            locations,
            vec![FilterOption {
                id: "mt-moon".into(),
                label: "Mt Moon".into(),
            }]
        );

        let games = resolver
            .filter_options(FilterKind::Game, Locale::En)
            .await
            .expect("games");
        assert_eq!(games.len(), GAMES.len());
        assert!(resolver.filter_options(FilterKind::Name, Locale::En).await.is_err());
    }
}
