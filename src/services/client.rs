//! Remote Client
//!
//! Typed GET access to the upstream REST API. A request that times out is
//! retried exactly once; a second timeout surfaces as a transport failure.
//! Every other failure propagates on the first attempt.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::item::Item;
use crate::domain::reference::ListPage;
use crate::domain::resources::{
    Generation, Location, LocationArea, Move, Region, Species, TypeDetail,
};
use crate::error::{Error, Result};
use crate::services::transport::Transport;

/// Client bound to one base URL
#[derive(Clone)]
pub struct RemoteClient {
    base_url: Arc<str>,
    transport: Arc<dyn Transport>,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<Arc<str>>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base (`pokemon/25`)
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `path` and decode the body into `T`
    pub async fn request<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let body = match self.transport.get(&url).await {
            Err(Error::Timeout { .. }) => {
                tracing::warn!("Request timed out, retrying once: {}", url);
                match self.transport.get(&url).await {
                    Err(Error::Timeout { .. }) => {
                        return Err(Error::Transport {
                            message: format!("{url}: timed out after retry"),
                        });
                    }
                    other => other?,
                }
            }
            other => other?,
        };

        serde_json::from_value(body).map_err(|source| Error::Decode { url, source })
    }

    // ==================== Items ====================

    /// `/pokemon?limit=&offset=`
    pub async fn list_items(&self, limit: usize, offset: usize) -> Result<ListPage> {
        self.request(&format!("pokemon?limit={limit}&offset={offset}"))
            .await
    }

    /// `/pokemon/{id or name}`, validated
    pub async fn get_item(&self, id_or_name: &str) -> Result<Item> {
        let item: Item = self.request(&format!("pokemon/{id_or_name}")).await?;
        item.validate()
    }

    /// `/pokemon-species/{id or name}`
    pub async fn get_species(&self, id_or_name: &str) -> Result<Species> {
        self.request(&format!("pokemon-species/{id_or_name}")).await
    }

    // ==================== Collections ====================

    pub async fn list_types(&self) -> Result<ListPage> {
        self.request("type").await
    }

    pub async fn get_type(&self, name: &str) -> Result<TypeDetail> {
        self.request(&format!("type/{name}")).await
    }

    pub async fn list_generations(&self) -> Result<ListPage> {
        self.request("generation").await
    }

    pub async fn get_generation(&self, id: u32) -> Result<Generation> {
        self.request(&format!("generation/{id}")).await
    }

    pub async fn list_locations(&self, limit: usize, offset: usize) -> Result<ListPage> {
        self.request(&format!("location?limit={limit}&offset={offset}"))
            .await
    }

    pub async fn get_location(&self, id_or_name: &str) -> Result<Location> {
        self.request(&format!("location/{id_or_name}")).await
    }

    pub async fn get_location_area(&self, id_or_name: &str) -> Result<LocationArea> {
        self.request(&format!("location-area/{id_or_name}")).await
    }

    pub async fn list_moves(&self, limit: usize, offset: usize) -> Result<ListPage> {
        self.request(&format!("move?limit={limit}&offset={offset}"))
            .await
    }

    pub async fn get_move(&self, id_or_name: &str) -> Result<Move> {
        self.request(&format!("move/{id_or_name}")).await
    }

    pub async fn list_regions(&self) -> Result<ListPage> {
        self.request("region").await
    }

    pub async fn get_region(&self, id_or_name: &str) -> Result<Region> {
        self.request(&format!("region/{id_or_name}")).await
    }
}

impl std::fmt::Debug for RemoteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
