//! Range Fetcher
//!
//! Fetches an inclusive id range as individual item requests, issued in
//! fixed-size concurrent batches with a short pause between batches. A
//! failed id is dropped from the result; it never aborts the range.

use std::time::Duration;

use futures::StreamExt;
use futures::future::join_all;

use crate::domain::item::Item;
use crate::error::{Error, Result};
use crate::services::cache::ResultCache;
use crate::services::client::RemoteClient;

#[derive(Debug, Clone)]
pub struct RangeFetcher {
    client: RemoteClient,
    batch_size: usize,
    batch_delay: Duration,
}

impl RangeFetcher {
    pub fn new(client: RemoteClient, batch_size: usize, batch_delay: Duration) -> Self {
        Self {
            client,
            batch_size: batch_size.max(1),
            batch_delay,
        }
    }

    pub fn client(&self) -> &RemoteClient {
        &self.client
    }

    /// Items for `[start, end]` in ascending id order
    ///
    /// A result shorter than the range means some ids were unavailable.
    pub async fn fetch_range(
        &self,
        start: u32,
        end: u32,
        cache: Option<&ResultCache>,
    ) -> Result<Vec<Item>> {
        if start == 0 {
            return Err(Error::Invalid {
                message: format!("range must start at a positive id, got {start}-{end}"),
            });
        }
        if let Some(items) = cache.and_then(|c| c.get_range(start, end)) {
            return Ok(items);
        }
        if start > end {
            return Ok(Vec::new());
        }

        let ids: Vec<u32> = (start..=end).collect();
        let batch_count = ids.len().div_ceil(self.batch_size);
        let mut items = Vec::with_capacity(ids.len());
        // Ids that failed for a reason other than being absent upstream
        let mut retryable = 0usize;

        for (index, batch) in ids.chunks(self.batch_size).enumerate() {
            let fetched = join_all(batch.iter().map(|&id| self.fetch_item(id, cache))).await;
            for (id, result) in batch.iter().zip(fetched) {
                match result {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        tracing::debug!("Dropping id {} from batch: {}", id, e);
                        if !e.is_not_found() {
                            retryable += 1;
                        }
                    }
                }
            }

            if index + 1 < batch_count && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }
        items.sort_by_key(|item| item.id);

        let requested = ids.len();
        if items.len() < requested {
            tracing::debug!(
                "Range {}-{}: {} of {} ids unavailable",
                start,
                end,
                requested - items.len(),
                requested
            );
        }

        // Fetched items are already in the per-id tier
        if let Some(cache) = cache {
            if retryable == 0 {
                cache.put_range(start, end, items.clone());
            } else {
                tracing::warn!(
                    "Range {}-{} not cached: {} ids failed transiently",
                    start,
                    end,
                    retryable
                );
            }
        }
        Ok(items)
    }

    /// A single item, with failures propagated to the caller
    pub async fn fetch_item(&self, id: u32, cache: Option<&ResultCache>) -> Result<Item> {
        if let Some(item) = cache.and_then(|c| c.get_item(id)) {
            return Ok(item);
        }
        let item = self.client.get_item(&id.to_string()).await?;
        if let Some(cache) = cache {
            cache.put_item(item.clone());
        }
        Ok(item)
    }

    /// Items for arbitrary ids, at most `concurrency` in flight
    ///
    /// Keeps the input order; failed ids are dropped.
    pub async fn fetch_ids(
        &self,
        ids: &[u32],
        cache: Option<&ResultCache>,
        concurrency: usize,
    ) -> Vec<Item> {
        futures::stream::iter(ids.iter().copied())
            .map(|id| self.fetch_one(id, cache))
            .buffered(concurrency.max(1))
            .filter_map(|item| async move { item })
            .collect()
            .await
    }

    async fn fetch_one(&self, id: u32, cache: Option<&ResultCache>) -> Option<Item> {
        match self.fetch_item(id, cache).await {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("Dropping id {} from batch: {}", id, e);
                None
            }
        }
    }
}
