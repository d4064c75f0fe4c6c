//! Scripted transport and JSON builders for service and state tests

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::error::{Error, Result};
use crate::services::transport::Transport;

pub const BASE: &str = "http://test.local/api/v2";

/// Serves canned JSON per URL; unrouted URLs answer 404
#[derive(Default)]
pub struct FakeTransport {
    routes: Mutex<HashMap<String, Value>>,
    timeout_once: Mutex<HashSet<String>>,
    timeout_always: Mutex<HashSet<String>>,
    offline: Mutex<HashSet<String>>,
    calls: AtomicUsize,
    log: Mutex<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn route(&self, url: impl Into<String>, body: Value) {
        self.routes.lock().expect("routes").insert(url.into(), body);
    }

    /// Route `pokemon/{id}` for every id in `start..=end`
    pub fn route_items(&self, start: u32, end: u32) {
        for id in start..=end {
            self.route(format!("{BASE}/pokemon/{id}"), item_json(id));
        }
    }

    pub fn unroute(&self, url: &str) {
        self.routes.lock().expect("routes").remove(url);
    }

    pub fn timeout_once(&self, url: impl Into<String>) {
        self.timeout_once.lock().expect("timeouts").insert(url.into());
    }

    pub fn timeout_always(&self, url: impl Into<String>) {
        self.timeout_always
            .lock()
            .expect("timeouts")
            .insert(url.into());
    }

    /// Fail `url` with a connection-level error
    pub fn offline(&self, url: impl Into<String>) {
        self.offline.lock().expect("offline").insert(url.into());
    }

    /// Undo [`Self::offline`] for `url`
    pub fn online(&self, url: &str) {
        self.offline.lock().expect("offline").remove(url);
    }

    /// Total GETs issued
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// GETs issued for `url`
    pub fn calls_to(&self, url: &str) -> usize {
        self.log
            .lock()
            .expect("log")
            .iter()
            .filter(|u| u.as_str() == url)
            .count()
    }

    pub fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
        self.log.lock().expect("log").clear();
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().expect("log").push(url.to_string());
        tokio::task::yield_now().await;

        if self.timeout_once.lock().expect("timeouts").remove(url)
            || self.timeout_always.lock().expect("timeouts").contains(url)
        {
            return Err(Error::Timeout {
                url: url.to_string(),
            });
        }
        if self.offline.lock().expect("offline").contains(url) {
            return Err(Error::Transport {
                message: format!("{url}: connection refused"),
            });
        }
        match self.routes.lock().expect("routes").get(url) {
            Some(body) => Ok(body.clone()),
            None => Err(Error::NotFound {
                url: url.to_string(),
            }),
        }
    }
}

pub fn item_name(id: u32) -> String {
    format!("item-{id}")
}

/// Minimal `/pokemon/{id}` body
pub fn item_json(id: u32) -> Value {
    json!({
        "id": id,
        "name": item_name(id),
        "height": 7,
        "weight": 69,
        "types": [
            { "slot": 1, "type": { "name": "grass", "url": format!("{BASE}/type/12/") } }
        ],
        "stats": [
            { "base_stat": 45, "effort": 0, "stat": { "name": "hp", "url": format!("{BASE}/stat/1/") } }
        ],
        "sprites": { "front_default": format!("https://img.test/{id}.png") }
    })
}

/// `{name, url}` pointing at `resource/{id}/`
pub fn reference_json(resource: &str, id: u32, name: &str) -> Value {
    json!({ "name": name, "url": format!("{BASE}/{resource}/{id}/") })
}

/// Listing envelope over `(id, name)` pairs
pub fn list_json(resource: &str, entries: &[(u32, &str)]) -> Value {
    let results: Vec<Value> = entries
        .iter()
        .map(|(id, name)| reference_json(resource, *id, name))
        .collect();
    json!({
        "count": results.len(),
        "next": null,
        "previous": null,
        "results": results,
    })
}

/// `/pokemon-species/{id}` with an English and a Portuguese name
pub fn species_json(id: u32) -> Value {
    json!({
        "id": id,
        "name": item_name(id),
        "names": [
            { "name": format!("Item {id}"), "language": { "name": "en", "url": format!("{BASE}/language/9/") } },
            { "name": format!("Item-pt {id}"), "language": { "name": "pt-BR", "url": format!("{BASE}/language/12/") } }
        ],
        "flavor_text_entries": [
            { "flavor_text": "A test\nentry.", "language": { "name": "en", "url": format!("{BASE}/language/9/") } }
        ],
        "gender_rate": 1,
        "capture_rate": 45
    })
}
