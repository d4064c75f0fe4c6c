//! Transport - HTTP GET Abstraction
//!
//! The remote client only needs "GET this URL, give me JSON". Keeping that
//! behind a trait lets tests substitute a scripted transport.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};

/// A JSON-over-HTTP GET capability
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and parse the body as JSON
    ///
    /// Failures map onto [`Error::Timeout`], [`Error::NotFound`],
    /// [`Error::Transport`] or [`Error::Decode`].
    async fn get(&self, url: &str) -> Result<Value>;
}

/// Production transport over `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a client whose every request is bounded by `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Transport {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    fn map_error(url: &str, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                url: url.to_string(),
            }
        } else {
            Error::Transport {
                message: format!("{url}: {err}"),
            }
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Value> {
        tracing::trace!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_error(url, e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                url: url.to_string(),
            });
        }
        if !status.is_success() {
            return Err(Error::Transport {
                message: format!("{url}: HTTP {status}"),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(url, e))?;
        serde_json::from_slice(&body).map_err(|source| Error::Decode {
            url: url.to_string(),
            source,
        })
    }
}
