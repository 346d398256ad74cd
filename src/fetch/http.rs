//! HTTP Fetcher
//!
//! Fetches pages over HTTP, treating each key as a URL.

use std::time::Duration;

use tokio::runtime::Handle;
use tracing::{info, warn};

use super::PageFetcher;
use crate::config::Config;
use crate::error::FetchError;

/// Page fetcher backed by an async `reqwest::Client`.
///
/// Requests are driven to completion on the given runtime, so `fetch` blocks
/// the calling thread. Call it from a plain thread or from
/// `tokio::task::spawn_blocking`, never from inside an async task.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    runtime: Handle,
}

impl HttpFetcher {
    /// Creates a fetcher with a per-request timeout.
    pub fn new(runtime: Handle, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, runtime })
    }

    /// Creates a fetcher using the configured fetch timeout.
    pub fn from_config(config: &Config, runtime: Handle) -> Result<Self, FetchError> {
        Self::new(runtime, Duration::from_secs(config.fetch_timeout))
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, key: &str) -> Result<String, FetchError> {
        let result = self.runtime.block_on(self.get(key));

        match &result {
            Ok(body) => info!(url = %key, bytes = body.len(), "Page downloaded"),
            Err(e) => warn!(url = %key, error = %e, "Failed to download page"),
        }

        result
    }
}
