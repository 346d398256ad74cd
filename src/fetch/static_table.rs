//! Static Fetcher
//!
//! Serves pages from a fixed in-memory table. Used for offline runs and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::PageFetcher;
use crate::error::FetchError;

/// Page fetcher answering from an in-memory table.
///
/// Clones share the invocation counter, so a caller can keep a clone to
/// observe how often the cache actually fetched.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    calls: Arc<AtomicUsize>,
}

impl StaticFetcher {
    /// Creates a fetcher with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page to the table.
    pub fn with_page(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.pages.insert(key.into(), content.into());
        self
    }

    /// Number of `fetch` calls across this fetcher and its clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PageFetcher for StaticFetcher {
    fn fetch(&self, key: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!(key = %key, "Static fetch");

        self.pages
            .get(key)
            .cloned()
            .ok_or_else(|| FetchError::Unavailable(key.to_string()))
    }
}
