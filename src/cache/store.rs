//! Gated Cache Module
//!
//! Exact page store gated by a membership filter. A key's content is only
//! cached from its second observation onward; the first observation is
//! recorded in the filter and fetched without caching.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cache::{CacheStats, FetchedPage, LookupOutcome, MembershipFilter};
use crate::config::Config;
use crate::error::Result;
use crate::fetch::PageFetcher;

// == Gated Cache ==
/// Page cache that consults a Bloom filter before paying for a fetch.
///
/// Both the exact store and the filter only grow: no eviction, no deletion,
/// and a stored value is never replaced.
#[derive(Debug)]
pub struct GatedCache<F> {
    /// Exact key -> content storage
    exact_store: HashMap<String, String>,
    /// Record of keys observed at least once
    filter: MembershipFilter,
    /// Remote content source
    fetcher: F,
    /// Lookup statistics
    stats: CacheStats,
}

impl<F: PageFetcher> GatedCache<F> {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `bloom_size` - Number of filter bits, must be positive
    /// * `hash_count` - Hash derivations per key, must be positive
    /// * `fetcher` - Source of page content
    pub fn new(bloom_size: usize, hash_count: usize, fetcher: F) -> Result<Self> {
        Ok(Self {
            exact_store: HashMap::new(),
            filter: MembershipFilter::new(bloom_size, hash_count)?,
            fetcher,
            stats: CacheStats::new(),
        })
    }

    /// Creates an empty cache sized from the configuration.
    pub fn from_config(config: &Config, fetcher: F) -> Result<Self> {
        Self::new(config.bloom_size, config.hash_count, fetcher)
    }

    // == Fetch Page ==
    /// Looks up a page, fetching it when it is not stored.
    ///
    /// 1. Stored: returned without touching the filter or the fetcher.
    /// 2. Not stored, filter positive: fetched, and stored if the fetch succeeded.
    /// 3. Not stored, filter negative: recorded in the filter, then fetched
    ///    but not stored.
    ///
    /// A failed fetch yields `content: None` and stores nothing. The filter
    /// insertion in case 3 stands even if the fetch fails.
    pub fn fetch_page(&mut self, key: &str) -> FetchedPage {
        if let Some(content) = self.exact_store.get(key) {
            debug!(key = %key, "Page served from cache");
            self.stats.record_lookup(LookupOutcome::CacheHit);
            return FetchedPage::new(LookupOutcome::CacheHit, Some(content.clone()));
        }

        if self.filter.might_contain(key) {
            debug!(key = %key, "Key seen before, fetching and caching page");
            self.stats.record_lookup(LookupOutcome::FilterHit);

            let content = self.fetch_remote(key);
            if let Some(body) = &content {
                self.exact_store.insert(key.to_string(), body.clone());
            }
            return FetchedPage::new(LookupOutcome::FilterHit, content);
        }

        debug!(key = %key, "First sighting, recording key in filter");
        self.stats.record_lookup(LookupOutcome::FirstSighting);
        self.filter.insert(key);

        let content = self.fetch_remote(key);
        FetchedPage::new(LookupOutcome::FirstSighting, content)
    }

    /// Runs the fetcher, reducing any failure to absence.
    fn fetch_remote(&mut self, key: &str) -> Option<String> {
        let result = self.fetcher.fetch(key);
        self.stats.record_fetch(result.is_ok());

        match result {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(key = %key, error = %e, "Fetch failed, returning no content");
                None
            }
        }
    }
}

impl<F> GatedCache<F> {
    /// Returns the stored content for a key without fetching or counting a lookup.
    pub fn cached(&self, key: &str) -> Option<&str> {
        self.exact_store.get(key).map(String::as_str)
    }

    /// Returns true if the key has content in the exact store.
    pub fn is_cached(&self, key: &str) -> bool {
        self.exact_store.contains_key(key)
    }

    /// Number of pages in the exact store.
    pub fn len(&self) -> usize {
        self.exact_store.len()
    }

    /// Returns true if no page has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.exact_store.is_empty()
    }

    /// The membership filter guarding the store.
    pub fn filter(&self) -> &MembershipFilter {
        &self.filter
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.exact_store.len();
        stats.bits_set = self.filter.bits_set();
        stats
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::fetch::StaticFetcher;

    fn test_cache(fetcher: StaticFetcher) -> GatedCache<StaticFetcher> {
        GatedCache::new(1000, 3, fetcher).unwrap()
    }

    #[test]
    fn test_cache_new() {
        let cache = test_cache(StaticFetcher::new());
        assert_eq!(cache.len(), 0);
        assert!(cache.is_empty());
        assert_eq!(cache.filter().size(), 1000);
        assert_eq!(cache.filter().hash_count(), 3);
    }

    #[test]
    fn test_cache_rejects_invalid_config() {
        let result = GatedCache::new(0, 3, StaticFetcher::new());
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));

        let result = GatedCache::new(1000, 0, StaticFetcher::new());
        assert!(matches!(result, Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_cache_from_config() {
        let config = Config {
            bloom_size: 2048,
            hash_count: 4,
            ..Config::default()
        };
        let cache = GatedCache::from_config(&config, StaticFetcher::new()).unwrap();
        assert_eq!(cache.filter().size(), 2048);
        assert_eq!(cache.filter().hash_count(), 4);
    }

    #[test]
    fn test_three_branch_sequence() {
        let fetcher = StaticFetcher::new().with_page("A", "page A");
        let mut cache = test_cache(fetcher.clone());

        // First sighting: fetched, recorded in filter, not cached
        assert!(!cache.filter().might_contain("A"));
        let page = cache.fetch_page("A");
        assert_eq!(page.outcome, LookupOutcome::FirstSighting);
        assert_eq!(page.content.as_deref(), Some("page A"));
        assert_eq!(fetcher.calls(), 1);
        assert!(cache.filter().might_contain("A"));
        assert!(!cache.is_cached("A"));

        // Second: filter positive, fetched again and cached
        let page = cache.fetch_page("A");
        assert_eq!(page.outcome, LookupOutcome::FilterHit);
        assert_eq!(page.content.as_deref(), Some("page A"));
        assert_eq!(fetcher.calls(), 2);
        assert_eq!(cache.cached("A"), Some("page A"));

        // Third: exact hit, no fetch
        let page = cache.fetch_page("A");
        assert_eq!(page.outcome, LookupOutcome::CacheHit);
        assert_eq!(page.content.as_deref(), Some("page A"));
        assert_eq!(fetcher.calls(), 2);
    }

    #[test]
    fn test_first_sighting_failure_keeps_filter_entry() {
        let fetcher = StaticFetcher::new();
        let mut cache = test_cache(fetcher.clone());

        let page = cache.fetch_page("gone");
        assert_eq!(page.outcome, LookupOutcome::FirstSighting);
        assert!(page.content.is_none());
        assert!(cache.filter().might_contain("gone"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_filter_hit_failure_stores_nothing() {
        let fetcher = StaticFetcher::new();
        let mut cache = test_cache(fetcher.clone());

        cache.fetch_page("gone");
        let page = cache.fetch_page("gone");

        assert_eq!(page.outcome, LookupOutcome::FilterHit);
        assert!(page.content.is_none());
        assert!(cache.is_empty());

        // Still not stored, so every further lookup fetches again
        cache.fetch_page("gone");
        assert_eq!(fetcher.calls(), 3);
    }

    #[test]
    fn test_stats_track_branches() {
        let fetcher = StaticFetcher::new().with_page("A", "page A");
        let mut cache = test_cache(fetcher);

        cache.fetch_page("A");
        cache.fetch_page("A");
        cache.fetch_page("A");
        cache.fetch_page("missing");

        let stats = cache.stats();
        assert_eq!(stats.first_sightings, 2);
        assert_eq!(stats.filter_hits, 1);
        assert_eq!(stats.cache_hits, 1);
        assert_eq!(stats.fetches, 3);
        assert_eq!(stats.fetch_failures, 1);
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.bits_set, cache.filter().bits_set());
    }

    #[test]
    fn test_false_positive_caches_on_first_lookup() {
        // A single-slot filter reads positive for every key once anything is inserted
        let fetcher = StaticFetcher::new()
            .with_page("seen", "seen page")
            .with_page("fresh", "fresh page");
        let mut cache = GatedCache::new(1, 1, fetcher).unwrap();

        cache.fetch_page("seen");
        let page = cache.fetch_page("fresh");

        assert_eq!(page.outcome, LookupOutcome::FilterHit);
        assert_eq!(cache.cached("fresh"), Some("fresh page"));
    }

    #[test]
    fn test_cached_has_no_side_effects() {
        let fetcher = StaticFetcher::new().with_page("A", "page A");
        let cache = test_cache(fetcher.clone());

        assert!(cache.cached("A").is_none());
        assert_eq!(fetcher.calls(), 0);
        assert_eq!(cache.stats().lookups(), 0);
        assert!(!cache.filter().might_contain("A"));
    }
}
