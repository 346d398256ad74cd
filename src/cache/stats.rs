//! Cache Statistics Module
//!
//! Tracks how lookups were served and how often the remote fetcher ran.

use serde::Serialize;

use super::LookupOutcome;

// == Cache Stats ==
/// Tracks page cache performance metrics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Lookups served from the exact store
    pub cache_hits: u64,
    /// Lookups where the filter reported a probable repeat
    pub filter_hits: u64,
    /// Lookups of keys the filter had definitely not seen
    pub first_sightings: u64,
    /// Number of times the remote fetcher was invoked
    pub fetches: u64,
    /// Number of fetches that yielded no content
    pub fetch_failures: u64,
    /// Current number of entries in the exact store
    pub total_entries: usize,
    /// Number of filter bits currently set
    pub bits_set: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of lookups recorded.
    pub fn lookups(&self) -> u64 {
        self.cache_hits + self.filter_hits + self.first_sightings
    }

    // == Hit Rate ==
    /// Calculates the exact-store hit rate.
    ///
    /// Returns cache_hits / lookups, or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.lookups();
        if total == 0 {
            0.0
        } else {
            self.cache_hits as f64 / total as f64
        }
    }

    // == Record Lookup ==
    /// Counts a lookup under the branch that served it.
    pub fn record_lookup(&mut self, outcome: LookupOutcome) {
        match outcome {
            LookupOutcome::CacheHit => self.cache_hits += 1,
            LookupOutcome::FilterHit => self.filter_hits += 1,
            LookupOutcome::FirstSighting => self.first_sightings += 1,
        }
    }

    // == Record Fetch ==
    /// Counts a fetcher invocation and whether it failed.
    pub fn record_fetch(&mut self, succeeded: bool) {
        self.fetches += 1;
        if !succeeded {
            self.fetch_failures += 1;
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.cache_hits, 0);
        assert_eq!(stats.filter_hits, 0);
        assert_eq!(stats.first_sightings, 0);
        assert_eq!(stats.fetches, 0);
        assert_eq!(stats.fetch_failures, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_hit_rate_no_lookups() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_lookup(LookupOutcome::FirstSighting);
        stats.record_lookup(LookupOutcome::FilterHit);
        stats.record_lookup(LookupOutcome::CacheHit);
        stats.record_lookup(LookupOutcome::CacheHit);
        assert_eq!(stats.lookups(), 4);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_record_fetch() {
        let mut stats = CacheStats::new();
        stats.record_fetch(true);
        stats.record_fetch(false);
        stats.record_fetch(false);
        assert_eq!(stats.fetches, 3);
        assert_eq!(stats.fetch_failures, 2);
    }
}
