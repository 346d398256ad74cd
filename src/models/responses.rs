//! Response DTOs for the page cache API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, FetchedPage, LookupOutcome, MembershipFilter};

/// Response body for a page lookup (GET /page?key=...)
#[derive(Debug, Clone, Serialize)]
pub struct PageResponse {
    /// The requested key
    pub key: String,
    /// Which branch of the gate served the lookup
    pub outcome: LookupOutcome,
    /// Page content, null when the fetch failed
    pub content: Option<String>,
    /// Whether the key is in the exact store after this lookup
    pub cached: bool,
}

impl PageResponse {
    /// Creates a new PageResponse
    pub fn new(key: impl Into<String>, page: FetchedPage, cached: bool) -> Self {
        Self {
            key: key.into(),
            outcome: page.outcome,
            content: page.content,
            cached,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookup and fetch counters
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Exact-store hit rate
    pub hit_rate: f64,
    /// Filter size in bits
    pub size: usize,
    /// Hash derivations per key
    pub hash_count: usize,
    /// Estimated false positive rate at the current fill
    pub estimated_false_positive_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics and the filter
    pub fn new(stats: CacheStats, filter: &MembershipFilter) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            size: filter.size(),
            hash_count: filter.hash_count(),
            estimated_false_positive_rate: filter.estimated_false_positive_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_response_serialize() {
        let page = FetchedPage::new(LookupOutcome::FilterHit, Some("<p>hi</p>".to_string()));
        let resp = PageResponse::new("https://a.com", page, true);
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["key"], "https://a.com");
        assert_eq!(json["outcome"], "filter_hit");
        assert_eq!(json["content"], "<p>hi</p>");
        assert_eq!(json["cached"], true);
    }

    #[test]
    fn test_page_response_absent_content() {
        let page = FetchedPage::new(LookupOutcome::FirstSighting, None);
        let resp = PageResponse::new("k", page, false);
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();
        assert!(json["content"].is_null());
    }

    #[test]
    fn test_stats_response_flattens_counters() {
        let mut stats = CacheStats::new();
        stats.record_lookup(LookupOutcome::CacheHit);
        stats.record_lookup(LookupOutcome::FirstSighting);
        let filter = MembershipFilter::new(128, 2).unwrap();

        let resp = StatsResponse::new(stats, &filter);
        let json: serde_json::Value = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["cache_hits"], 1);
        assert_eq!(json["first_sightings"], 1);
        assert_eq!(json["size"], 128);
        assert_eq!(json["hash_count"], 2);
        assert!((resp.hit_rate - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
