//! Lookup Outcome Module
//!
//! Structured result of a gated page lookup, replacing ad-hoc status output.

use serde::Serialize;

// == Lookup Outcome ==
/// Which branch of the gate served a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOutcome {
    /// Served from the exact store without fetching
    CacheHit,
    /// Not stored, but the filter has likely seen the key: fetched and cached
    FilterHit,
    /// Definitely new: recorded in the filter, fetched, not cached
    FirstSighting,
}

impl LookupOutcome {
    /// Returns true if the remote fetcher ran for this lookup.
    pub fn fetched(&self) -> bool {
        !matches!(self, LookupOutcome::CacheHit)
    }
}

// == Fetched Page ==
/// A page lookup result: the branch taken and the content, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Branch of the gate that served the lookup
    pub outcome: LookupOutcome,
    /// Page content, None when the fetch failed
    pub content: Option<String>,
}

impl FetchedPage {
    /// Creates a new FetchedPage.
    pub fn new(outcome: LookupOutcome, content: Option<String>) -> Self {
        Self { outcome, content }
    }

    /// Discards the outcome, keeping only the value or absence.
    pub fn into_content(self) -> Option<String> {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_fetched() {
        assert!(!LookupOutcome::CacheHit.fetched());
        assert!(LookupOutcome::FilterHit.fetched());
        assert!(LookupOutcome::FirstSighting.fetched());
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        let json = serde_json::to_string(&LookupOutcome::FirstSighting).unwrap();
        assert_eq!(json, "\"first_sighting\"");
    }

    #[test]
    fn test_into_content() {
        let page = FetchedPage::new(LookupOutcome::CacheHit, Some("body".to_string()));
        assert_eq!(page.into_content().as_deref(), Some("body"));
    }
}
