//! Fetch Module
//!
//! The boundary between the page cache and whatever retrieves page content.
//!
//! # Fetchers
//! - `HttpFetcher`: GET over HTTP with reqwest, keys are URLs
//! - `StaticFetcher`: serves pages from an in-memory table

mod http;
mod static_table;

pub use http::HttpFetcher;
pub use static_table::StaticFetcher;

use crate::error::FetchError;

// == Page Fetcher ==
/// Retrieves the content for a key.
///
/// Implementations report every failure as a `FetchError`; they must not panic
/// on network or status errors.
pub trait PageFetcher {
    /// Fetches the page for `key`, blocking until it completes.
    fn fetch(&self, key: &str) -> Result<String, FetchError>;
}

impl<P: PageFetcher + ?Sized> PageFetcher for Box<P> {
    fn fetch(&self, key: &str) -> Result<String, FetchError> {
        (**self).fetch(key)
    }
}
