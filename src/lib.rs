//! Bloom Page Cache - a page cache gated by a Bloom filter
//!
//! Keeps an exact store of fetched pages behind a fixed-size membership filter.
//! A page is cached from its second sighting onward; the first sighting is only
//! recorded in the filter.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;

pub use api::AppState;
pub use cache::{FetchedPage, GatedCache, LookupOutcome, MembershipFilter};
pub use config::Config;
pub use fetch::{HttpFetcher, PageFetcher, StaticFetcher};
