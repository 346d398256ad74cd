//! Cache Module
//!
//! Provides the Bloom-filter-gated page cache.

mod filter;
mod outcome;
mod stats;
mod store;


// Re-export public types
pub use filter::MembershipFilter;
pub use outcome::{FetchedPage, LookupOutcome};
pub use stats::CacheStats;
pub use store::GatedCache;
