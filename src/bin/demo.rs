//! Command-line demonstration of the gated page cache.
//!
//! Looks each URL up twice with `bloom_size=1000` and `hash_count=3`:
//! the first lookup records the URL in the filter, the second caches the page.
//!
//! Usage: `demo [URL...]`

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bloom_page_cache::{GatedCache, HttpFetcher};

const DEMO_BLOOM_SIZE: usize = 1000;
const DEMO_HASH_COUNT: usize = 3;
const DEFAULT_URLS: [&str; 2] = ["https://www.example.com", "https://www.python.org"];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bloom_page_cache=info,demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        urls = DEFAULT_URLS.iter().map(|u| u.to_string()).collect();
    }

    // Fetches block the main thread while the runtime's workers drive I/O
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let fetcher = HttpFetcher::new(runtime.handle().clone(), Duration::from_secs(30))?;
    let mut cache = GatedCache::new(DEMO_BLOOM_SIZE, DEMO_HASH_COUNT, fetcher)?;

    for url in &urls {
        for attempt in ["first", "second"] {
            let page = cache.fetch_page(url);
            info!(
                url = %url,
                attempt,
                outcome = ?page.outcome,
                bytes = page.content.as_ref().map(String::len),
                "Lookup finished"
            );
        }
    }

    let stats = cache.stats();
    info!(
        cache_hits = stats.cache_hits,
        filter_hits = stats.filter_hits,
        first_sightings = stats.first_sightings,
        fetches = stats.fetches,
        fetch_failures = stats.fetch_failures,
        cached_pages = stats.total_entries,
        "Demo complete"
    );

    Ok(())
}
