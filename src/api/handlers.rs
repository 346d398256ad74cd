//! API Handlers
//!
//! HTTP request handlers for each page cache endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    Json,
};

use crate::cache::GatedCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::fetch::PageFetcher;
use crate::models::{HealthResponse, PageQuery, PageResponse, StatsResponse};

/// Fetcher type held by the shared cache.
pub type SharedFetcher = Box<dyn PageFetcher + Send + Sync>;

/// Cache type held by the application state.
pub type SharedCache = GatedCache<SharedFetcher>;

/// Application state shared across all handlers.
///
/// The cache itself is single-threaded; every handler runs its whole
/// operation under one mutex, on the blocking pool, because a lookup may
/// block on a remote fetch.
#[derive(Clone)]
pub struct AppState {
    /// Mutex-guarded page cache
    pub cache: Arc<Mutex<SharedCache>>,
}

impl AppState {
    /// Creates a new AppState with the given cache.
    pub fn new(cache: SharedCache) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails if the configured filter dimensions are not positive.
    pub fn from_config(config: &Config, fetcher: SharedFetcher) -> Result<Self> {
        let cache = GatedCache::from_config(config, fetcher)?;
        Ok(Self::new(cache))
    }

    /// Runs `f` with exclusive access to the cache on the blocking pool.
    async fn with_cache<T, Op>(&self, f: Op) -> Result<T>
    where
        T: Send + 'static,
        Op: FnOnce(&mut SharedCache) -> T + Send + 'static,
    {
        let cache = Arc::clone(&self.cache);

        tokio::task::spawn_blocking(move || {
            let mut guard = cache
                .lock()
                .map_err(|_| CacheError::Internal("cache lock poisoned".to_string()))?;
            Ok::<T, CacheError>(f(&mut *guard))
        })
        .await
        .map_err(|e| CacheError::Internal(format!("cache task failed: {}", e)))?
    }
}

/// Handler for GET /page?key=...
///
/// Looks a page up through the gated cache, fetching it if needed.
pub async fn page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<PageResponse>> {
    if let Some(error_msg) = query.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let key = query.key;
    let response = state
        .with_cache(move |cache| {
            let page = cache.fetch_page(&key);
            let cached = cache.is_cached(&key);
            PageResponse::new(key, page, cached)
        })
        .await?;

    Ok(Json(response))
}

/// Handler for GET /stats
///
/// Returns lookup statistics and filter parameters.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let response = state
        .with_cache(|cache| StatsResponse::new(cache.stats(), cache.filter()))
        .await?;

    Ok(Json(response))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
