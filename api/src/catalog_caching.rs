//! Handles the caching logic for upstream trending listings.
#![allow(dead_code)]

use crate::media::TrendWindow;
use crate::metadata_providers::tmdb::Tmdb;
use crate::metadata_providers::CatalogTitle;
use crate::metadata_providers::MetadataProvider;
use crate::ApiError;
use crate::TrendingLists;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{OnceCell, RwLock};

#[derive(Clone, Debug)]
struct CachedTrending {
    window: TrendWindow,
    lists: TrendingLists,
    last_fetched: Instant,
}

/// How many listing pages to merge per kind. The library screens show a
/// few dozen cards, which two pages comfortably cover.
const TRENDING_PAGES: u32 = 2;

/// Retrieves trending listings, using a lazy, time-based cache.
///
/// This function acts as a gatekeeper to the underlying metadata provider.
/// It only calls the provider when the cache is empty, holds a different
/// window, or is older than the defined `CACHE_DURATION`.
pub async fn get_cached_trending(window: TrendWindow) -> Result<TrendingLists, ApiError> {
    static CACHE: OnceCell<Arc<RwLock<Option<CachedTrending>>>> = OnceCell::const_new();
    const CACHE_DURATION: Duration = Duration::from_secs(600);

    let cache_lock = CACHE
        .get_or_init(|| async { Arc::new(RwLock::new(None)) })
        .await;

    // Check if a valid, non-stale cache entry exists first with a read lock.
    let read_lock = cache_lock.read().await;
    if let Some(cache) = &*read_lock {
        if cache.window == window && cache.last_fetched.elapsed() < CACHE_DURATION {
            return Ok(cache.lists.clone());
        }
    }
    drop(read_lock); // Release read lock before attempting to acquire a write lock.

    // If the cache was empty or stale, acquire a write lock to update it.
    let mut write_lock = cache_lock.write().await;

    // A crucial double-check: another task might have updated the cache while we were waiting for the write lock.
    if let Some(cache) = &*write_lock {
        if cache.window == window && cache.last_fetched.elapsed() < CACHE_DURATION {
            return Ok(cache.lists.clone());
        }
    }

    // We have the lock and the cache is confirmed to be stale. Fetch new data.
    let provider = Tmdb::from_env()?;
    let lists = fetch_trending(&provider, window).await?;

    *write_lock = Some(CachedTrending {
        window,
        lists: lists.clone(),
        last_fetched: Instant::now(),
    });

    Ok(lists)
}

async fn fetch_trending(provider: &Tmdb, window: TrendWindow) -> Result<TrendingLists, ApiError> {
    use crate::media::MediaKind;

    let mut movies: Vec<CatalogTitle> = Vec::new();
    let mut series: Vec<CatalogTitle> = Vec::new();
    for page in 1..=TRENDING_PAGES {
        movies.extend(provider.trending(MediaKind::Movie, window, page).await?);
        series.extend(provider.trending(MediaKind::Series, window, page).await?);
    }

    Ok(TrendingLists { movies, series })
}
