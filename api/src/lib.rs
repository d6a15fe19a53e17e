//! This crate contains the shared domain types and all fullstack server functions.

#[cfg(not(target_arch = "wasm32"))]
mod billing;
#[cfg(not(target_arch = "wasm32"))]
mod catalog_caching;
pub mod entry;
pub mod genres;
pub mod insights;
pub mod media;
pub mod metadata_providers;
pub mod prefs;
pub mod rating;
pub mod recommend;
pub mod subscription;
pub mod watchlist;

use dioxus::prelude::*;

use media::CatalogSort;
use media::MediaKind;
use media::TrendWindow;
use metadata_providers::CatalogTitle;
use prefs::user_prefs::UserPrefs;
use recommend::Recommendation;
use recommend::TasteProfile;
use serde::Deserialize;
use serde::Serialize;
use subscription::RedirectTarget;
use subscription::SubscriptionStatus;

pub type ApiError = anyhow::Error;

/// Trending movie and series listings for one window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendingLists {
    pub movies: Vec<CatalogTitle>,
    pub series: Vec<CatalogTitle>,
}

/// Retrieves the deployment-wide preferences.
///
/// In the future this may read from a settings file.  For now it just
/// returns the default settings, which read from env vars.
#[post("/api/get_user_prefs")]
pub async fn get_user_prefs() -> Result<UserPrefs, ApiError> {
    Ok(UserPrefs::default())
}

/// Trending listings, served from the time-based server cache.
#[post("/api/trending")]
pub async fn trending(window: TrendWindow) -> Result<TrendingLists, ApiError> {
    catalog_caching::get_cached_trending(window).await
}

/// Titles in one genre, ordered by the requested sort.
#[post("/api/discover")]
pub async fn discover(
    kind: MediaKind,
    genre_id: u32,
    sort: CatalogSort,
    page: u32,
) -> Result<Vec<CatalogTitle>, ApiError> {
    use metadata_providers::MetadataProvider;

    let provider = metadata_providers::tmdb::Tmdb::from_env()?;
    provider.discover(kind, genre_id, sort, page).await
}

/// Free-text catalog search within one kind.
#[post("/api/search_catalog")]
pub async fn search_catalog(kind: MediaKind, query: String) -> Result<Vec<CatalogTitle>, ApiError> {
    use metadata_providers::MetadataProvider;

    let provider = metadata_providers::tmdb::Tmdb::from_env()?;
    provider.search(kind, &query).await
}

/// Personalized suggestions for the given taste profile.
///
/// The candidate pool is assembled server-side from the profile's top
/// genres plus the weekly trending cache; the selection itself is the
/// pure logic in [`recommend`].
#[post("/api/recommendations")]
pub async fn recommendations(profile: TasteProfile) -> Result<Vec<Recommendation>, ApiError> {
    use metadata_providers::MetadataProvider;

    if profile.is_empty() {
        return Ok(Vec::new());
    }

    let provider = metadata_providers::tmdb::Tmdb::from_env()?;
    let mut pool: Vec<CatalogTitle> = Vec::new();

    for genre in profile.top_genres.iter().take(2) {
        if let Some(genre_id) = genres::id_for(genre, MediaKind::Movie) {
            pool.extend(
                provider
                    .discover(MediaKind::Movie, genre_id, CatalogSort::Rating, 1)
                    .await?,
            );
        }
        if let Some(genre_id) = genres::id_for(genre, MediaKind::Series) {
            pool.extend(
                provider
                    .discover(MediaKind::Series, genre_id, CatalogSort::Rating, 1)
                    .await?,
            );
        }
    }

    let trending = catalog_caching::get_cached_trending(TrendWindow::Week).await?;
    pool.extend(trending.movies);
    pool.extend(trending.series);

    Ok(recommend::recommend(&profile, &pool))
}

/// One random unseen title for the "surprise me" button.
#[post("/api/surprise")]
pub async fn surprise(profile: TasteProfile) -> Result<Option<CatalogTitle>, ApiError> {
    use metadata_providers::MetadataProvider;
    use rand::seq::SliceRandom;
    use rand::Rng;

    let (kind, genre_id, sort, page) = {
        let mut rng = rand::thread_rng();
        let kind = if rng.gen_bool(0.5) {
            MediaKind::Movie
        } else {
            MediaKind::Series
        };
        let table = match kind {
            MediaKind::Movie => genres::MOVIE_GENRES,
            MediaKind::Series => genres::TV_GENRES,
        };
        // Any genre, any early page: variety beats relevance here.
        let genre_id = table
            .choose(&mut rng)
            .map(|(id, _)| *id)
            .unwrap_or(18);
        let sort = [CatalogSort::Popularity, CatalogSort::Rating, CatalogSort::ReleaseDate]
            .choose(&mut rng)
            .copied()
            .unwrap_or_default();
        (kind, genre_id, sort, rng.gen_range(1..=10))
    };

    let provider = metadata_providers::tmdb::Tmdb::from_env()?;
    let pool = provider.discover(kind, genre_id, sort, page).await?;
    Ok(recommend::surprise_pick(&profile, &pool).cloned())
}

/// Starts a premium checkout flow and returns the provider's redirect URL.
#[post("/api/create_checkout")]
pub async fn create_checkout(access_token: String) -> Result<RedirectTarget, ApiError> {
    let config = billing::BillingConfig::from_env()?;
    let user = billing::verify_bearer(&config, &access_token).await?;
    let url = billing::create_checkout_session(&config, &user).await?;
    dioxus_logger::tracing::info!("created checkout session for user {}", user.id);
    Ok(RedirectTarget { url })
}

/// Opens the billing portal for an existing subscriber.
#[post("/api/customer_portal")]
pub async fn customer_portal(access_token: String) -> Result<RedirectTarget, ApiError> {
    let config = billing::BillingConfig::from_env()?;
    let user = billing::verify_bearer(&config, &access_token).await?;
    let url = billing::create_portal_session(&config, &user).await?;
    Ok(RedirectTarget { url })
}

/// Re-checks the caller's subscription with the payments provider.
#[post("/api/check_subscription")]
pub async fn check_subscription(access_token: String) -> Result<SubscriptionStatus, ApiError> {
    let config = billing::BillingConfig::from_env()?;
    let user = billing::verify_bearer(&config, &access_token).await?;
    billing::subscription_status(&config, &user).await
}
