//! The shared add-to-collection flow used by every catalog surface.
//!
//! Trending rows, the genre browser, recommendations, and the surprise
//! pick all funnel through here so the free-tier gate and the duplicate
//! check behave identically everywhere.

use crate::hooks::use_slot::SlotHandle;
use crate::store::StoreError;
use api::entry::catalog_entry_id;
use api::entry::WatchlistEntry;
use api::media::WatchStatus;
use api::metadata_providers::CatalogTitle;
use api::watchlist::Watchlist;
use chrono::Utc;

/// What happened when the user hit "+ Add".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Free tier is full; the caller shows the upsell flow.
    LimitReached,
    AlreadyTracked,
}

pub fn add_from_catalog(
    list: &SlotHandle<Watchlist>,
    title: &CatalogTitle,
    free_limit: usize,
    is_premium: bool,
) -> Result<AddOutcome, StoreError> {
    let mut current = list.get();

    let id = catalog_entry_id(title.kind, title.id);
    if current.contains_id(&id) || current.contains_title(&title.title) {
        return Ok(AddOutcome::AlreadyTracked);
    }
    if !is_premium && current.len() >= free_limit {
        return Ok(AddOutcome::LimitReached);
    }

    let entry = WatchlistEntry::from_catalog(title, WatchStatus::Planned, Utc::now());
    if current.add(entry, Utc::now()).is_err() {
        // The id check above makes this unreachable in practice.
        return Ok(AddOutcome::AlreadyTracked);
    }
    list.set(&current)?;
    Ok(AddOutcome::Added)
}
